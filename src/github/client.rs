// GitHub API HTTP client.
// Handles authentication, rate limit headers, and response status checking.

use reqwest::{
    Client, Response, StatusCode,
    header::{ACCEPT, AUTHORIZATION, HeaderMap, HeaderValue, USER_AGENT},
};
use tracing::debug;

use crate::error::{FetchError, Result};

use super::types::RateLimit;

pub const GITHUB_API_BASE: &str = "https://api.github.com";
const GITHUB_API_VERSION: &str = "2022-11-28";

/// GitHub API client with optional bearer authentication.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    client: Client,
    base_url: String,
}

impl GitHubClient {
    /// Create a client against `base_url`, authenticating when a token is given.
    pub fn new(base_url: &str, token: Option<&str>) -> Result<Self> {
        let mut headers = HeaderMap::new();

        if let Some(token) = token {
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&format!("Bearer {}", token))
                    .map_err(|_| FetchError::InvalidToken)?,
            );
        }
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );
        headers.insert(
            "X-GitHub-Api-Version",
            HeaderValue::from_static(GITHUB_API_VERSION),
        );
        headers.insert(USER_AGENT, HeaderValue::from_static("repo-lister/0.1"));

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Make a GET request with query parameters.
    pub async fn get_with_params<T: serde::Serialize + ?Sized>(
        &self,
        endpoint: &str,
        params: &T,
    ) -> Result<Response> {
        let url = format!("{}{}", self.base_url, endpoint);
        let response = self.client.get(&url).query(params).send().await?;

        let rate_limit = RateLimit::from_headers(response.headers());
        if let Some(limit) = &rate_limit {
            debug!(
                limit = limit.limit,
                remaining = limit.remaining,
                reset = limit.reset,
                "GitHub rate limit"
            );
        }

        check_response(response, rate_limit).await
    }
}

/// Check response status and convert errors.
async fn check_response(response: Response, rate_limit: Option<RateLimit>) -> Result<Response> {
    match response.status() {
        status if status.is_success() => Ok(response),
        StatusCode::UNAUTHORIZED => Err(FetchError::Unauthorized),
        StatusCode::NOT_FOUND => Err(FetchError::NotFound(response.url().to_string())),
        StatusCode::FORBIDDEN | StatusCode::TOO_MANY_REQUESTS
            if rate_limit.as_ref().is_some_and(RateLimit::is_exhausted) =>
        {
            let reset_at = rate_limit
                .map(|limit| limit.reset_display())
                .unwrap_or_else(|| "unknown".to_string());
            Err(FetchError::RateLimited { reset_at })
        }
        status => Err(FetchError::Status {
            status: status.as_u16(),
            body: response.text().await.unwrap_or_default(),
        }),
    }
}
