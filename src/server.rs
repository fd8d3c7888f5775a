// HTTP routes for the repository service.
// Thin axum layer mapping the two query views and the service error to responses.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::get,
};

use crate::error::ServiceError;
use crate::github::Repository;
use crate::query::{RepoQuery, RepositorySummary};
use crate::service::RepoService;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: RepoService,
    pub home_redirect: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/api/github/repositories/listall", get(list_all))
        .route("/api/github/repositories/filter", get(filter))
        .with_state(state)
}

async fn home(State(state): State<AppState>) -> Response {
    match state.home_redirect.as_deref() {
        Some(url) => Redirect::temporary(url).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn list_all(State(state): State<AppState>) -> Result<Json<Vec<Repository>>, ServiceError> {
    Ok(Json(state.service.list_all().await?))
}

async fn filter(
    State(state): State<AppState>,
    Query(query): Query<RepoQuery>,
) -> Result<Json<Vec<RepositorySummary>>, ServiceError> {
    Ok(Json(state.service.filter(&query).await?))
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        match self {
            ServiceError::Unavailable { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to fetch repositories from GitHub.",
            )
                .into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheManager, CacheStore, UpstreamFetcher};
    use crate::config::{Config, DEFAULT_HOME_REDIRECT};
    use crate::error::{FetchError, Result as FetchResult};
    use crate::github::Owner;
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, header};
    use http_body_util::BodyExt;
    use std::sync::Arc;
    use tower::ServiceExt;

    struct FixedFetcher(Option<Vec<Repository>>);

    #[async_trait]
    impl UpstreamFetcher for FixedFetcher {
        async fn fetch(&self) -> FetchResult<Vec<Repository>> {
            self.0.clone().ok_or(FetchError::Status {
                status: 500,
                body: String::new(),
            })
        }
    }

    fn repo(name: &str, language: &str, created_at: &str) -> Repository {
        Repository {
            full_name: name.to_string(),
            description: "d".to_string(),
            language: language.to_string(),
            owner: Owner {
                avatar_url: "https://avatars.example/org".to_string(),
            },
            created_at: created_at.parse().unwrap(),
        }
    }

    fn app(records: Option<Vec<Repository>>, home_redirect: Option<&str>) -> Router {
        let cache = CacheManager::new(CacheStore::default(), Arc::new(FixedFetcher(records)));
        router(AppState {
            service: RepoService::new(Arc::new(cache)),
            home_redirect: home_redirect.map(str::to_string),
        })
    }

    fn sample() -> Option<Vec<Repository>> {
        Some(vec![
            repo("org/a", "Go", "2020-01-01T00:00:00Z"),
            repo("org/b", "Go", "2019-01-01T00:00:00Z"),
            repo("org/c", "Rust", "2021-01-01T00:00:00Z"),
        ])
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_list_all_returns_full_shape() {
        let (status, body) = get(app(sample(), None), "/api/github/repositories/listall").await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 3);
        assert_eq!(value[0]["full_name"], "org/a");
        assert_eq!(value[0]["owner"]["avatar_url"], "https://avatars.example/org");
    }

    #[tokio::test]
    async fn test_filter_returns_projection() {
        let (status, body) = get(
            app(sample(), None),
            "/api/github/repositories/filter?language=go&sortOrder=desc&limit=1",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(
            value,
            serde_json::json!([{
                "fullName": "org/a",
                "description": "d",
                "language": "Go",
                "createdAt": "2020-01-01T00:00:00Z",
                "ownerAvatarUrl": "https://avatars.example/org",
            }])
        );
    }

    #[tokio::test]
    async fn test_filter_binds_pascal_case_keys() {
        let (status, body) = get(
            app(sample(), None),
            "/api/github/repositories/filter?Language=GO&SortOrder=desc&Limit=1",
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0]["fullName"], "org/a");
    }

    #[tokio::test]
    async fn test_cold_failure_is_server_error() {
        let (status, _) = get(app(None, None), "/api/github/repositories/listall").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

        let (status, _) = get(app(None, None), "/api/github/repositories/filter").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_root_redirects_when_configured() {
        let response = app(sample(), Config::default().home_redirect.as_deref())
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(
            response.headers()[header::LOCATION],
            DEFAULT_HOME_REDIRECT
        );

        let (status, _) = get(app(sample(), None), "/").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
