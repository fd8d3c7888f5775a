// GitHub API endpoint functions.
// Provides the organization repository listing used to fill the cache.

use async_trait::async_trait;

use crate::cache::UpstreamFetcher;
use crate::error::Result;

use super::client::GitHubClient;
use super::types::Repository;

/// GitHub caps `per_page` at 100; the service never reads past the first page.
pub const MAX_PER_PAGE: u32 = 100;

impl GitHubClient {
    /// Get the first page of repositories for an organization.
    pub async fn get_org_repos(&self, org: &str, per_page: u32) -> Result<Vec<Repository>> {
        let params = [("per_page", per_page.min(MAX_PER_PAGE).to_string())];
        let response = self
            .get_with_params(&format!("/orgs/{}/repos", org), &params)
            .await?;

        // Decode separately so a malformed body is reported as such, not as a transport error.
        let body = response.text().await?;
        let repos: Vec<Repository> = serde_json::from_str(&body)?;
        Ok(repos)
    }
}

/// Fetches one organization's repository listing for the cache.
#[derive(Debug, Clone)]
pub struct OrgRepoFetcher {
    client: GitHubClient,
    org: String,
    per_page: u32,
}

impl OrgRepoFetcher {
    pub fn new(client: GitHubClient, org: impl Into<String>, per_page: u32) -> Self {
        Self {
            client,
            org: org.into(),
            per_page,
        }
    }
}

#[async_trait]
impl UpstreamFetcher for OrgRepoFetcher {
    async fn fetch(&self) -> Result<Vec<Repository>> {
        self.client.get_org_repos(&self.org, self.per_page).await
    }
}
