// GitHub API module.
// Provides the client, repository types, and the upstream fetcher for the cache.

pub mod client;
pub mod endpoints;
pub mod types;

pub use client::{GITHUB_API_BASE, GitHubClient};
pub use endpoints::{MAX_PER_PAGE, OrgRepoFetcher};
pub use types::*;
