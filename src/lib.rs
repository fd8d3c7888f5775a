// repo-lister library.
// Caches a GitHub organization's repository listing and answers list/filter queries over it.

pub mod cache;
pub mod config;
pub mod error;
pub mod github;
pub mod query;
pub mod server;
pub mod service;

pub use cache::{CacheManager, CacheStore, Snapshot, UpstreamFetcher};
pub use config::Config;
pub use error::{ConfigError, FetchError, ServiceError};
pub use query::{RepoQuery, RepositorySummary};
pub use service::RepoService;
