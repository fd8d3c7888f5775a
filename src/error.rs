// Error types for repo-lister.
// Separates upstream fetch failures from the errors the service reports to callers.

use thiserror::Error;

/// Failure of a single upstream repository fetch.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("GitHub API error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Authentication failed: invalid or expired token")]
    Unauthorized,

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Rate limit exceeded, resets at {reset_at}")]
    RateLimited { reset_at: String },

    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode repository list: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("GitHub token is not a valid header value")]
    InvalidToken,
}

/// Error surfaced by the query service.
///
/// Only raised when no snapshot has ever been cached and the refresh failed;
/// every other failure is masked by serving the previous snapshot.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Repository data unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Invalid or unreadable configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Organization name cannot be empty")]
    EmptyOrg,

    #[error("Invalid cache_ttl_secs: {0}. Must be positive")]
    InvalidTtl(u64),

    #[error("Invalid per_page: {0}. Must be between 1 and 100")]
    InvalidPerPage(u32),

    #[error("Configuration could not be loaded: {0}")]
    Extract(#[from] Box<figment::Error>),
}

pub type Result<T> = std::result::Result<T, FetchError>;
