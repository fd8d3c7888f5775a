// GitHub API response types.
// Defines the repository record cached and queried by the service.

use chrono::{DateTime, Utc};
use reqwest::header::HeaderMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Repository owner, reduced to the fields the service exposes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Owner {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub avatar_url: String,
}

/// GitHub repository as listed under an organization.
///
/// Equality is by value; `full_name` is unique within one listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    pub full_name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Primary language as reported upstream, empty when GitHub has none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub language: String,
    #[serde(default)]
    pub owner: Owner,
    pub created_at: DateTime<Utc>,
}

/// Rate limit information from response headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: u64,
}

impl RateLimit {
    /// Parse the `x-ratelimit-*` headers, returning None when GitHub sent none.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let read = |name: &str| -> Option<u64> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok())
        };

        let remaining = read("x-ratelimit-remaining")?;
        Some(Self {
            limit: read("x-ratelimit-limit").unwrap_or_default(),
            remaining,
            reset: read("x-ratelimit-reset").unwrap_or_default(),
        })
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Reset time formatted for error messages.
    pub fn reset_display(&self) -> String {
        DateTime::from_timestamp(self.reset as i64, 0)
            .map(|dt| dt.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "unknown".to_string())
    }
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
