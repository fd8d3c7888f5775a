// Service configuration.
// Layers defaults, an optional JSON file in the platform config dir, and environment variables.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::github::{GITHUB_API_BASE, MAX_PER_PAGE};

/// Project page `GET /` redirects to unless configured otherwise.
pub const DEFAULT_HOME_REDIRECT: &str = "https://github.com/caiquemain/takeablip";

/// Runtime settings for the repository service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// GitHub organization whose repositories are listed.
    pub org: String,
    pub api_base: String,
    /// Bearer token; requests are unauthenticated without one.
    pub github_token: Option<String>,
    pub per_page: u32,
    pub cache_ttl_secs: u64,
    pub listen_addr: SocketAddr,
    /// Where `GET /` redirects to; `null` disables the redirect.
    pub home_redirect: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            org: "takenet".to_string(),
            api_base: GITHUB_API_BASE.to_string(),
            github_token: None,
            per_page: MAX_PER_PAGE,
            cache_ttl_secs: 10 * 60,
            listen_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            home_redirect: Some(DEFAULT_HOME_REDIRECT.to_string()),
        }
    }
}

/// Path to the optional config file (~/.config/repo-lister/config.json on Linux).
pub fn config_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "repo-lister").map(|dirs| dirs.config_dir().join("config.json"))
}

impl Config {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest): defaults, the config file,
    /// `GITHUB_TOKEN`, then `REPO_LISTER_*` variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if let Some(path) = config_path() {
            figment = figment.merge(Json::file(path));
        }
        let figment = figment
            .merge(Env::raw().only(&["GITHUB_TOKEN"]))
            .merge(Env::prefixed("REPO_LISTER_"));

        Self::extract(figment)
    }

    /// Load defaults overlaid with a specific file.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Json::file(path.as_ref()));

        Self::extract(figment)
    }

    fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Extract(Box::new(e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.org.trim().is_empty() {
            return Err(ConfigError::EmptyOrg);
        }
        if self.cache_ttl_secs == 0 {
            return Err(ConfigError::InvalidTtl(self.cache_ttl_secs));
        }
        if self.per_page == 0 || self.per_page > MAX_PER_PAGE {
            return Err(ConfigError::InvalidPerPage(self.per_page));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}
