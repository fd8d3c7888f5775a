// repo-lister entry point.
// Wires configuration, the GitHub fetcher, the shared cache, and the HTTP server.

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use repo_lister::cache::{CacheManager, CacheStore};
use repo_lister::config::Config;
use repo_lister::github::{GitHubClient, OrgRepoFetcher};
use repo_lister::server::{self, AppState};
use repo_lister::service::RepoService;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::load().context("Failed to load configuration")?;

    if config.github_token.is_none() {
        warn!("GITHUB_TOKEN not set, GitHub requests will be unauthenticated");
    }

    let client = GitHubClient::new(&config.api_base, config.github_token.as_deref())
        .context("Failed to build GitHub client")?;
    let fetcher = OrgRepoFetcher::new(client, config.org.clone(), config.per_page);

    // One cache for the whole process; every request shares it through the service.
    let cache = Arc::new(CacheManager::new(
        CacheStore::new(config.cache_ttl()),
        Arc::new(fetcher),
    ));

    let app = server::router(AppState {
        service: RepoService::new(cache),
        home_redirect: config.home_redirect.clone(),
    });

    let listener = TcpListener::bind(config.listen_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr))?;

    info!(
        addr = %config.listen_addr,
        org = %config.org,
        ttl_secs = config.cache_ttl_secs,
        "repo-lister listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("repo-lister stopped");
    Ok(())
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
