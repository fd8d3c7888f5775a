// Contract for the component that pulls a fresh repository listing.

use async_trait::async_trait;

use crate::error::Result;
use crate::github::Repository;

/// Produces the full repository listing from upstream.
///
/// An empty listing is a success. Implementations only talk to the network;
/// they never touch the cache.
#[async_trait]
pub trait UpstreamFetcher: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Repository>>;
}
