// In-memory cache store for the organization's repository listing.
// Holds the current immutable snapshot and checks it against the TTL.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::github::Repository;

/// Default freshness window: 10 minutes.
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Immutable copy of one successful upstream fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    records: Vec<Repository>,
    fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(records: Vec<Repository>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            records,
            fetched_at,
        }
    }

    /// Records in upstream response order.
    pub fn records(&self) -> &[Repository] {
        &self.records
    }

    pub fn fetched_at(&self) -> DateTime<Utc> {
        self.fetched_at
    }

    /// Fresh while `now < fetched_at + ttl`.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        match now.signed_duration_since(self.fetched_at).to_std() {
            Ok(elapsed) => elapsed < ttl,
            // Fetched "in the future" (clock stepped back): still inside the window.
            Err(_) => true,
        }
    }
}

/// Result of a cache read: the current snapshot and whether it is within its TTL.
#[derive(Debug, Clone)]
pub struct CacheRead {
    pub snapshot: Arc<Snapshot>,
    pub fresh: bool,
}

/// Process-wide holder of at most one snapshot.
///
/// Starts empty, is only changed by [`CacheStore::write`], and never keeps
/// history beyond the current snapshot.
#[derive(Debug)]
pub struct CacheStore {
    current: RwLock<Option<Arc<Snapshot>>>,
    ttl: Duration,
}

impl CacheStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            current: RwLock::new(None),
            ttl,
        }
    }

    /// Current snapshot with its freshness at `now`, or None before the first write.
    pub async fn read(&self, now: DateTime<Utc>) -> Option<CacheRead> {
        let snapshot = self.current.read().await.clone()?;
        let fresh = snapshot.is_fresh_at(now, self.ttl);
        Some(CacheRead { snapshot, fresh })
    }

    /// Replace the current snapshot wholesale.
    pub async fn write(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        let snapshot = Arc::new(snapshot);
        *self.current.write().await = Some(Arc::clone(&snapshot));
        snapshot
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}
