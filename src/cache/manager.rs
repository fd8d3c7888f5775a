// Cache coherency for the repository listing.
// Decides between serving the cached snapshot and refreshing it, collapses
// concurrent refreshes into one upstream call, and falls back to stale data.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::error::ServiceError;

use super::clock::{Clock, SystemClock};
use super::store::{CacheRead, CacheStore, Snapshot};
use super::upstream::UpstreamFetcher;

type RefreshOutcome = Result<Arc<Snapshot>, ServiceError>;

/// Serves the current repository snapshot, refreshing it when expired.
///
/// One instance is shared by every request for the life of the process.
pub struct CacheManager {
    shared: Arc<Shared>,
    /// Held for the whole refresh; stores the outcome of the last one.
    refresh: Arc<Mutex<Option<RefreshOutcome>>>,
}

/// State a detached refresh task needs after the requesting caller is gone.
struct Shared {
    store: CacheStore,
    fetcher: Arc<dyn UpstreamFetcher>,
    clock: Arc<dyn Clock>,
    /// Count of finished refreshes, bumped while `refresh` is held.
    completed: AtomicU64,
}

impl CacheManager {
    pub fn new(store: CacheStore, fetcher: Arc<dyn UpstreamFetcher>) -> Self {
        Self::with_clock(store, fetcher, Arc::new(SystemClock))
    }

    pub fn with_clock(
        store: CacheStore,
        fetcher: Arc<dyn UpstreamFetcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            shared: Arc::new(Shared {
                store,
                fetcher,
                clock,
                completed: AtomicU64::new(0),
            }),
            refresh: Arc::new(Mutex::new(None)),
        }
    }

    pub fn store(&self) -> &CacheStore {
        &self.shared.store
    }

    /// Return fresh data, refreshing from upstream at most once per expiry.
    ///
    /// Callers that arrive while a refresh is running wait for it and receive
    /// its outcome instead of starting their own. A failed refresh serves the
    /// previous snapshot, however old; only a failure with nothing cached
    /// yields [`ServiceError::Unavailable`].
    ///
    /// The refresh runs on its own task holding the lock, so dropping the
    /// caller that started it does not cancel it.
    pub async fn get_current_data(&self) -> Result<Arc<Snapshot>, ServiceError> {
        let shared = &self.shared;
        let seen = shared.completed.load(Ordering::Acquire);

        if let Some(CacheRead {
            snapshot,
            fresh: true,
        }) = shared.store.read(shared.clock.now()).await
        {
            debug!(records = snapshot.records().len(), "Cache hit");
            return Ok(snapshot);
        }

        let mut last = Arc::clone(&self.refresh).lock_owned().await;
        if shared.completed.load(Ordering::Acquire) != seen {
            if let Some(outcome) = last.as_ref() {
                debug!("Joined in-flight refresh");
                return outcome.clone();
            }
        }

        let shared = Arc::clone(shared);
        let task = tokio::spawn(async move {
            let outcome = shared.refresh_now().await;
            *last = Some(outcome.clone());
            shared.completed.fetch_add(1, Ordering::AcqRel);
            outcome
        });

        task.await.unwrap_or_else(|e| {
            error!(error = %e, "Refresh task failed");
            Err(ServiceError::Unavailable {
                reason: format!("refresh task failed: {}", e),
            })
        })
    }
}

impl Shared {
    /// Fetch from upstream and publish. Must be called with `refresh` held.
    async fn refresh_now(&self) -> RefreshOutcome {
        match self.fetcher.fetch().await {
            Ok(records) => {
                let count = records.len();
                let snapshot = self
                    .store
                    .write(Snapshot::new(records, self.clock.now()))
                    .await;
                info!(records = count, "Refreshed repository cache");
                Ok(snapshot)
            }
            Err(err) => match self.store.read(self.clock.now()).await {
                Some(CacheRead { snapshot, .. }) => {
                    warn!(
                        error = %err,
                        fetched_at = %snapshot.fetched_at(),
                        "Refresh failed, serving stale repository cache"
                    );
                    Ok(snapshot)
                }
                None => {
                    error!(error = %err, "Refresh failed with no cached repositories");
                    Err(ServiceError::Unavailable {
                        reason: err.to_string(),
                    })
                }
            },
        }
    }
}
