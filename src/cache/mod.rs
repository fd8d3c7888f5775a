// Cache module for the organization's repository listing.
// Keeps one in-memory snapshot with a TTL and coordinates refreshes from upstream.

pub mod clock;
pub mod manager;
pub mod store;
pub mod upstream;

pub use clock::{Clock, SystemClock};
pub use manager::CacheManager;
pub use store::{CacheRead, CacheStore, DEFAULT_TTL, Snapshot};
pub use upstream::UpstreamFetcher;
