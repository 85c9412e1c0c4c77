//! Cache Module
//!
//! Bounded TTL caching proxy for post lookups, with earliest-expiry eviction.

mod entry;
mod proxy;
mod stats;


// Re-export public types
pub use entry::CacheEntry;
pub use proxy::CachingProxy;
pub use stats::{CacheCounters, CacheStatistics};
