//! Cache Statistics Module
//!
//! Hit, miss and eviction counters plus the read-only snapshot handed to callers.

use serde::Serialize;

// == Cache Counters ==
/// Monotonic counters, kept behind their own lock by the proxy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounters {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

impl CacheCounters {
    pub fn new() -> Self {
        Self::default()
    }

    // == Record Hit ==
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }
}

// == Cache Statistics ==
/// Point-in-time view of cache performance.
///
/// Counters and size are read under different locks, so a snapshot taken during
/// concurrent traffic may pair a size with counters from a slightly different instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CacheStatistics {
    /// Reads served from the cache
    pub hits: u64,
    /// Reads that fell through to the store
    pub misses: u64,
    /// Entries removed to make room for new ones
    pub evictions: u64,
    /// Entries currently resident, live or dead
    pub current_size: usize,
    /// Capacity limit
    pub max_size: usize,
    /// hits / (hits + misses) * 100, or 0 before any read
    pub hit_rate_percent: f64,
}

impl CacheStatistics {
    /// Builds a snapshot from counters and the sizes observed at the same call.
    pub fn new(counters: CacheCounters, current_size: usize, max_size: usize) -> Self {
        let total = counters.hits + counters.misses;
        let hit_rate_percent = if total == 0 {
            0.0
        } else {
            counters.hits as f64 / total as f64 * 100.0
        };

        Self {
            hits: counters.hits,
            misses: counters.misses,
            evictions: counters.evictions,
            current_size,
            max_size,
            hit_rate_percent,
        }
    }
}
