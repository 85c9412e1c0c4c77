//! Cache Entry Module
//!
//! Defines a cached post together with its expiry deadline.

use std::time::{Duration, Instant};

use crate::models::Post;

/// Longest lifetime an entry can be given; larger TTLs are clamped to it.
pub const MAX_ENTRY_TTL: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// A cached post and the instant after which it is treated as dead.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    /// The cached post
    pub value: Post,
    /// Deadline computed from the proxy TTL at insert time
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry that expires `ttl` from now, capped at [`MAX_ENTRY_TTL`].
    pub fn new(value: Post, ttl: Duration) -> Self {
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl.min(MAX_ENTRY_TTL))
            .unwrap_or(now);
        Self { value, expires_at }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time is greater than or equal to
    /// its deadline, so a zero TTL produces an entry that is dead on arrival.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`is_expired`](Self::is_expired) against a caller-supplied clock reading.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}
