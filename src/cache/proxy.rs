//! Caching Proxy Module
//!
//! A [`PostStore`] wrapper that serves single-post lookups from a bounded TTL
//! cache and invalidates on writes.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use parking_lot::{Mutex, RwLock};
use tracing::debug;

use crate::cache::{CacheCounters, CacheEntry, CacheStatistics};
use crate::models::{NewPost, Post, PostFilter};
use crate::store::{PostStore, StoreResult};

// == Caching Proxy ==
/// Transparent caching layer in front of a post store.
///
/// Lookups by id are cached for `ttl`; list queries always go to the store.
/// When full, inserting a new id evicts the entry with the earliest expiry.
///
/// A lookup that misses only caches what it read if no update or delete
/// invalidated anything while the store call was in flight.
#[derive(Debug)]
pub struct CachingProxy<S> {
    /// Wrapped store
    inner: S,
    /// Cached posts keyed by id
    entries: RwLock<HashMap<i64, CacheEntry>>,
    /// Hit/miss/eviction counters, independent of `entries`
    counters: Mutex<CacheCounters>,
    /// Bumped under the `entries` write lock by every invalidation
    write_epoch: AtomicU64,
    /// Maximum number of resident entries
    max_size: usize,
    /// Lifetime of each cached entry
    ttl: Duration,
}

impl<S: PostStore> CachingProxy<S> {
    // == Constructor ==
    /// Wraps `inner` with a cache of at most `max_size` entries living `ttl` each.
    ///
    /// A `max_size` of zero disables caching; every lookup becomes a miss.
    pub fn new(inner: S, max_size: usize, ttl: Duration) -> Self {
        Self {
            inner,
            entries: RwLock::new(HashMap::with_capacity(max_size)),
            counters: Mutex::new(CacheCounters::new()),
            write_epoch: AtomicU64::new(0),
            max_size,
            ttl,
        }
    }

    /// The wrapped store.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    // == Statistics ==
    /// Returns a snapshot of counters and size.
    pub fn statistics(&self) -> CacheStatistics {
        let counters = *self.counters.lock();
        let current_size = self.entries.read().len();
        CacheStatistics::new(counters, current_size, self.max_size)
    }

    /// Number of resident entries, including expired ones not yet removed.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    // == Clear ==
    /// Drops every cached entry. Counters are kept.
    pub fn clear(&self) {
        self.entries.write().clear();
        debug!("Post cache cleared");
    }

    // == Purge Expired ==
    /// Physically removes expired entries and returns how many were dropped.
    ///
    /// Purged entries are not counted as evictions.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    // == Insert ==
    /// Caches `post` with a fresh TTL, evicting the earliest-expiring entry if full.
    ///
    /// With `read_epoch` set, the insert is skipped when an invalidation has
    /// happened since that epoch was read.
    fn insert(&self, post: Post, read_epoch: Option<u64>) {
        if self.max_size == 0 {
            return;
        }

        let id = post.id;
        let mut evicted = Vec::new();
        {
            let mut entries = self.entries.write();
            if let Some(epoch) = read_epoch {
                if self.write_epoch.load(Ordering::Acquire) != epoch {
                    debug!(post_id = id, "Skipped caching a read that raced a write");
                    return;
                }
            }
            if !entries.contains_key(&id) {
                while entries.len() >= self.max_size {
                    let victim = entries
                        .iter()
                        .min_by_key(|(_, entry)| entry.expires_at)
                        .map(|(key, _)| *key);
                    match victim {
                        Some(key) => {
                            entries.remove(&key);
                            evicted.push(key);
                        }
                        None => break,
                    }
                }
            }
            entries.insert(id, CacheEntry::new(post, self.ttl));
        }

        if !evicted.is_empty() {
            let mut counters = self.counters.lock();
            for key in &evicted {
                counters.record_eviction();
                debug!(post_id = key, "Evicted post from cache");
            }
        }
    }

    // == Invalidate ==
    fn invalidate(&self, id: i64) {
        let mut entries = self.entries.write();
        self.write_epoch.fetch_add(1, Ordering::AcqRel);
        if entries.remove(&id).is_some() {
            debug!(post_id = id, "Invalidated cached post");
        }
    }
}

impl<S: PostStore> PostStore for CachingProxy<S> {
    fn create(&self, post: NewPost) -> StoreResult<Post> {
        let created = self.inner.create(post)?;
        self.insert(created.clone(), None);
        Ok(created)
    }

    fn find_by_id(&self, id: i64) -> StoreResult<Option<Post>> {
        let cached = {
            let entries = self.entries.read();
            entries
                .get(&id)
                .filter(|entry| !entry.is_expired())
                .map(|entry| entry.value.clone())
        };

        if let Some(post) = cached {
            self.counters.lock().record_hit();
            debug!(post_id = id, "Post cache hit");
            return Ok(Some(post));
        }

        self.counters.lock().record_miss();
        debug!(post_id = id, "Post cache miss");

        let read_epoch = self.write_epoch.load(Ordering::Acquire);
        let found = self.inner.find_by_id(id)?;
        if let Some(post) = &found {
            self.insert(post.clone(), Some(read_epoch));
        }
        Ok(found)
    }

    fn find_all(&self, filter: &PostFilter) -> StoreResult<Vec<Post>> {
        self.inner.find_all(filter)
    }

    fn update(&self, post: &Post) -> StoreResult<Post> {
        let stored = self.inner.update(post)?;
        self.invalidate(post.id);
        Ok(stored)
    }

    fn delete(&self, id: i64) -> StoreResult<()> {
        self.inner.delete(id)?;
        self.invalidate(id);
        Ok(())
    }
}
