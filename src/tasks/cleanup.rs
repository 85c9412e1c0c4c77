//! Cache Sweep Task
//!
//! Background task that periodically drops expired entries from the post cache.
//! Expired entries already count as misses; sweeping only reclaims their memory.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::cache::CachingProxy;
use crate::store::PostStore;

/// Spawns a task that calls [`CachingProxy::purge_expired`] every `interval`.
///
/// The returned handle is aborted during graceful shutdown.
pub fn spawn_sweep_task<S>(proxy: Arc<CachingProxy<S>>, interval: Duration) -> JoinHandle<()>
where
    S: PostStore + 'static,
{
    tokio::spawn(async move {
        info!(
            "Starting cache sweep task with interval of {} ms",
            interval.as_millis()
        );

        loop {
            tokio::time::sleep(interval).await;

            let removed = proxy.purge_expired();

            if removed > 0 {
                info!("Cache sweep: removed {} expired entries", removed);
            } else {
                debug!("Cache sweep: no expired entries found");
            }
        }
    })
}
