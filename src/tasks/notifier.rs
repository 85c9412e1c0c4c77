//! Event Notifier Task
//!
//! Delivers [`PostEvent`]s to observers from a single worker fed by a bounded
//! queue. Publishers wait when the queue is full. The worker ends once every
//! [`EventNotifier`] handle is dropped and reports how many events it delivered.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::events::{Observer, PostEvent};

// == Event Notifier ==
/// Cloneable publishing handle for the notifier worker.
#[derive(Debug, Clone)]
pub struct EventNotifier {
    sender: mpsc::Sender<PostEvent>,
}

impl EventNotifier {
    /// Queues `event` for delivery, waiting for room if the queue is full.
    pub async fn notify(&self, event: PostEvent) {
        let kind = event.kind;
        let post_id = event.post_id;
        if self.sender.send(event).await.is_err() {
            warn!(post_id, kind = %kind, "Event notifier stopped, dropping event");
        }
    }
}

/// Spawns the notifier worker with a queue of `capacity` events.
///
/// Returns the publishing handle and the worker's join handle, which resolves to
/// the number of delivered events after all publishing handles are dropped.
pub fn spawn_notifier(
    observers: Vec<Arc<dyn Observer>>,
    capacity: usize,
) -> (EventNotifier, JoinHandle<u64>) {
    let (sender, mut receiver) = mpsc::channel::<PostEvent>(capacity.max(1));

    let handle = tokio::spawn(async move {
        info!(
            "Starting event notifier with {} observers, queue capacity {}",
            observers.len(),
            capacity.max(1)
        );

        let mut delivered = 0u64;
        while let Some(event) = receiver.recv().await {
            for observer in &observers {
                if let Err(err) = observer.on_event(&event) {
                    warn!(post_id = event.post_id, error = %err, "Error notifying observer");
                }
            }
            delivered += 1;
            debug!(post_id = event.post_id, kind = %event.kind, "Event delivered");
        }

        info!("Event notifier drained after {} events", delivered);
        delivered
    });

    (EventNotifier { sender }, handle)
}
