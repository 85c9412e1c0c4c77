//! Post Events Module
//!
//! Events emitted after successful writes, and the observers that react to them.
//! Delivery is handled by the notifier task in [`crate::tasks`].

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::models::Post;

// == Event Kind ==
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    PostCreated,
    PostUpdated,
    PostDeleted,
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EventKind::PostCreated => "post_created",
            EventKind::PostUpdated => "post_updated",
            EventKind::PostDeleted => "post_deleted",
        };
        f.write_str(name)
    }
}

// == Post Event ==
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostEvent {
    pub kind: EventKind,
    pub post_id: i64,
    /// Post as written; absent for deletions
    pub post: Option<Post>,
}

impl PostEvent {
    pub fn created(post: Post) -> Self {
        Self {
            kind: EventKind::PostCreated,
            post_id: post.id,
            post: Some(post),
        }
    }

    pub fn updated(post: Post) -> Self {
        Self {
            kind: EventKind::PostUpdated,
            post_id: post.id,
            post: Some(post),
        }
    }

    pub fn deleted(post_id: i64) -> Self {
        Self {
            kind: EventKind::PostDeleted,
            post_id,
            post: None,
        }
    }
}

// == Observer ==
/// Failure reported by an observer. Logged by the notifier, never propagated.
#[derive(Error, Debug)]
#[error("observer '{observer}' failed: {message}")]
pub struct ObserverError {
    pub observer: &'static str,
    pub message: String,
}

/// Reacts to post events.
pub trait Observer: Send + Sync {
    fn name(&self) -> &'static str;

    fn on_event(&self, event: &PostEvent) -> Result<(), ObserverError>;
}

/// Keeps the search index in step with writes.
#[derive(Debug, Default)]
pub struct SearchIndexObserver;

impl Observer for SearchIndexObserver {
    fn name(&self) -> &'static str {
        "search_index"
    }

    fn on_event(&self, event: &PostEvent) -> Result<(), ObserverError> {
        info!(post_id = event.post_id, kind = %event.kind, "Updating search index");
        Ok(())
    }
}

/// Sends subscriber notifications.
#[derive(Debug, Default)]
pub struct NotificationObserver;

impl Observer for NotificationObserver {
    fn name(&self) -> &'static str {
        "notification"
    }

    fn on_event(&self, event: &PostEvent) -> Result<(), ObserverError> {
        info!(post_id = event.post_id, kind = %event.kind, "Sending notification");
        Ok(())
    }
}

/// Records write activity for analytics.
#[derive(Debug, Default)]
pub struct AnalyticsObserver;

impl Observer for AnalyticsObserver {
    fn name(&self) -> &'static str {
        "analytics"
    }

    fn on_event(&self, event: &PostEvent) -> Result<(), ObserverError> {
        info!(post_id = event.post_id, kind = %event.kind, "Tracking analytics");
        Ok(())
    }
}
