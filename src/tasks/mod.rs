//! Background Tasks Module
//!
//! Contains background tasks that run alongside the HTTP server.
//!
//! # Tasks
//! - Cache sweep: removes dead cache entries at configured intervals
//! - Event notifier: delivers post events to observers through a bounded queue

mod cleanup;
mod notifier;

pub use cleanup::spawn_sweep_task;
pub use notifier::{spawn_notifier, EventNotifier};
