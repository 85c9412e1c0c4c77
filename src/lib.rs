//! Post Gateway - blog post API with a resilient access layer
//!
//! Serves posts through a bounded TTL caching proxy and guards search with a
//! circuit breaker that degrades to empty results while open.

pub mod api;
pub mod breaker;
pub mod cache;
pub mod config;
pub mod error;
pub mod events;
pub mod models;
pub mod search;
pub mod store;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::{spawn_notifier, spawn_sweep_task};
