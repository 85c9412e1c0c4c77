//! Circuit breaker guarding fallible operations.
//!
//! # States
//! - Closed: calls pass through
//! - Open: calls fail fast with [`BreakerError::Open`]; the operation is not invoked
//! - Half-Open: calls pass through again to probe for recovery
//!
//! # State Transitions
//! ```text
//! Closed    → Open:      failure_count >= max_failures
//! Open      → Half-Open: reset_timeout elapsed since opening (checked lazily)
//! Half-Open → Closed:    any success
//! Half-Open → Open:      failures re-accumulate to max_failures
//! ```

mod breaker;
mod config;
mod state;

pub use breaker::{BreakerError, CircuitBreaker};
pub use config::CircuitBreakerConfig;
pub use state::CircuitState;
