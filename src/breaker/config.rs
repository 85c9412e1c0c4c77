//! Circuit breaker configuration.

use std::time::Duration;

/// Thresholds for a [`CircuitBreaker`](super::CircuitBreaker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircuitBreakerConfig {
    /// Consecutive failures that open the circuit
    pub max_failures: u32,
    /// How long the circuit stays open before admitting probe calls
    pub reset_timeout: Duration,
}

impl CircuitBreakerConfig {
    pub fn new(max_failures: u32, reset_timeout: Duration) -> Self {
        Self {
            max_failures: max_failures.max(1),
            reset_timeout,
        }
    }
}

impl Default for CircuitBreakerConfig {
    fn default() -> Self {
        Self {
            max_failures: 5,
            reset_timeout: Duration::from_secs(30),
        }
    }
}
