//! Circuit breaker state machine.

use std::time::Instant;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, info, warn};

use super::{CircuitBreakerConfig, CircuitState};

// == Breaker Error ==
/// Outcome of a rejected or failed guarded call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BreakerError<E> {
    /// The circuit is open; the operation was not invoked
    #[error("circuit breaker '{name}' is open")]
    Open { name: String },

    /// The operation ran and failed
    #[error("{0}")]
    Operation(E),
}

impl<E> BreakerError<E> {
    pub fn is_open(&self) -> bool {
        matches!(self, BreakerError::Open { .. })
    }
}

#[derive(Debug)]
struct BreakerInner {
    state: CircuitState,
    failure_count: u32,
    last_failure_time: Option<Instant>,
    opened_at: Option<Instant>,
}

// == Circuit Breaker ==
/// Guards one family of fallible operations.
///
/// The guarded closure runs without the state lock held; its outcome is recorded
/// against whatever state is current once it returns. The cooldown is evaluated
/// lazily: any call or accessor observing an Open circuit whose `reset_timeout`
/// has elapsed moves it to Half-Open.
#[derive(Debug)]
pub struct CircuitBreaker {
    name: String,
    config: CircuitBreakerConfig,
    inner: Mutex<BreakerInner>,
}

impl CircuitBreaker {
    pub fn new(name: impl Into<String>, config: CircuitBreakerConfig) -> Self {
        Self {
            name: name.into(),
            config,
            inner: Mutex::new(BreakerInner {
                state: CircuitState::Closed,
                failure_count: 0,
                last_failure_time: None,
                opened_at: None,
            }),
        }
    }

    // == Execute ==
    /// Runs `operation` unless the circuit is open.
    pub fn execute<T, E, F>(&self, operation: F) -> Result<T, BreakerError<E>>
    where
        F: FnOnce() -> Result<T, E>,
    {
        {
            let mut inner = self.inner.lock();
            self.refresh(&mut inner, Instant::now());
            if !inner.state.admits_calls() {
                debug!(breaker = %self.name, "Rejected call, circuit open");
                return Err(BreakerError::Open {
                    name: self.name.clone(),
                });
            }
        }

        match operation() {
            Ok(value) => {
                self.record_success();
                Ok(value)
            }
            Err(err) => {
                self.record_failure();
                Err(BreakerError::Operation(err))
            }
        }
    }

    // == Accessors ==
    pub fn state(&self) -> CircuitState {
        let mut inner = self.inner.lock();
        self.refresh(&mut inner, Instant::now());
        inner.state
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn failure_count(&self) -> u32 {
        let mut inner = self.inner.lock();
        self.refresh(&mut inner, Instant::now());
        inner.failure_count
    }

    pub fn last_failure_time(&self) -> Option<Instant> {
        self.inner.lock().last_failure_time
    }

    // == Outcome Recording ==
    fn record_success(&self) {
        let mut inner = self.inner.lock();
        self.refresh(&mut inner, Instant::now());
        if inner.state != CircuitState::Closed {
            info!(breaker = %self.name, from = %inner.state, "Circuit closed");
        }
        inner.state = CircuitState::Closed;
        inner.failure_count = 0;
        inner.opened_at = None;
    }

    fn record_failure(&self) {
        let now = Instant::now();
        let mut inner = self.inner.lock();
        self.refresh(&mut inner, now);
        inner.failure_count = inner.failure_count.saturating_add(1);
        inner.last_failure_time = Some(now);

        // A failure landing while already open keeps the original cooldown
        if inner.failure_count >= self.config.max_failures && inner.state != CircuitState::Open {
            warn!(
                breaker = %self.name,
                failures = inner.failure_count,
                reset_timeout = ?self.config.reset_timeout,
                "Circuit opened"
            );
            inner.state = CircuitState::Open;
            inner.opened_at = Some(now);
        }
    }

    /// Moves an Open circuit to Half-Open once its cooldown has elapsed.
    fn refresh(&self, inner: &mut BreakerInner, now: Instant) {
        if inner.state != CircuitState::Open {
            return;
        }
        let cooled_down = inner
            .opened_at
            .map_or(true, |opened| now.saturating_duration_since(opened) >= self.config.reset_timeout);
        if cooled_down {
            inner.state = CircuitState::HalfOpen;
            inner.failure_count = 0;
            inner.opened_at = None;
            info!(breaker = %self.name, "Circuit half-open, admitting probe calls");
        }
    }
}
