//! Search Module
//!
//! Linear-scan post search guarded by a circuit breaker. When the circuit is
//! open the gateway degrades to an empty result set instead of failing.

use serde::Serialize;
use tracing::{debug, warn};

use crate::breaker::{BreakerError, CircuitBreaker, CircuitBreakerConfig, CircuitState};
use crate::error::StoreError;
use crate::models::{Post, PostFilter};
use crate::store::PostStore;

/// Default number of posts fetched per scan.
pub const DEFAULT_SCAN_LIMIT: usize = 100;

// == Search Outcome ==
/// Matches plus the breaker state observed after the call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchOutcome {
    pub results: Vec<Post>,
    pub circuit_breaker: CircuitState,
    /// True when results are a fallback because the circuit was open
    pub degraded: bool,
}

// == Search Gateway ==
pub struct SearchGateway<S> {
    store: S,
    breaker: CircuitBreaker,
    scan_limit: usize,
}

impl<S: PostStore> SearchGateway<S> {
    pub fn new(store: S, breaker_config: CircuitBreakerConfig, scan_limit: usize) -> Self {
        Self {
            store,
            breaker: CircuitBreaker::new("search", breaker_config),
            scan_limit,
        }
    }

    // == Search ==
    /// Returns posts whose title or content contains `query`, ignoring case.
    ///
    /// An open circuit yields `Ok` with no results and `degraded` set. Store
    /// failures while the circuit admits calls are returned unchanged.
    pub fn search(&self, query: &str) -> Result<SearchOutcome, StoreError> {
        let needle = query.to_lowercase();
        let filter = PostFilter::unfiltered(self.scan_limit);

        let outcome = self.breaker.execute(|| {
            let posts = self.store.find_all(&filter)?;
            Ok::<_, StoreError>(
                posts
                    .into_iter()
                    .filter(|post| post.matches_lowercase(&needle))
                    .collect::<Vec<_>>(),
            )
        });

        match outcome {
            Ok(results) => {
                debug!(query, matches = results.len(), "Search completed");
                Ok(SearchOutcome {
                    results,
                    circuit_breaker: self.breaker.state(),
                    degraded: false,
                })
            }
            Err(BreakerError::Open { .. }) => {
                warn!(query, "Search circuit open, returning fallback results");
                Ok(SearchOutcome {
                    results: Vec::new(),
                    circuit_breaker: self.breaker.state(),
                    degraded: true,
                })
            }
            Err(BreakerError::Operation(err)) => {
                warn!(query, error = %err, "Search failed");
                Err(err)
            }
        }
    }

    pub fn breaker_state(&self) -> CircuitState {
        self.breaker.state()
    }

    pub fn breaker(&self) -> &CircuitBreaker {
        &self.breaker
    }
}
