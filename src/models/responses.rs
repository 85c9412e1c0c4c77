//! Response DTOs for the post API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::breaker::CircuitState;
use crate::cache::CacheStatistics;
use crate::models::Post;
use crate::search::SearchOutcome;

/// Response body for DELETE /api/v1/posts/:id
#[derive(Debug, Clone, Serialize)]
pub struct DeleteResponse {
    /// Success message
    pub message: String,
    /// The id that was deleted
    pub id: i64,
}

impl DeleteResponse {
    pub fn new(id: i64) -> Self {
        Self {
            message: "Post deleted successfully".to_string(),
            id,
        }
    }
}

/// Response body for GET /api/v1/posts/search
#[derive(Debug, Clone, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub count: usize,
    pub results: Vec<Post>,
    /// Breaker state, lets callers tell "no matches" from degraded mode
    pub circuit_breaker: CircuitState,
    pub degraded: bool,
}

impl SearchResponse {
    pub fn new(query: impl Into<String>, outcome: SearchOutcome) -> Self {
        Self {
            query: query.into(),
            count: outcome.results.len(),
            results: outcome.results,
            circuit_breaker: outcome.circuit_breaker,
            degraded: outcome.degraded,
        }
    }
}

/// Response body for GET /api/v1/cache/stats
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    pub cache_statistics: CacheStatistics,
    pub description: String,
}

impl StatsResponse {
    pub fn new(cache_statistics: CacheStatistics) -> Self {
        Self {
            cache_statistics,
            description: "Transparent caching layer for the post store".to_string(),
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}
