//! Error types for the post gateway
//!
//! Storage failures, API failures and their HTTP mapping, built on thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Store Error ==
/// Failure reported by a post store. Passed through the caching proxy unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No post with the given id exists
    #[error("Post not found: {0}")]
    NotFound(i64),

    /// The backing store cannot serve requests right now
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Any other storage failure
    #[error("Store failure: {0}")]
    Internal(String),
}

// == Api Error ==
/// Error type returned by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Requested post does not exist
    #[error("Post not found: {0}")]
    NotFound(i64),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Search failed while the circuit was not open
    #[error("Search service temporarily unavailable")]
    SearchUnavailable { circuit_breaker: String },

    /// Storage layer failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        match self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, Json(json!({ "error": message }))),
            ApiError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": message })))
            }
            ApiError::SearchUnavailable { circuit_breaker } => (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({ "error": message, "circuit_breaker": circuit_breaker })),
            ),
            ApiError::Store(StoreError::NotFound(_)) => {
                (StatusCode::NOT_FOUND, Json(json!({ "error": message })))
            }
            ApiError::Store(StoreError::Unavailable(_)) => {
                (StatusCode::SERVICE_UNAVAILABLE, Json(json!({ "error": message })))
            }
            ApiError::Store(StoreError::Internal(_)) => {
                (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "error": message })))
            }
        }
        .into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
