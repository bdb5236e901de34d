//! Error types for the cache crate
//!
//! Provides unified error handling using thiserror. Misses, evictions,
//! and expiry are not errors: the cache reports them through return
//! values. The only cache-level failures are invalid construction
//! parameters and a non-positive TTL; `NotFound` exists solely so the
//! HTTP layer can map a miss to a 404 response.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache crate.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid construction parameters (zero capacity or zero default TTL)
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid caller-supplied argument (zero TTL on set)
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Key not found; produced by the HTTP layer, never by the cache core
    #[error("Key not found: {0}")]
    NotFound(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            CacheError::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the cache crate.
pub type Result<T> = std::result::Result<T, CacheError>;

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        let cases = vec![
            (
                CacheError::InvalidConfiguration("bad".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CacheError::InvalidArgument("bad".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (
                CacheError::NotFound("key".to_string()),
                StatusCode::NOT_FOUND,
            ),
        ];

        for (error, expected_status) in cases {
            let response = error.into_response();
            assert_eq!(response.status(), expected_status);
        }
    }

    #[test]
    fn test_error_display() {
        let err = CacheError::InvalidArgument("TTL must be a positive duration".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid argument: TTL must be a positive duration"
        );
    }
}
