//! Error types for yta-server
//!
//! [`LookupError`] is the only fault raised by the lookup pipeline.
//! [`ApiError`] is what HTTP handlers return; it never exposes storage details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::lookup::store::StoreError;

/// Lookup pipeline failure
#[derive(Debug, Error)]
pub enum LookupError {
    /// The catalog store reported a failure
    #[error("Database query failed for term: {term}, reading: {reading}")]
    StorageFailure {
        term: String,
        reading: String,
        #[source]
        source: StoreError,
    },
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Required server setting missing (503)
    #[error("Not configured: {0}")]
    NotConfigured(String),

    /// Lookup failed (500, details withheld)
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::NotConfigured(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "NOT_CONFIGURED", msg)
            }
            ApiError::Lookup(LookupError::StorageFailure { .. }) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "DATABASE_ERROR",
                "Database query failed".to_string(),
            ),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
