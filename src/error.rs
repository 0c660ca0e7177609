//! Error types
//!
//! The store's `check` and `store` are infallible; errors only arise from
//! configuration and from the demo HTTP surface.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Config Error Enum ==
/// Invalid store configuration.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The sweeper needs a non-zero period for its timer
    #[error("Sweep period must be greater than zero")]
    ZeroSweepPeriod,
}

// == Api Error Enum ==
/// Errors returned by the demo HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request carried no `Idempotency-Key` header
    #[error("Missing Idempotency-Key header")]
    MissingIdempotencyKey,

    /// `Idempotency-Key` header is not a valid UUID
    #[error("Invalid Idempotency-Key: {0}")]
    InvalidIdempotencyKey(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::MissingIdempotencyKey
            | ApiError::InvalidIdempotencyKey(_)
            | ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Internal(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the demo handlers.
pub type Result<T> = std::result::Result<T, ApiError>;
