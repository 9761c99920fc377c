//! Error types for the repository cache
//!
//! Store-level failures are typed here. The router swallows them (logging
//! only); the HTTP layer maps the rest onto status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the repository cache.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Owner or repository name failed validation
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// No entry cached for the key
    #[error("Not cached: {0}")]
    NotFound(String),

    /// Remote store unreachable or returned an error
    #[error("Remote store error: {0}")]
    Remote(#[from] redis::RedisError),

    /// Local file store I/O failure
    #[error("File store error: {0}")]
    Io(#[from] std::io::Error),

    /// Payload could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Anything else, including probe timeouts
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidKey(_) => StatusCode::BAD_REQUEST,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::Remote(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::Serialization(_) => StatusCode::UNPROCESSABLE_ENTITY,
            CacheError::Io(_) | CacheError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the repository cache.
pub type Result<T> = std::result::Result<T, CacheError>;
