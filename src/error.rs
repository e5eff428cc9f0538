//! Error types for the cache
//!
//! Provides unified error handling using thiserror.

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Producer Error ==
/// Outcome of a failed upstream computation.
///
/// One instance is cloned to every caller waiting on the same episode, so the
/// producer's own error is kept behind an `Arc`.
#[derive(Error, Debug, Clone)]
pub enum ProducerError {
    /// The producer returned an error
    #[error("producer failed: {0}")]
    Failed(Arc<anyhow::Error>),

    /// The producer panicked
    #[error("producer panicked: {0}")]
    Panicked(String),

    /// The episode ended without delivering an outcome
    #[error("producer was abandoned before completing")]
    Abandoned,
}

impl ProducerError {
    /// Wraps any error returned by a producer.
    pub fn failed(err: impl Into<anyhow::Error>) -> Self {
        ProducerError::Failed(Arc::new(err.into()))
    }
}

// == Cache Error Enum ==
/// Error type of the HTTP surface.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// The upstream fetch behind a cache miss failed
    #[error("Failed to fetch content: {0}")]
    Upstream(#[from] ProducerError),
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::Upstream(_) => StatusCode::SERVICE_UNAVAILABLE,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the HTTP surface.
pub type Result<T> = std::result::Result<T, CacheError>;
