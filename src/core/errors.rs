//! Custom error types for translation operations

use std::time::Duration;
use thiserror::Error;

/// Translation-related errors
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Backend answered with a non-success status
    #[error("API error: {status} - {message}")]
    ApiError {
        status: u16,
        message: String,
    },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitError,

    /// Network error
    #[error("Network error: {message}")]
    NetworkError {
        message: String,
    },

    /// Invalid response from the backend
    #[error("Invalid response: {message}")]
    InvalidResponseError {
        message: String,
    },

    /// Opaque failure reported by a backend
    #[error("{0}")]
    BackendError(String),

    /// Per-item deadline elapsed before the backend answered
    #[error("translation timeout after {after:?}")]
    TimeoutError {
        after: Duration,
    },

    /// Input rejected before dispatch
    #[error("{message}")]
    InvalidInput {
        message: String,
    },

    /// A pool worker stopped without reporting this item
    #[error("Worker terminated before item {index} completed")]
    WorkerLost {
        index: usize,
    },

    /// Reqwest error
    #[error("HTTP client error: {0}")]
    HttpError(#[from] reqwest::Error),
}

impl TranslationError {
    /// Whether this error came from the per-item deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, TranslationError::TimeoutError { .. })
    }
}

/// Result type for translation operations
pub type Result<T> = std::result::Result<T, TranslationError>;
