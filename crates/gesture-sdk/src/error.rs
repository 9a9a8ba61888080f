//! Error types for backend communication

use reqwest::StatusCode;
use thiserror::Error;

/// Result type alias for backend operations
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by [`crate::BackendClient`]
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure, or a response body that could not be decoded
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// The backend answered with a non-2xx status
    #[error("Backend returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// A configured base URL could not be parsed
    #[error("Invalid URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl ApiError {
    /// Status code of the failed response, if the backend answered at all
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::HttpClient(e) => e.status(),
            ApiError::InvalidUrl { .. } => None,
        }
    }
}
