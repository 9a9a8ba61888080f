//! Error types for the gesture remote

use color_eyre::eyre::Report;
use thiserror::Error;

/// Application error type with minimal variants
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Configuration file issues
    #[error("Configuration error: {0}")]
    Config(#[from] gesture_common::ConfigurationError),

    /// Backend communication errors
    #[error("API error: {0}")]
    Api(#[from] gesture_sdk::ApiError),

    /// Login/callback HTTP server failures
    #[error("Callback server error: {0}")]
    Server(String),

    /// No callback arrived before the login timeout
    #[error("Timed out waiting for the Spotify callback")]
    Timeout,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Everything else (using color-eyre's Report for rich errors)
    #[error(transparent)]
    Internal(#[from] Report),
}

impl RemoteError {
    /// Create an internal error from a message
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(Report::msg(message.into()))
    }
}

/// Result type alias for gesture remote operations
pub type Result<T> = std::result::Result<T, RemoteError>;
