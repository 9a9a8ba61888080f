//! Configuration loading shared by gesture remote components
//!
//! Components describe their configuration as a serde struct with a
//! `Default` impl and implement [`ConfigLoader`] on top of a layered
//! [`Figment`]: defaults, then an optional TOML file, then environment.

use figment::Figment;
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to parse configuration: {details}")]
    ParseError { details: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },

    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Loads a configuration value of type `T`
pub trait ConfigLoader<T> {
    /// Load from the given file, or from the component's default file name if absent
    fn load(path: Option<PathBuf>) -> Result<T, ConfigurationError>;

    /// Load from a file that must exist
    fn load_from_file(path: &Path) -> Result<T, ConfigurationError> {
        if !path.exists() {
            return Err(ConfigurationError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        Self::load(Some(path.to_path_buf()))
    }
}

/// Extract a typed value from a figment, mapping errors to [`ConfigurationError`]
pub fn extract<T: DeserializeOwned>(figment: &Figment) -> Result<T, ConfigurationError> {
    figment.extract().map_err(|e| ConfigurationError::ParseError {
        details: e.to_string(),
    })
}
