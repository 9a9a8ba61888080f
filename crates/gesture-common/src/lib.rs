//! Core shared utilities for the Spotify gesture remote
//!
//! - [`config`]: layered configuration loading and the shared [`ConfigurationError`]
//! - [`logging`]: unified `tracing` initialization for binaries

pub mod config;
pub mod logging;

pub use config::{ConfigLoader, ConfigurationError};
