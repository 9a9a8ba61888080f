//! # Gesture SDK
//!
//! Typed client for the local backend that sits between the gesture
//! classifier and Spotify:
//!
//! - `POST /exchange_token` forwards an OAuth authorization code
//! - `GET /gesture` reports the most recently classified gesture
//! - `POST /spotify/{command}` triggers a playback action

pub mod client;
pub mod error;
pub mod types;

pub use client::{BackendClient, ClientBuilder, DEFAULT_BACKEND_URL};
pub use error::{ApiError, Result};
pub use reqwest::StatusCode;
pub use types::{ExchangeTokenRequest, Gesture, GestureStatus, ParseCommandError, PlaybackCommand};
