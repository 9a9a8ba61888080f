//! HTTP client for the gesture backend
//!
//! The backend exposes three concerns which may live behind different base
//! URLs: token exchange, gesture status, and playback commands. Each falls
//! back to the shared base URL when not set explicitly.
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use gesture_sdk::{ClientBuilder, PlaybackCommand};
//!
//! # async fn example() -> gesture_sdk::Result<()> {
//! let client = ClientBuilder::default()
//!     .base_url("http://127.0.0.1:5000")
//!     .build()?;
//!
//! if let Some(gesture) = client.current_gesture().await? {
//!     println!("classifier sees {gesture}");
//! }
//! client.send_command(PlaybackCommand::Pause).await?;
//! # Ok(())
//! # }
//! ```

use crate::error::{ApiError, Result};
use crate::types::{ExchangeTokenRequest, Gesture, GestureStatus, PlaybackCommand};
use reqwest::Response;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Default backend URL when not specified
pub const DEFAULT_BACKEND_URL: &str = "http://127.0.0.1:5000";

/// HTTP client for the token exchange, gesture and playback command endpoints
#[derive(Debug, Clone)]
pub struct BackendClient {
    http_client: reqwest::Client,
    exchange_base_url: String,
    gesture_base_url: String,
    command_base_url: String,
}

impl BackendClient {
    /// Forward an authorization code to `POST /exchange_token`
    ///
    /// Only the status is inspected; the response body is ignored.
    pub async fn exchange_token(&self, code: &str) -> Result<()> {
        let url = format!("{}/exchange_token", self.exchange_base_url);
        debug!("Posting authorization code to {}", url);

        let request = ExchangeTokenRequest {
            code: code.to_string(),
        };
        let response = self.http_client.post(&url).json(&request).send().await?;
        Self::ensure_success(response).await.map(drop)
    }

    /// Fetch the classifier's current gesture from `GET /gesture`
    pub async fn current_gesture(&self) -> Result<Option<Gesture>> {
        let url = format!("{}/gesture", self.gesture_base_url);
        let response = self.http_client.get(&url).send().await?;
        let status: GestureStatus = Self::ensure_success(response).await?.json().await?;
        Ok(status.gesture)
    }

    /// Trigger a playback action via `POST /spotify/{command}` with no body
    pub async fn send_command(&self, command: PlaybackCommand) -> Result<()> {
        let url = format!("{}/spotify/{}", self.command_base_url, command.as_str());
        debug!("Dispatching playback command to {}", url);

        let response = self.http_client.post(&url).send().await?;
        Self::ensure_success(response).await.map(drop)
    }

    pub fn exchange_base_url(&self) -> &str {
        &self.exchange_base_url
    }

    pub fn gesture_base_url(&self) -> &str {
        &self.gesture_base_url
    }

    pub fn command_base_url(&self) -> &str {
        &self.command_base_url
    }

    /// Turn a non-2xx response into [`ApiError::Status`]
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, body })
    }
}

/// Builder for constructing a BackendClient with custom configuration
#[derive(Debug, Default)]
pub struct ClientBuilder {
    base_url: Option<String>,
    exchange_base_url: Option<String>,
    gesture_base_url: Option<String>,
    command_base_url: Option<String>,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
}

impl ClientBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL shared by all endpoints
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the base URL of the token exchange endpoint
    pub fn exchange_base_url(mut self, url: impl Into<String>) -> Self {
        self.exchange_base_url = Some(url.into());
        self
    }

    /// Override the base URL of the gesture status endpoint
    pub fn gesture_base_url(mut self, url: impl Into<String>) -> Self {
        self.gesture_base_url = Some(url.into());
        self
    }

    /// Override the base URL of the playback command endpoints
    pub fn command_base_url(mut self, url: impl Into<String>) -> Self {
        self.command_base_url = Some(url.into());
        self
    }

    /// Set the request timeout. Requests never time out unless this is set.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Build the client
    pub fn build(self) -> Result<BackendClient> {
        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let resolve = |url: Option<String>| normalize_base_url(url.as_deref().unwrap_or(&base_url));
        let exchange_base_url = resolve(self.exchange_base_url)?;
        let gesture_base_url = resolve(self.gesture_base_url)?;
        let command_base_url = resolve(self.command_base_url)?;

        let mut http_client = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            http_client = http_client.timeout(timeout);
        }
        if let Some(timeout) = self.connect_timeout {
            http_client = http_client.connect_timeout(timeout);
        }

        Ok(BackendClient {
            http_client: http_client.build()?,
            exchange_base_url,
            gesture_base_url,
            command_base_url,
        })
    }
}

/// Validate a base URL and strip any trailing slash so paths can be appended
fn normalize_base_url(url: &str) -> Result<String> {
    Url::parse(url).map_err(|e| ApiError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(url.trim_end_matches('/').to_string())
}
