//! Authorization callback handling
//!
//! The callback forwards the authorization code to the token exchange
//! backend as a best-effort, at-most-once send. The outcome is logged and
//! otherwise discarded; the confirmation page is shown regardless.

use super::types::AuthorizationCode;
use async_trait::async_trait;
use gesture_sdk::BackendClient;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// Page rendered for every callback, whether or not the exchange succeeds
pub const CONFIRMATION_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Spotify Gesture Controller</title>
</head>
<body style="text-align: center; margin-top: 20vh; font-family: sans-serif;">
    <h2>&#x2705; You're now logged in with Spotify!</h2>
    <p>You may now close this tab.</p>
</body>
</html>
"#;

/// Destination of an authorization code
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Forward the code for exchange. Consumes it: codes are single-use.
    async fn exchange(&self, code: AuthorizationCode) -> gesture_sdk::Result<()>;
}

#[async_trait]
impl TokenExchange for BackendClient {
    async fn exchange(&self, code: AuthorizationCode) -> gesture_sdk::Result<()> {
        self.exchange_token(code.as_str()).await
    }
}

/// Query parameters of the redirect back from the identity provider
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

impl CallbackParams {
    /// Parse a raw query string (without the leading `?`)
    ///
    /// When a parameter repeats, the first occurrence wins.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut params = Self::default();
        let Some(query) = query else {
            return params;
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "code" => &mut params.code,
                "state" => &mut params.state,
                "error" => &mut params.error,
                "error_description" => &mut params.error_description,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into_owned());
            }
        }
        params
    }

    /// Whether the query carries any parameter the identity provider sets
    /// on its redirect back
    pub fn is_redirect(&self) -> bool {
        self.code.is_some() || self.state.is_some() || self.error.is_some()
    }

    /// The authorization code, if one was returned
    pub fn authorization_code(&self) -> Option<AuthorizationCode> {
        self.code.clone().and_then(AuthorizationCode::new)
    }
}

/// Forwards the authorization code from a callback to the token exchange
#[derive(Clone)]
pub struct CallbackHandler {
    exchange: Arc<dyn TokenExchange>,
}

impl CallbackHandler {
    pub fn new(exchange: Arc<dyn TokenExchange>) -> Self {
        Self { exchange }
    }

    /// Handle one callback page load
    ///
    /// Returns the spawned exchange task, or `None` when there was no code
    /// to forward. Callers are free to drop the handle.
    pub fn handle(&self, params: &CallbackParams) -> Option<JoinHandle<()>> {
        if let Some(error) = &params.error {
            warn!(
                "Identity provider returned error '{}': {}",
                error,
                params.error_description.as_deref().unwrap_or("no description")
            );
        }

        let Some(code) = params.authorization_code() else {
            debug!("Callback carried no authorization code; skipping exchange");
            return None;
        };

        let exchange = Arc::clone(&self.exchange);
        Some(tokio::spawn(async move {
            match exchange.exchange(code).await {
                Ok(()) => info!("Authorization code sent to token exchange backend"),
                Err(e) => error!("Token exchange failed: {}", e),
            }
        }))
    }
}
