//! Authorization URL construction and the login page

use super::types::AuthConfig;
use crate::error::{RemoteError, Result};
use tracing::debug;

/// Spotify's authorization endpoint
pub const SPOTIFY_AUTHORIZE_URL: &str = "https://accounts.spotify.com/authorize";

/// Build the authorization code request URL
///
/// Every parameter value is percent-encoded. No validation happens here: an
/// empty client ID simply produces a URL the identity provider will reject.
pub fn build_authorization_url(config: &AuthConfig) -> String {
    format!(
        "{}?client_id={}&response_type=code&redirect_uri={}&scope={}",
        config.authorize_endpoint,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(&config.scope_string()),
    )
}

/// Presents the authorization URL as a user-activated navigation target
#[derive(Debug, Clone)]
pub struct LoginInitiator {
    authorization_url: String,
}

impl LoginInitiator {
    pub fn new(config: &AuthConfig) -> Self {
        debug!(
            "Building authorization URL for client_id: {}",
            config.client_id
        );
        Self {
            authorization_url: build_authorization_url(config),
        }
    }

    pub fn authorization_url(&self) -> &str {
        &self.authorization_url
    }

    /// Open the authorization URL in the system browser
    pub fn open_in_browser(&self) -> Result<()> {
        webbrowser::open(&self.authorization_url)
            .map_err(|e| RemoteError::internal(format!("Failed to open browser: {e}")))
    }

    /// Static login page with a single link to the authorization URL
    pub fn login_page(&self) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Spotify Gesture Controller</title>
</head>
<body style="text-align: center; margin-top: 20vh; font-family: sans-serif;">
    <h1>Spotify Gesture Controller</h1>
    <a href="{}"><button style="padding: 10px 20px; font-size: 16px;">Login with Spotify</button></a>
</body>
</html>
"#,
            escape_attribute(&self.authorization_url)
        )
    }
}

fn escape_attribute(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
