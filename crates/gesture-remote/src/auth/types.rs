//! Authentication-related types

use super::login::SPOTIFY_AUTHORIZE_URL;

/// Client parameters for the Spotify authorization request
///
/// Built once at startup from [`crate::config::RemoteConfig`] and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Spotify application client ID
    pub client_id: String,
    /// Redirect URI registered with the Spotify application
    pub redirect_uri: String,
    /// Scopes to request, in order
    pub scopes: Vec<String>,
    /// Authorization endpoint of the identity provider
    pub authorize_endpoint: String,
}

impl AuthConfig {
    pub fn new(
        client_id: impl Into<String>,
        redirect_uri: impl Into<String>,
        scopes: Vec<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            redirect_uri: redirect_uri.into(),
            scopes,
            authorize_endpoint: SPOTIFY_AUTHORIZE_URL.to_string(),
        }
    }

    /// Scopes joined the way the `scope` parameter expects them
    pub fn scope_string(&self) -> String {
        self.scopes.join(" ")
    }
}

/// Single-use authorization code returned by the identity provider
///
/// Not `Clone`: a code is consumed by exactly one exchange request.
#[derive(Debug, PartialEq, Eq)]
pub struct AuthorizationCode(String);

impl AuthorizationCode {
    /// Wrap a raw `code` parameter. Empty values are treated as absent.
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        if code.is_empty() {
            None
        } else {
            Some(Self(code))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}
