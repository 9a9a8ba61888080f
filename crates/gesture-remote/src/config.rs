//! Configuration for the gesture remote
//!
//! Loaded once at startup and passed by reference to the components that
//! need it. Sources, lowest priority first:
//! 1. Built-in defaults
//! 2. TOML file (`--config`, or `gesture-remote.toml` if present)
//! 3. `SPOTIFY_CLIENT_ID`, `SPOTIFY_REDIRECT_URI`, `SPOTIFY_SCOPES`
//! 4. `GESTURE_REMOTE_*` variables, `__` separating sections
//!    (e.g. `GESTURE_REMOTE_BACKEND__BASE_URL`)

use crate::auth::{AuthConfig, SPOTIFY_AUTHORIZE_URL};
use crate::gesture::{GestureCommandMap, DEFAULT_POLL_INTERVAL};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use gesture_common::config::extract;
use gesture_common::{ConfigLoader, ConfigurationError};
use gesture_sdk::{BackendClient, ClientBuilder, PlaybackCommand, DEFAULT_BACKEND_URL};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;

/// Config file looked up in the working directory when `--config` is not given
pub const DEFAULT_CONFIG_FILE: &str = "gesture-remote.toml";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct RemoteConfig {
    /// Spotify application settings
    #[serde(default)]
    pub spotify: SpotifyConfig,

    /// Backend endpoints
    #[serde(default)]
    pub backend: BackendConfig,

    /// Gesture polling
    #[serde(default)]
    pub poller: PollerConfig,

    /// Gesture → command bindings
    #[serde(default)]
    pub gestures: GestureConfig,

    /// Login/callback HTTP server
    #[serde(default)]
    pub server: ServerConfig,
}

/// Spotify application settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpotifyConfig {
    /// Spotify client ID; digits-only values from the environment are kept as text
    #[serde(deserialize_with = "deserialize_text")]
    pub client_id: String,

    /// Redirect URI registered with the Spotify application
    pub redirect_uri: String,

    /// Requested scopes; a space-delimited string is also accepted
    #[serde(deserialize_with = "deserialize_scopes")]
    pub scopes: Vec<String>,

    /// Authorization endpoint
    pub authorize_endpoint: String,
}

impl Default for SpotifyConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            redirect_uri: "http://127.0.0.1:3000/callback".to_string(),
            scopes: vec![
                "user-read-playback-state".to_string(),
                "user-modify-playback-state".to_string(),
                "user-library-modify".to_string(),
            ],
            authorize_endpoint: SPOTIFY_AUTHORIZE_URL.to_string(),
        }
    }
}

/// Backend endpoint settings
///
/// Each service falls back to `base_url` unless overridden.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BackendConfig {
    pub base_url: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gesture_base_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command_base_url: Option<String>,

    /// Per-request timeout; requests wait indefinitely when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// TCP connect timeout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BACKEND_URL.to_string(),
            exchange_base_url: None,
            gesture_base_url: None,
            command_base_url: None,
            request_timeout_secs: None,
            connect_timeout_secs: None,
        }
    }
}

/// Gesture polling settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollerConfig {
    /// Milliseconds between polls
    pub interval_ms: u64,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            interval_ms: DEFAULT_POLL_INTERVAL.as_millis() as u64,
        }
    }
}

/// Gesture label → playback command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GestureConfig {
    pub bindings: BTreeMap<String, PlaybackCommand>,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            bindings: PlaybackCommand::ALL
                .into_iter()
                .map(|command| (command.as_str().to_string(), command))
                .collect(),
        }
    }
}

/// Login/callback HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct ServerConfig {
    /// Listen address; derived from the redirect URI when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bind_address: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScopeList {
    Delimited(String),
    List(Vec<String>),
}

fn deserialize_scopes<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match ScopeList::deserialize(deserializer)? {
        ScopeList::Delimited(scopes) => scopes.split_whitespace().map(str::to_string).collect(),
        ScopeList::List(scopes) => scopes,
    })
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Text {
    String(String),
    Unsigned(u64),
    Signed(i64),
    Float(f64),
}

fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Text::deserialize(deserializer)? {
        Text::String(text) => text,
        Text::Unsigned(value) => value.to_string(),
        Text::Signed(value) => value.to_string(),
        Text::Float(value) => value.to_string(),
    })
}

impl RemoteConfig {
    /// Layered figment for the given (or default) config file
    pub fn figment(path: Option<PathBuf>) -> Figment {
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE));

        Figment::from(Serialized::defaults(RemoteConfig::default()))
            .merge(Toml::file(path))
            .merge(Env::prefixed("SPOTIFY_").map(|key| format!("spotify.{}", key.as_str()).into()))
            .merge(Env::prefixed("GESTURE_REMOTE_").split("__"))
    }

    /// Generate example configuration file
    pub fn generate_example() -> Result<String, ConfigurationError> {
        Self::default().to_toml()
    }

    /// Render as TOML
    pub fn to_toml(&self) -> Result<String, ConfigurationError> {
        toml::to_string_pretty(self).map_err(|e| ConfigurationError::ParseError {
            details: format!("Failed to serialize config: {e}"),
        })
    }

    /// Reject values the program cannot run with and return warnings for
    /// values that will only fail later, at the identity provider
    pub fn validate(&self) -> Result<Vec<String>, ConfigurationError> {
        if self.poller.interval_ms == 0 {
            return Err(ConfigurationError::InvalidValue {
                key: "poller.interval_ms".to_string(),
                reason: "must be greater than 0".to_string(),
            });
        }

        let mut warnings = Vec::new();
        if self.spotify.client_id.trim().is_empty() {
            warnings.push("spotify.client_id is empty; set SPOTIFY_CLIENT_ID".to_string());
        }
        if self.spotify.scopes.is_empty() {
            warnings.push("spotify.scopes is empty; playback control needs scopes".to_string());
        }
        if self.command_map().is_empty() {
            warnings.push("gestures.bindings is empty; no gesture will send a command".to_string());
        }
        if let Err(e) = url::Url::parse(&self.spotify.redirect_uri) {
            warnings.push(format!(
                "spotify.redirect_uri '{}' is not a valid URL: {e}",
                self.spotify.redirect_uri
            ));
        }
        Ok(warnings)
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            client_id: self.spotify.client_id.clone(),
            redirect_uri: self.spotify.redirect_uri.clone(),
            scopes: self.spotify.scopes.clone(),
            authorize_endpoint: self.spotify.authorize_endpoint.clone(),
        }
    }

    pub fn backend_client(&self) -> gesture_sdk::Result<BackendClient> {
        let backend = &self.backend;
        let mut builder = ClientBuilder::new().base_url(&backend.base_url);

        if let Some(url) = &backend.exchange_base_url {
            builder = builder.exchange_base_url(url);
        }
        if let Some(url) = &backend.gesture_base_url {
            builder = builder.gesture_base_url(url);
        }
        if let Some(url) = &backend.command_base_url {
            builder = builder.command_base_url(url);
        }
        if let Some(secs) = backend.request_timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = backend.connect_timeout_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        builder.build()
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poller.interval_ms)
    }

    pub fn command_map(&self) -> GestureCommandMap {
        GestureCommandMap::from_labels(
            self.gestures
                .bindings
                .iter()
                .map(|(label, command)| (label.clone(), *command)),
        )
    }
}

impl ConfigLoader<RemoteConfig> for RemoteConfig {
    fn load(path: Option<PathBuf>) -> Result<RemoteConfig, ConfigurationError> {
        extract(&Self::figment(path))
    }
}
