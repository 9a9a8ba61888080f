//! Wire types shared with the backend

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A gesture label reported by the classifier
///
/// The domain is open: any string is a valid gesture, whether or not a
/// playback command is bound to it. Equality is by value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Gesture(String);

impl Gesture {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Gesture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Gesture {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for Gesture {
    fn from(label: String) -> Self {
        Self(label)
    }
}

/// Response body of `GET /gesture`
///
/// The classifier reports `null` until it has seen a hand, so the field is
/// optional and a missing value means "no gesture".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GestureStatus {
    #[serde(default)]
    pub gesture: Option<Gesture>,
}

/// Request body of `POST /exchange_token`
#[derive(Debug, Serialize, Deserialize)]
pub struct ExchangeTokenRequest {
    pub code: String,
}

/// Playback actions exposed by the command backend under `/spotify/{command}`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackCommand {
    Play,
    Pause,
    Next,
    Like,
}

impl PlaybackCommand {
    pub const ALL: [PlaybackCommand; 4] = [
        PlaybackCommand::Play,
        PlaybackCommand::Pause,
        PlaybackCommand::Next,
        PlaybackCommand::Like,
    ];

    /// Path segment of the command endpoint
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackCommand::Play => "play",
            PlaybackCommand::Pause => "pause",
            PlaybackCommand::Next => "next",
            PlaybackCommand::Like => "like",
        }
    }
}

impl fmt::Display for PlaybackCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error)]
#[error("Unknown playback command: {0}")]
pub struct ParseCommandError(String);

impl FromStr for PlaybackCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PlaybackCommand::ALL
            .into_iter()
            .find(|command| command.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseCommandError(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_gesture_status_accepts_null_and_missing() {
        let status: GestureStatus = serde_json::from_value(json!({ "gesture": null })).unwrap();
        assert_eq!(status.gesture, None);

        let status: GestureStatus = serde_json::from_value(json!({})).unwrap();
        assert_eq!(status.gesture, None);

        let status: GestureStatus = serde_json::from_value(json!({ "gesture": "spin" })).unwrap();
        assert_eq!(status.gesture, Some(Gesture::from("spin")));
    }

    #[test]
    fn test_playback_command_parsing() {
        assert_eq!("play".parse::<PlaybackCommand>().unwrap(), PlaybackCommand::Play);
        assert_eq!("NEXT".parse::<PlaybackCommand>().unwrap(), PlaybackCommand::Next);
        assert!("rewind".parse::<PlaybackCommand>().is_err());
    }

    #[test]
    fn test_exchange_request_body_shape() {
        let body = serde_json::to_value(ExchangeTokenRequest {
            code: "ABC123".to_string(),
        })
        .unwrap();
        assert_eq!(body, json!({ "code": "ABC123" }));
    }
}
