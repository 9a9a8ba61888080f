//! Mapping from gesture labels to playback commands

use gesture_sdk::{Gesture, PlaybackCommand};
use std::collections::HashMap;

/// Gesture → playback command lookup
///
/// The default binds each command to the gesture of the same name
/// (`play`, `pause`, `next`, `like`). Gestures without a binding are valid
/// but trigger nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GestureCommandMap {
    bindings: HashMap<Gesture, PlaybackCommand>,
}

impl GestureCommandMap {
    pub fn new(bindings: HashMap<Gesture, PlaybackCommand>) -> Self {
        Self { bindings }
    }

    /// Build from label/command pairs, e.g. a configuration table
    pub fn from_labels<I, S>(bindings: I) -> Self
    where
        I: IntoIterator<Item = (S, PlaybackCommand)>,
        S: Into<String>,
    {
        Self::new(
            bindings
                .into_iter()
                .map(|(label, command)| (Gesture::new(label), command))
                .collect(),
        )
    }

    pub fn command_for(&self, gesture: &Gesture) -> Option<PlaybackCommand> {
        self.bindings.get(gesture).copied()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for GestureCommandMap {
    fn default() -> Self {
        Self::from_labels(
            PlaybackCommand::ALL
                .into_iter()
                .map(|command| (command.as_str(), command)),
        )
    }
}
