//! Change detection over successive gesture readings

use super::bindings::GestureCommandMap;
use gesture_sdk::{Gesture, PlaybackCommand};

/// Result of feeding one reading into a [`GestureTracker`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Observation {
    /// Same value as the stored gesture; nothing to do
    Unchanged,
    /// The stored gesture was replaced
    Changed {
        gesture: Option<Gesture>,
        /// Command bound to the new gesture, if any
        command: Option<PlaybackCommand>,
    },
}

/// Holds the last known gesture and decides when a command is due
///
/// The initial state is "none set", which compares equal to a backend
/// reporting no gesture. The first real gesture is therefore always a change.
#[derive(Debug, Clone)]
pub struct GestureTracker {
    last: Option<Gesture>,
    commands: GestureCommandMap,
}

impl GestureTracker {
    pub fn new(commands: GestureCommandMap) -> Self {
        Self {
            last: None,
            commands,
        }
    }

    pub fn current(&self) -> Option<&Gesture> {
        self.last.as_ref()
    }

    pub fn observe(&mut self, gesture: Option<Gesture>) -> Observation {
        if gesture == self.last {
            return Observation::Unchanged;
        }

        let command = gesture
            .as_ref()
            .and_then(|gesture| self.commands.command_for(gesture));
        self.last = gesture.clone();

        Observation::Changed { gesture, command }
    }
}
