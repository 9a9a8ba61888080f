//! Gesture-driven playback control

pub mod bindings;
pub mod poller;
pub mod tracker;

pub use bindings::GestureCommandMap;
pub use poller::{CommandSink, GesturePoller, GestureSource, DEFAULT_POLL_INTERVAL};
pub use tracker::{GestureTracker, Observation};
