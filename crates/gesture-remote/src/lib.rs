//! # Gesture Remote
//!
//! Drives Spotify playback from hand gestures classified by an external
//! backend. Two independent flows share nothing at runtime:
//!
//! - **Auth**: [`auth::LoginInitiator`] builds the Spotify authorization URL
//!   and [`auth::CallbackHandler`] forwards the returned code to the token
//!   exchange backend. [`server`] serves both over HTTP.
//! - **Control**: [`gesture::GesturePoller`] polls the classifier on a fixed
//!   interval and dispatches a playback command whenever the gesture changes.

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod gesture;
pub mod output;
pub mod server;

pub use cli::*;
pub use error::*;
