//! Command handlers for the gesture remote CLI

pub mod auth;
pub mod config;
pub mod control;

use tokio_util::sync::CancellationToken;
use tracing::warn;

/// Token cancelled on the first Ctrl-C
pub(crate) fn shutdown_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl-C: {}", e);
            return;
        }
        trigger.cancel();
    });
    token
}
