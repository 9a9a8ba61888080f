//! Gesture control handler

use super::shutdown_on_ctrl_c;
use crate::config::RemoteConfig;
use crate::error::{RemoteError, Result};
use crate::gesture::GesturePoller;
use crate::output::{print_gesture, print_info, print_success};
use std::sync::Arc;

/// Handle control command
pub async fn handle_control(config: &RemoteConfig) -> Result<()> {
    let client = Arc::new(config.backend_client()?);
    let interval = config.poll_interval();

    print_info(&format!(
        "Polling {}/gesture every {:?}",
        client.gesture_base_url(),
        interval
    ));
    print_info("Press Ctrl-C to stop");

    let poller = GesturePoller::new(client.clone(), client, config.command_map(), interval);
    let mut current = poller.subscribe();
    let shutdown = shutdown_on_ctrl_c();
    let handle = poller.spawn(shutdown.clone());

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            changed = current.changed() => {
                if changed.is_err() {
                    break;
                }
                let gesture = current.borrow_and_update().clone();
                print_gesture(gesture.as_ref());
            }
        }
    }

    handle
        .await
        .map_err(|e| RemoteError::internal(format!("Gesture poller task failed: {}", e)))?;
    print_success("Gesture control stopped");
    Ok(())
}
