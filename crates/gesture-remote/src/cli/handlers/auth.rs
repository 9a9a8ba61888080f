//! Login page and callback handlers

use super::shutdown_on_ctrl_c;
use crate::auth::CallbackHandler;
use crate::config::RemoteConfig;
use crate::error::{RemoteError, Result};
use crate::output::{print_error, print_info, print_link, print_success, print_warning};
use crate::server::CallbackServer;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

fn callback_server(config: &RemoteConfig) -> Result<CallbackServer> {
    let client = config.backend_client()?;
    debug!("Forwarding authorization codes to {}", client.exchange_base_url());
    CallbackServer::from_config(config, CallbackHandler::new(Arc::new(client)))
}

/// Handle serve command
pub async fn handle_serve(config: &RemoteConfig) -> Result<()> {
    let server = callback_server(config)?;
    let listener = server.bind().await?;

    print_link("Login page", &format!("http://{}/", listener.local_addr()?));
    print_info("Press Ctrl-C to stop");

    server.serve(listener, shutdown_on_ctrl_c()).await?;
    print_success("Server stopped");
    Ok(())
}

/// Handle login command
pub async fn handle_login(config: &RemoteConfig, open: bool, timeout_secs: u64) -> Result<()> {
    let server = callback_server(config)?;
    // Listen before the browser can redirect back
    let listener = server.bind().await?;
    let login = server.login();

    print_link("Authorize with Spotify", login.authorization_url());
    if open {
        if let Err(e) = login.open_in_browser() {
            print_warning(&e.to_string());
        }
    }
    print_info(&format!(
        "Waiting up to {}s for the callback on {}",
        timeout_secs,
        server.callback_path()
    ));

    let event = server
        .wait_for_callback(listener, Duration::from_secs(timeout_secs))
        .await?;

    if let Some(error) = &event.params.error {
        let detail = event.params.error_description.as_deref().unwrap_or(error);
        print_error(&format!("Spotify returned an error: {}", detail));
    }

    match event.exchange {
        Some(exchange) => {
            exchange.await.map_err(|e| {
                RemoteError::internal(format!("Token exchange task failed: {}", e))
            })?;
            print_success("Authorization code forwarded for token exchange");
        }
        None => print_warning("Callback carried no authorization code"),
    }

    Ok(())
}
