//! Local HTTP server for the login page and OAuth callback
//!
//! Serves `GET /` (login page linking to the authorization URL) and the
//! callback route taken from the redirect URI's path. When the redirect URI
//! points at `/` itself, that one route shows the login page until the
//! identity provider redirects back with callback parameters. The listen
//! address is derived from the redirect URI's host and port unless
//! configured explicitly.

use crate::auth::{CallbackHandler, CallbackParams, LoginInitiator, CONFIRMATION_PAGE};
use crate::config::RemoteConfig;
use crate::error::{RemoteError, Result};
use axum::{
    extract::{RawQuery, State},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

/// How long a stopping server may take to finish in-flight responses
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// One callback page load
#[derive(Debug)]
pub struct CallbackEvent {
    pub params: CallbackParams,
    /// Exchange task spawned for this load, if a code was present
    pub exchange: Option<JoinHandle<()>>,
}

/// Shared state for request handlers
struct ServerState {
    login: LoginInitiator,
    callback: CallbackHandler,
    events: Option<mpsc::UnboundedSender<CallbackEvent>>,
}

/// HTTP server for the login page and callback route
pub struct CallbackServer {
    bind_address: String,
    callback_path: String,
    login: LoginInitiator,
    callback: CallbackHandler,
}

impl CallbackServer {
    pub fn new(
        bind_address: impl Into<String>,
        callback_path: impl Into<String>,
        login: LoginInitiator,
        callback: CallbackHandler,
    ) -> Self {
        Self {
            bind_address: bind_address.into(),
            callback_path: callback_path.into(),
            login,
            callback,
        }
    }

    /// Build from configuration, deriving address and route from the redirect URI
    pub fn from_config(config: &RemoteConfig, callback: CallbackHandler) -> Result<Self> {
        let (derived_address, callback_path) = split_redirect_uri(&config.spotify.redirect_uri)?;
        let bind_address = config
            .server
            .bind_address
            .clone()
            .unwrap_or(derived_address);

        Ok(Self::new(
            bind_address,
            callback_path,
            LoginInitiator::new(&config.auth_config()),
            callback,
        ))
    }

    pub fn bind_address(&self) -> &str {
        &self.bind_address
    }

    pub fn callback_path(&self) -> &str {
        &self.callback_path
    }

    pub fn login(&self) -> &LoginInitiator {
        &self.login
    }

    /// Router with the login page and callback route. Each callback is also
    /// reported on `events` when a sender is given.
    pub fn router(&self, events: Option<mpsc::UnboundedSender<CallbackEvent>>) -> Router {
        let state = Arc::new(ServerState {
            login: self.login.clone(),
            callback: self.callback.clone(),
            events,
        });

        let router = if self.callback_path == "/" {
            Router::new().route("/", get(handle_login_or_callback))
        } else {
            Router::new()
                .route("/", get(handle_login))
                .route(&self.callback_path, get(handle_callback))
        };
        router.with_state(state)
    }

    /// Bind the configured address
    pub async fn bind(&self) -> Result<TcpListener> {
        TcpListener::bind(&self.bind_address).await.map_err(|e| {
            RemoteError::Server(format!("Failed to bind to {}: {}", self.bind_address, e))
        })
    }

    /// Serve until `shutdown` is cancelled
    pub async fn serve(&self, listener: TcpListener, shutdown: CancellationToken) -> Result<()> {
        log_listening(&listener, &self.callback_path);
        serve_router(listener, self.router(None), shutdown).await
    }

    /// Serve until the first callback arrives or `timeout` elapses
    pub async fn wait_for_callback(
        &self,
        listener: TcpListener,
        timeout: Duration,
    ) -> Result<CallbackEvent> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let shutdown = CancellationToken::new();

        log_listening(&listener, &self.callback_path);
        let server = tokio::spawn(serve_router(listener, self.router(Some(tx)), shutdown.clone()));

        let result = tokio::select! {
            event = rx.recv() => event.ok_or_else(|| {
                RemoteError::Server("Callback channel closed unexpectedly".to_string())
            }),
            _ = tokio::time::sleep(timeout) => Err(RemoteError::Timeout),
        };

        shutdown.cancel();
        match tokio::time::timeout(SHUTDOWN_GRACE, server).await {
            Ok(Ok(Ok(()))) => debug!("Callback server stopped"),
            Ok(Ok(Err(e))) => warn!("Callback server failed: {}", e),
            Ok(Err(e)) => warn!("Callback server task failed: {}", e),
            Err(_) => warn!("Callback server did not stop within {:?}", SHUTDOWN_GRACE),
        }

        result
    }
}

async fn serve_router(listener: TcpListener, app: Router, shutdown: CancellationToken) -> Result<()> {
    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| RemoteError::Server(format!("Server error: {}", e)))
}

fn log_listening(listener: &TcpListener, callback_path: &str) {
    match listener.local_addr() {
        Ok(addr) => info!(
            "Login page on http://{}/ with callback route {}",
            addr, callback_path
        ),
        Err(e) => warn!("Listening on unknown address: {}", e),
    }
}

/// Split a redirect URI into a bind address (`host:port`) and route path
pub fn split_redirect_uri(redirect_uri: &str) -> Result<(String, String)> {
    let url = Url::parse(redirect_uri).map_err(|e| {
        RemoteError::Server(format!("Invalid redirect URI '{}': {}", redirect_uri, e))
    })?;
    let host = url.host_str().ok_or_else(|| {
        RemoteError::Server(format!("Redirect URI '{}' has no host", redirect_uri))
    })?;
    let port = url.port_or_known_default().ok_or_else(|| {
        RemoteError::Server(format!("Redirect URI '{}' has no port", redirect_uri))
    })?;
    Ok((format!("{}:{}", host, port), url.path().to_string()))
}

async fn handle_login(State(state): State<Arc<ServerState>>) -> Html<String> {
    Html(state.login.login_page())
}

async fn handle_callback(
    State(state): State<Arc<ServerState>>,
    RawQuery(query): RawQuery,
) -> Html<&'static str> {
    complete_callback(&state, CallbackParams::from_query(query.as_deref()))
}

/// Root route when the redirect URI is `/`
async fn handle_login_or_callback(
    State(state): State<Arc<ServerState>>,
    RawQuery(query): RawQuery,
) -> Response {
    let params = CallbackParams::from_query(query.as_deref());
    if params.is_redirect() {
        complete_callback(&state, params).into_response()
    } else {
        Html(state.login.login_page()).into_response()
    }
}

fn complete_callback(state: &ServerState, params: CallbackParams) -> Html<&'static str> {
    let exchange = state.callback.handle(&params);

    if let Some(events) = &state.events {
        let _ = events.send(CallbackEvent { params, exchange });
    }

    Html(CONFIRMATION_PAGE)
}
