//! Spotify authorization code flow
//!
//! The flow has three steps, only the first two of which happen here:
//! 1. [`LoginInitiator`] presents the authorization URL for the user to follow
//! 2. [`CallbackHandler`] receives the redirect and forwards the code
//! 3. The external backend exchanges the code for tokens

pub mod callback;
pub mod login;
pub mod types;

pub use callback::{CallbackHandler, CallbackParams, TokenExchange, CONFIRMATION_PAGE};
pub use login::{build_authorization_url, LoginInitiator, SPOTIFY_AUTHORIZE_URL};
pub use types::{AuthConfig, AuthorizationCode};
