use clap::Subcommand;

/// Default time `login` waits for the callback
pub const DEFAULT_LOGIN_TIMEOUT_SECS: u64 = 300;

/// Main CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the login page and OAuth callback until Ctrl-C
    Serve,

    /// Print the authorization URL and wait for one callback
    Login {
        /// Open the authorization URL in the system browser
        #[arg(long)]
        open: bool,

        /// Seconds to wait for the callback
        #[arg(long, default_value_t = DEFAULT_LOGIN_TIMEOUT_SECS)]
        timeout_secs: u64,
    },

    /// Poll for gestures and send playback commands until Ctrl-C
    Control,

    /// Print the effective configuration
    Config {
        /// Print the built-in defaults instead
        #[arg(long)]
        example: bool,
    },
}
