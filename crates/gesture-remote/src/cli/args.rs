use crate::cli::{commands::Commands, handlers};
use crate::config::RemoteConfig;
use crate::error::Result;
use crate::output::print_warning;
use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use gesture_common::ConfigLoader;
use std::path::PathBuf;

/// Gesture Remote - Spotify login helper and hand-gesture playback control
#[derive(Parser, Debug)]
#[command(
    name = "gesture-remote",
    version,
    about = "Spotify login helper and hand-gesture playback control",
    long_about = "Control Spotify playback with hand gestures.

QUICK START:
  gesture-remote login --open       # Authorize with Spotify
  gesture-remote control            # Map gestures to playback commands

OTHER:
  gesture-remote serve              # Keep the login page running
  gesture-remote config             # Show effective configuration"
)]
pub struct Args {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

impl Args {
    /// Execute the CLI command
    pub async fn run(self) -> Result<()> {
        let config = load_config(self.config)?;

        match self.command {
            Commands::Serve => handlers::auth::handle_serve(&config).await,
            Commands::Login { open, timeout_secs } => {
                handlers::auth::handle_login(&config, open, timeout_secs).await
            }
            Commands::Control => handlers::control::handle_control(&config).await,
            Commands::Config { example } => handlers::config::handle_config(&config, example),
        }
    }
}

/// Load from an explicit file when given, otherwise from the layered defaults
fn load_config(path: Option<PathBuf>) -> Result<RemoteConfig> {
    let config = match path {
        Some(path) => RemoteConfig::load_from_file(&path)?,
        None => RemoteConfig::load(None)?,
    };

    for warning in config.validate()? {
        print_warning(&warning);
    }

    Ok(config)
}
