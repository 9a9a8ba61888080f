//! Main entry point for the gesture remote

use clap::Parser;
use clap_verbosity_flag::LevelFilter;
use color_eyre::eyre::{eyre, Result};
use gesture_remote::cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    color_eyre::config::HookBuilder::default()
        .display_location_section(false)
        .display_env_section(false)
        .install()?;

    if args.verbosity.log_level_filter() >= LevelFilter::Debug {
        std::env::set_var("RUST_LIB_BACKTRACE", "1");
    }

    gesture_common::logging::init_logging(&args.verbosity, "gesture_remote=info,gesture_sdk=info")
        .map_err(|e| eyre!("Failed to initialize logging: {}", e))?;

    Ok(args.run().await?)
}
