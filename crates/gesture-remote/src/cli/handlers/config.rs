//! Configuration display handler

use crate::config::RemoteConfig;
use crate::error::Result;

/// Handle config command
pub fn handle_config(config: &RemoteConfig, example: bool) -> Result<()> {
    let rendered = if example {
        RemoteConfig::generate_example()?
    } else {
        config.to_toml()?
    };
    print!("{}", rendered);
    Ok(())
}
