//! Configuration commands.

use std::path::Path;

use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};

/// Dump the current configuration to stdout.
pub fn dump(config: &ClientConfig, path: &Path) -> ClientResult<()> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| ClientError::Config(format!("failed to serialize config: {}", e)))?;
    println!("# config.toml ({})", path.display());
    println!("{}", toml_str);

    Ok(())
}

/// Validate the configuration.
pub fn validate(config: &ClientConfig) -> ClientResult<()> {
    config.validate().map_err(ClientError::Config)?;

    if config.audio.player.is_none() {
        println!("Music is disabled ([audio] has no player).");
    }
    println!("Configuration is valid.");
    Ok(())
}

/// Show the configuration file path in use.
pub fn path(path: &Path) -> ClientResult<()> {
    let note = if path.exists() { "" } else { " (not found, using defaults)" };
    println!("config: {}{}", path.display(), note);
    Ok(())
}
