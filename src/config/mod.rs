//! Configuration module
//!
//! Handles loading and saving client configuration.

mod schema;

pub use schema::{Config, EndpointsConfig, NetworkConfig};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the configuration directory path
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".azuriom-client")
}

/// Get the config file path
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load configuration from disk, writing the defaults on first run
pub fn load() -> Result<Config> {
    let path = config_path();

    if path.exists() {
        load_from(&path)
    } else {
        let config = Config::default();
        save(&config)?;
        Ok(config)
    }
}

/// Load configuration from a specific file
pub fn load_from(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Failed to parse config {}", path.display()))?;
    Ok(config)
}

/// Save configuration to disk
pub fn save(config: &Config) -> Result<()> {
    let path = config_path();
    let dir = config_dir();

    // Ensure config directory exists
    std::fs::create_dir_all(&dir)?;

    let content = toml::to_string_pretty(config)?;
    std::fs::write(&path, content)?;

    tracing::info!("Configuration saved to {:?}", path);
    Ok(())
}
