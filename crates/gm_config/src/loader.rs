//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::resolve::{build_profile, resolve_profile};
use crate::types::ToolConfig;
use std::path::{Path, PathBuf};

/// File name looked up by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "gmcfg.toml";

/// Returns `<dir>/gmcfg.toml` if that file exists.
pub fn find_config(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(CONFIG_FILE_NAME);
    path.is_file().then_some(path)
}

/// Loads and validates a configuration file.
///
/// A relative `[tables] dir` is resolved against the directory holding the
/// file, so the configuration works from any working directory.
pub fn load_config(path: &Path) -> Result<ToolConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let mut config = load_config_from_str(&content)?;
    if let (Some(dir), Some(parent)) = (config.tables.dir.as_mut(), path.parent()) {
        if dir.is_relative() {
            *dir = parent.join(&*dir);
        }
    }
    Ok(config)
}

/// Parses and validates a configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ToolConfig, ConfigError> {
    let config: ToolConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that every configured device resolves to a consistent profile.
fn validate_config(config: &ToolConfig) -> Result<(), ConfigError> {
    for (name, spec) in &config.devices {
        if name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "device names must not be empty".to_string(),
            ));
        }
        build_profile(name, spec)?;
    }
    if let Some(device) = &config.defaults.device {
        resolve_profile(config, device)?;
    }
    if config
        .tables
        .dir
        .as_ref()
        .is_some_and(|d| d.as_os_str().is_empty())
    {
        return Err(ConfigError::ValidationError(
            "tables.dir must not be empty".to_string(),
        ));
    }
    Ok(())
}
