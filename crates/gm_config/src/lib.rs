//! Parsing and validation of `gmcfg.toml` tool configuration files.
//!
//! This crate reads the configuration file and produces a strongly-typed
//! [`ToolConfig`], then resolves device names to [`ChipProfile`]s, layering
//! custom `[devices.<name>]` tables over the built-in GateMate profiles.
//!
//! [`ChipProfile`]: gm_chip::ChipProfile

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{known_profiles, resolve_profile};
pub use types::*;
