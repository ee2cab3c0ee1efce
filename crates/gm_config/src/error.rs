//! Error types for configuration loading and profile resolution.

/// Errors that can occur when loading a `gmcfg.toml` or resolving a device.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// An I/O error occurred while reading `gmcfg.toml`.
    #[error("failed to read gmcfg.toml: {0}")]
    IoError(#[from] std::io::Error),

    /// The TOML content could not be parsed into devices, tables and defaults.
    #[error("invalid gmcfg.toml: {0}")]
    ParseError(String),

    /// A device name matches neither a built-in nor a configured profile.
    #[error("unknown device '{0}'")]
    UnknownDevice(String),

    /// A custom device lacks a field that no base profile supplies.
    #[error("missing device field: {0}")]
    MissingField(String),

    /// A device geometry or table setting is inconsistent.
    #[error("invalid device configuration: {0}")]
    ValidationError(String),
}
