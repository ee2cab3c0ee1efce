//! Shared helpers for CLI commands.
//!
//! Configuration discovery, document input and output, and the rules for
//! picking the target device.

use std::io::Write;
use std::path::{Path, PathBuf};

use gm_config::ToolConfig;
use gm_textcfg::ChipConfiguration;

use crate::GlobalArgs;

/// Walks up from `start` looking for the nearest `gmcfg.toml`.
pub fn find_config_upwards(start: &Path) -> Option<PathBuf> {
    start.ancestors().find_map(gm_config::find_config)
}

/// Loads the tool configuration.
///
/// `--config` names the file explicitly. Otherwise the nearest `gmcfg.toml`
/// above the current directory is used, and without one the defaults apply.
pub fn load_tool_config(global: &GlobalArgs) -> Result<ToolConfig, Box<dyn std::error::Error>> {
    let path = match &global.config {
        Some(path) => Some(path.clone()),
        None => find_config_upwards(&std::env::current_dir()?),
    };
    match path {
        Some(path) => {
            global.detail(format_args!("     Config {}", path.display()));
            Ok(gm_config::load_config(&path)?)
        }
        None => Ok(ToolConfig::default()),
    }
}

/// Reads and parses a configuration document.
pub fn read_document(path: &Path) -> Result<ChipConfiguration, Box<dyn std::error::Error>> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
    let doc = ChipConfiguration::parse(&text).map_err(|e| format!("{}: {e}", path.display()))?;
    Ok(doc)
}

/// Picks the device to work with.
///
/// An explicit `--device` wins, then the `.device` line of the document,
/// then `[defaults] device` from the configuration.
pub fn device_name(
    requested: Option<&str>,
    doc: &ChipConfiguration,
    config: &ToolConfig,
) -> Result<String, Box<dyn std::error::Error>> {
    if let Some(name) = requested {
        return Ok(name.to_string());
    }
    if !doc.chip_name.is_empty() {
        return Ok(doc.chip_name.clone());
    }
    config
        .defaults
        .device
        .clone()
        .ok_or_else(|| "no device named in the document; pass --device".into())
}

/// Writes `text` to `output`, or to stdout when no path is given.
pub fn write_output(output: Option<&Path>, text: &str) -> Result<(), Box<dyn std::error::Error>> {
    match output {
        Some(path) => std::fs::write(path, text)
            .map_err(|e| format!("failed to write {}: {e}", path.display()))?,
        None => std::io::stdout().write_all(text.as_bytes())?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_config_in_parent() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(dir.path().join("gmcfg.toml"), "").unwrap();
        assert_eq!(
            find_config_upwards(&nested),
            Some(dir.path().join("gmcfg.toml"))
        );
    }

    #[test]
    fn load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[defaults]\ndevice = \"CCGM1A2\"\n").unwrap();
        let global = GlobalArgs {
            quiet: true,
            verbose: false,
            config: Some(path),
        };
        let config = load_tool_config(&global).unwrap();
        assert_eq!(config.defaults.device.as_deref(), Some("CCGM1A2"));
    }

    #[test]
    fn device_precedence() {
        let mut config = ToolConfig::default();
        config.defaults.device = Some("CCGM1A4".to_string());
        let named = ChipConfiguration::new("CCGM1A2");
        let unnamed = ChipConfiguration::default();

        assert_eq!(device_name(Some("CCGM1A1"), &named, &config).unwrap(), "CCGM1A1");
        assert_eq!(device_name(None, &named, &config).unwrap(), "CCGM1A2");
        assert_eq!(device_name(None, &unnamed, &config).unwrap(), "CCGM1A4");
        assert!(device_name(None, &unnamed, &ToolConfig::default()).is_err());
    }

    #[test]
    fn read_document_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.cfg");
        std::fs::write(&path, ".bogus 1 2 3\n").unwrap();
        let err = read_document(&path).unwrap_err().to_string();
        assert!(err.contains("bad.cfg"));
        assert!(err.contains("unrecognised config entry '.bogus'"));
    }

    #[test]
    fn write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.cfg");
        write_output(Some(&path), ".device X\n\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), ".device X\n\n");
    }
}
