//! Configuration types deserialized from `gmcfg.toml`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// The top-level tool configuration parsed from `gmcfg.toml`.
///
/// Every section is optional; an empty file is a valid configuration that
/// only knows the built-in devices.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ToolConfig {
    /// Defaults applied when a command line option is omitted.
    #[serde(default)]
    pub defaults: Defaults,
    /// Custom or overridden device profiles, keyed by device name.
    #[serde(default)]
    pub devices: BTreeMap<String, DeviceSpec>,
    /// Location of the translator tables.
    #[serde(default)]
    pub tables: TablesConfig,
}

/// The `[defaults]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Defaults {
    /// Device to assume when neither the command line nor the document names one.
    #[serde(default)]
    pub device: Option<String>,
}

/// A `[devices.<name>]` table.
///
/// A device starts from the profile named by `base`, or from the built-in
/// profile of the same name, and every field given here replaces the
/// corresponding value.
///
/// ```toml
/// [devices.CCGM1A2_EVAL]
/// base = "CCGM1A2"
/// memory_size = 4096
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeviceSpec {
    /// Built-in profile to start from.
    #[serde(default)]
    pub base: Option<String>,
    /// Number of dies in the package.
    #[serde(default)]
    pub die_count: Option<u32>,
    /// Number of tile grid columns per die.
    #[serde(default)]
    pub max_col: Option<u32>,
    /// Number of tile grid rows per die.
    #[serde(default)]
    pub max_row: Option<u32>,
    /// Number of RAM block columns per die.
    #[serde(default)]
    pub max_ram_col: Option<u32>,
    /// Number of RAM block rows per die.
    #[serde(default)]
    pub max_ram_row: Option<u32>,
    /// Tile latch block capacity in bytes.
    #[serde(default)]
    pub latch_block_size: Option<usize>,
    /// RAM configuration block capacity in bytes.
    #[serde(default)]
    pub ram_block_size: Option<usize>,
    /// RAM initial-contents capacity in bytes.
    #[serde(default)]
    pub memory_size: Option<usize>,
    /// PLL mux region capacity in bytes.
    #[serde(default)]
    pub pll_config_size: Option<usize>,
    /// Die-level configuration capacity in bytes.
    #[serde(default)]
    pub die_config_size: Option<usize>,
    /// SERDES configuration capacity in bytes.
    #[serde(default)]
    pub serdes_config_size: Option<usize>,
}

/// The `[tables]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TablesConfig {
    /// Directory holding `tile.db`, `ram.db`, `config.db` and `serdes.db`.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}
