//! Device resolution: layering configured devices over the built-in profiles.

use crate::error::ConfigError;
use crate::types::{DeviceSpec, ToolConfig};
use gm_chip::{ChipProfile, DieGeometry};

/// Resolves a device name to its profile.
///
/// Configured devices take precedence over built-ins of the same name.
/// Names are compared ignoring ASCII case.
pub fn resolve_profile(config: &ToolConfig, name: &str) -> Result<ChipProfile, ConfigError> {
    if let Some((key, spec)) = config
        .devices
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
    {
        return build_profile(key, spec);
    }
    ChipProfile::builtin(name).ok_or_else(|| ConfigError::UnknownDevice(name.to_string()))
}

/// Returns every device the configuration knows about.
///
/// Built-ins come first in their usual order, replaced in place when
/// overridden, followed by the purely custom devices.
pub fn known_profiles(config: &ToolConfig) -> Result<Vec<ChipProfile>, ConfigError> {
    let mut profiles = Vec::new();
    for builtin in ChipProfile::builtins() {
        profiles.push(resolve_profile(config, &builtin.name)?);
    }
    for (name, spec) in &config.devices {
        if ChipProfile::builtin(name).is_none() {
            profiles.push(build_profile(name, spec)?);
        }
    }
    Ok(profiles)
}

/// Builds the profile described by one `[devices.<name>]` table.
pub(crate) fn build_profile(name: &str, spec: &DeviceSpec) -> Result<ChipProfile, ConfigError> {
    let base = match &spec.base {
        Some(base) => Some(
            ChipProfile::builtin(base).ok_or_else(|| ConfigError::UnknownDevice(base.clone()))?,
        ),
        None => ChipProfile::builtin(name),
    };
    let (base_dies, mut die) = match base {
        Some(profile) => (Some(profile.die_count), profile.die),
        None => (None, DieGeometry::GATEMATE),
    };
    let die_count = spec
        .die_count
        .or(base_dies)
        .ok_or_else(|| ConfigError::MissingField(format!("devices.{name}.die_count")))?;
    if die_count == 0 {
        return Err(ConfigError::ValidationError(format!(
            "device '{name}': die_count must be at least 1"
        )));
    }

    overlay(&mut die.max_col, spec.max_col);
    overlay(&mut die.max_row, spec.max_row);
    overlay(&mut die.max_ram_col, spec.max_ram_col);
    overlay(&mut die.max_ram_row, spec.max_ram_row);
    overlay(&mut die.latch_block_size, spec.latch_block_size);
    overlay(&mut die.ram_block_size, spec.ram_block_size);
    overlay(&mut die.memory_size, spec.memory_size);
    overlay(&mut die.pll_config_size, spec.pll_config_size);
    overlay(&mut die.die_config_size, spec.die_config_size);
    overlay(&mut die.serdes_config_size, spec.serdes_config_size);
    die.check()
        .map_err(|e| ConfigError::ValidationError(format!("device '{name}': {e}")))?;

    Ok(ChipProfile::new(name, die_count, die))
}

fn overlay<T: Copy>(field: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *field = v;
    }
}
