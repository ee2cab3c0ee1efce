//! Device profiles: die count, grid dimensions, and block capacities.
//!
//! A [`ChipProfile`] is the single source of every size the storage layer
//! uses. Built-in profiles cover the GateMate CCGM1A family; custom profiles
//! are loaded from configuration files by `gm_config`.

use serde::{Deserialize, Serialize};

use crate::location::Location;
use crate::pll::PLL_SHARED_OFFSET;

/// Upper bound on the tile or RAM blocks of one die.
pub const MAX_GRID_BLOCKS: usize = 1 << 20;

/// Upper bound on the capacity of any single block, in bytes.
pub const MAX_BLOCK_BYTES: usize = 1 << 24;

/// Geometry and block capacities of a single die.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieGeometry {
    /// Number of latch-block columns in the tile grid.
    pub max_col: u32,
    /// Number of latch-block rows in the tile grid.
    pub max_row: u32,
    /// Number of RAM block columns.
    pub max_ram_col: u32,
    /// Number of RAM block rows.
    pub max_ram_row: u32,
    /// Capacity of one tile latch block in bytes.
    pub latch_block_size: usize,
    /// Capacity of one RAM configuration block in bytes.
    pub ram_block_size: usize,
    /// Capacity of one RAM initial-contents block in bytes.
    pub memory_size: usize,
    /// Capacity of the PLL mux region in bytes (eight unit slots plus shared tail).
    pub pll_config_size: usize,
    /// Capacity of the die-level configuration buffer in bytes.
    pub die_config_size: usize,
    /// Capacity of the SERDES configuration buffer in bytes.
    pub serdes_config_size: usize,
}

impl DieGeometry {
    /// Geometry of one GateMate die.
    pub const GATEMATE: DieGeometry = DieGeometry {
        max_col: 82,
        max_row: 66,
        max_ram_col: 4,
        max_ram_row: 8,
        latch_block_size: 112,
        ram_block_size: 27,
        memory_size: 5120,
        pll_config_size: 112,
        die_config_size: 20,
        serdes_config_size: 40,
    };

    /// Returns whether `(x, y)` lies inside the tile grid.
    pub fn contains_tile(&self, x: u32, y: u32) -> bool {
        x < self.max_col && y < self.max_row
    }

    /// Returns whether `(x, y)` lies inside the RAM grid.
    pub fn contains_ram(&self, x: u32, y: u32) -> bool {
        x < self.max_ram_col && y < self.max_ram_row
    }

    /// Number of tile latch blocks, or `None` if the product overflows.
    pub fn tile_count(&self) -> Option<usize> {
        (self.max_col as usize).checked_mul(self.max_row as usize)
    }

    /// Number of RAM blocks, or `None` if the product overflows.
    pub fn ram_count(&self) -> Option<usize> {
        (self.max_ram_col as usize).checked_mul(self.max_ram_row as usize)
    }

    /// Checks internal consistency, returning a description of the first problem found.
    pub fn check(&self) -> Result<(), String> {
        if self.pll_config_size < PLL_SHARED_OFFSET {
            return Err(format!(
                "pll_config_size {} is smaller than the {PLL_SHARED_OFFSET} bytes of PLL unit slots",
                self.pll_config_size
            ));
        }
        if self.max_col == 0 || self.max_row == 0 {
            return Err("tile grid must have at least one column and one row".to_string());
        }
        for (grid, count) in [("tile", self.tile_count()), ("RAM", self.ram_count())] {
            if count.map_or(true, |n| n > MAX_GRID_BLOCKS) {
                return Err(format!(
                    "{grid} grid has more than {MAX_GRID_BLOCKS} blocks per die"
                ));
            }
        }
        let capacities = [
            ("latch_block_size", self.latch_block_size),
            ("ram_block_size", self.ram_block_size),
            ("memory_size", self.memory_size),
            ("pll_config_size", self.pll_config_size),
            ("die_config_size", self.die_config_size),
            ("serdes_config_size", self.serdes_config_size),
        ];
        if let Some((field, size)) = capacities.iter().find(|(_, size)| *size > MAX_BLOCK_BYTES) {
            return Err(format!("{field} {size} exceeds {MAX_BLOCK_BYTES} bytes"));
        }
        Ok(())
    }
}

/// A named device: how many dies it has and what each die looks like.
///
/// All dies of a device share the same geometry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChipProfile {
    /// Device name as written after `.device` (e.g., "CCGM1A1").
    pub name: String,
    /// Number of dies in the package.
    pub die_count: u32,
    /// Geometry shared by every die.
    pub die: DieGeometry,
}

impl ChipProfile {
    /// Creates a profile from its parts.
    pub fn new(name: impl Into<String>, die_count: u32, die: DieGeometry) -> Self {
        Self {
            name: name.into(),
            die_count,
            die,
        }
    }

    /// Returns every built-in device profile.
    pub fn builtins() -> Vec<ChipProfile> {
        [("CCGM1A1", 1), ("CCGM1A2", 2), ("CCGM1A4", 4)]
            .into_iter()
            .map(|(name, dies)| ChipProfile::new(name, dies, DieGeometry::GATEMATE))
            .collect()
    }

    /// Looks up a built-in profile by device name, ignoring ASCII case.
    pub fn builtin(name: &str) -> Option<ChipProfile> {
        Self::builtins()
            .into_iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Returns whether `loc` addresses a tile on this device.
    pub fn contains_tile(&self, loc: Location) -> bool {
        loc.die < self.die_count && self.die.contains_tile(loc.x, loc.y)
    }

    /// Returns whether `loc` addresses a RAM block on this device.
    pub fn contains_ram(&self, loc: Location) -> bool {
        loc.die < self.die_count && self.die.contains_ram(loc.x, loc.y)
    }
}
