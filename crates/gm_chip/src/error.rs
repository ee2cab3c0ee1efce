//! Error types for block storage writes and chip addressing.

use std::fmt;

/// The category of a configuration block, used to label storage errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockKind {
    /// A tile latch block.
    Latch,
    /// A RAM configuration block.
    Ram,
    /// A RAM initial-contents block.
    RamData,
    /// The PLL mux configuration region.
    Pll,
    /// The die-level configuration buffer.
    DieConfig,
    /// The SERDES configuration buffer.
    Serdes,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Latch => "latch",
            BlockKind::Ram => "RAM",
            BlockKind::RamData => "RAM data",
            BlockKind::Pll => "PLL",
            BlockKind::DieConfig => "die config",
            BlockKind::Serdes => "SERDES",
        };
        f.write_str(name)
    }
}

/// Errors raised when writing to or addressing a [`ChipImage`](crate::ChipImage).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChipError {
    /// A payload does not fit into its fixed-capacity target block.
    #[error("{kind} block overflow: {len} byte(s) at offset {offset} exceed capacity of {capacity}")]
    BlockOverflow {
        /// The block being written.
        kind: BlockKind,
        /// Start offset of the write.
        offset: usize,
        /// Length of the rejected payload.
        len: usize,
        /// Fixed capacity of the block.
        capacity: usize,
    },

    /// A grid coordinate lies outside the die's tile or RAM grid.
    #[error("{kind} coordinate ({x}, {y}) is outside the {cols}x{rows} grid")]
    OutOfBounds {
        /// The grid being addressed.
        kind: BlockKind,
        /// Requested column.
        x: u32,
        /// Requested row.
        y: u32,
        /// Number of columns in the grid.
        cols: u32,
        /// Number of rows in the grid.
        rows: u32,
    },

    /// A die index is not present in the chip.
    #[error("die {die} does not exist (device has {die_count} die(s))")]
    NoSuchDie {
        /// Requested die index.
        die: u32,
        /// Number of dies in the device.
        die_count: u32,
    },

    /// A PLL write selected at least one unit but supplied fewer than 12 unit bytes.
    #[error("PLL select {select:#04x} needs 12 unit bytes, got {len}")]
    ShortPllData {
        /// The select mask of the write.
        select: u8,
        /// Number of bytes supplied.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_overflow() {
        let err = ChipError::BlockOverflow {
            kind: BlockKind::Latch,
            offset: 0,
            len: 120,
            capacity: 112,
        };
        assert_eq!(
            format!("{err}"),
            "latch block overflow: 120 byte(s) at offset 0 exceed capacity of 112"
        );
    }

    #[test]
    fn display_out_of_bounds() {
        let err = ChipError::OutOfBounds {
            kind: BlockKind::Ram,
            x: 4,
            y: 1,
            cols: 4,
            rows: 8,
        };
        assert_eq!(
            format!("{err}"),
            "RAM coordinate (4, 1) is outside the 4x8 grid"
        );
    }

    #[test]
    fn display_no_such_die() {
        let err = ChipError::NoSuchDie {
            die: 3,
            die_count: 2,
        };
        assert_eq!(format!("{err}"), "die 3 does not exist (device has 2 die(s))");
    }

    #[test]
    fn display_short_pll() {
        let err = ChipError::ShortPllData { select: 0x11, len: 4 };
        assert_eq!(format!("{err}"), "PLL select 0x11 needs 12 unit bytes, got 4");
    }
}
