//! Per-die configuration block storage.
//!
//! A [`Die`] owns every configuration byte of one die. Tile latch blocks,
//! RAM configuration blocks and RAM contents are allocated lazily: a block
//! has length zero until its first write, and "empty" for those blocks
//! means exactly that. The PLL region, die configuration and SERDES
//! configuration exist at full size from the start, and the PLL slots are
//! empty when all of their bytes are zero.

use crate::error::{BlockKind, ChipError};
use crate::pll::{selected_offsets, PLL_SHARED_OFFSET, PLL_SLOTS, PLL_UNIT_BYTES};
use crate::profile::DieGeometry;

/// Configuration storage for one die.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Die {
    geometry: DieGeometry,
    latch: Vec<Vec<u8>>,
    ram: Vec<Vec<u8>>,
    ram_data: Vec<Vec<u8>>,
    pll: Vec<u8>,
    die_config: Vec<u8>,
    serdes_config: Vec<u8>,
}

impl Die {
    /// Creates an empty die with the given geometry.
    pub fn new(geometry: DieGeometry) -> Self {
        // Geometries that fail `DieGeometry::check` by overflowing get no grid blocks.
        let tiles = geometry.tile_count().unwrap_or(0);
        let rams = geometry.ram_count().unwrap_or(0);
        Self {
            latch: vec![Vec::new(); tiles],
            ram: vec![Vec::new(); rams],
            ram_data: vec![Vec::new(); rams],
            pll: vec![0; geometry.pll_config_size],
            die_config: vec![0; geometry.die_config_size],
            serdes_config: vec![0; geometry.serdes_config_size],
            geometry,
        }
    }

    /// Returns the geometry this die was created with.
    pub fn geometry(&self) -> &DieGeometry {
        &self.geometry
    }

    /// Number of tile grid columns.
    pub fn max_col(&self) -> u32 {
        self.geometry.max_col
    }

    /// Number of tile grid rows.
    pub fn max_row(&self) -> u32 {
        self.geometry.max_row
    }

    /// Number of RAM grid columns.
    pub fn max_ram_col(&self) -> u32 {
        self.geometry.max_ram_col
    }

    /// Number of RAM grid rows.
    pub fn max_ram_row(&self) -> u32 {
        self.geometry.max_ram_row
    }

    fn tile_index(&self, x: u32, y: u32) -> Result<usize, ChipError> {
        self.geometry
            .contains_tile(x, y)
            .then(|| grid_index(x, y, self.geometry.max_col, self.latch.len()))
            .flatten()
            .ok_or(ChipError::OutOfBounds {
                kind: BlockKind::Latch,
                x,
                y,
                cols: self.geometry.max_col,
                rows: self.geometry.max_row,
            })
    }

    fn ram_index(&self, kind: BlockKind, x: u32, y: u32) -> Result<usize, ChipError> {
        self.geometry
            .contains_ram(x, y)
            .then(|| grid_index(x, y, self.geometry.max_ram_col, self.ram.len()))
            .flatten()
            .ok_or(ChipError::OutOfBounds {
                kind,
                x,
                y,
                cols: self.geometry.max_ram_col,
                rows: self.geometry.max_ram_row,
            })
    }

    /// Returns whether the latch block at `(x, y)` has never been written.
    pub fn is_latch_empty(&self, x: u32, y: u32) -> Result<bool, ChipError> {
        Ok(self.latch[self.tile_index(x, y)?].is_empty())
    }

    /// Returns whether the RAM configuration block at `(x, y)` has never been written.
    pub fn is_ram_empty(&self, x: u32, y: u32) -> Result<bool, ChipError> {
        Ok(self.ram[self.ram_index(BlockKind::Ram, x, y)?].is_empty())
    }

    /// Returns whether the RAM contents block at `(x, y)` has never been written.
    ///
    /// A block written with all-zero bytes is not empty.
    pub fn is_ram_data_empty(&self, x: u32, y: u32) -> Result<bool, ChipError> {
        Ok(self.ram_data[self.ram_index(BlockKind::RamData, x, y)?].is_empty())
    }

    /// Returns the latch block at `(x, y)`; zero-length if never written.
    pub fn latch_config(&self, x: u32, y: u32) -> Result<&[u8], ChipError> {
        Ok(&self.latch[self.tile_index(x, y)?])
    }

    /// Returns the RAM configuration block at `(x, y)`; zero-length if never written.
    pub fn ram_config(&self, x: u32, y: u32) -> Result<&[u8], ChipError> {
        Ok(&self.ram[self.ram_index(BlockKind::Ram, x, y)?])
    }

    /// Returns the RAM contents block at `(x, y)`; zero-length if never written.
    pub fn ram_data(&self, x: u32, y: u32) -> Result<&[u8], ChipError> {
        Ok(&self.ram_data[self.ram_index(BlockKind::RamData, x, y)?])
    }

    /// Returns the whole PLL mux region.
    pub fn pll_config(&self) -> &[u8] {
        &self.pll
    }

    /// Returns the die-level configuration buffer.
    pub fn die_config(&self) -> &[u8] {
        &self.die_config
    }

    /// Returns the SERDES configuration buffer.
    pub fn serdes_config(&self) -> &[u8] {
        &self.serdes_config
    }

    /// Returns whether every byte of PLL slot `index` (0..8) is zero.
    ///
    /// Slots outside the region report empty.
    pub fn is_pll_slot_empty(&self, index: usize) -> bool {
        if index >= PLL_SLOTS {
            return true;
        }
        let pos = index * PLL_UNIT_BYTES;
        self.pll
            .get(pos..pos + PLL_UNIT_BYTES)
            .map_or(true, |slot| slot.iter().all(|&b| b == 0))
    }

    /// Returns whether every byte of the PLL region, shared tail included, is zero.
    pub fn is_pll_empty(&self) -> bool {
        self.pll.iter().all(|&b| b == 0)
    }

    /// Overwrites the latch block at `(x, y)`.
    ///
    /// The block is reset to its full capacity and zero-filled before `data`
    /// is copied in at offset 0, so nothing of a previous write survives.
    pub fn write_latch(&mut self, x: u32, y: u32, data: &[u8]) -> Result<(), ChipError> {
        let idx = self.tile_index(x, y)?;
        let capacity = self.geometry.latch_block_size;
        overwrite_block(&mut self.latch[idx], BlockKind::Latch, capacity, data)
    }

    /// Overwrites the RAM configuration block at `(x, y)`.
    ///
    /// Same semantics as [`write_latch`](Self::write_latch).
    pub fn write_ram(&mut self, x: u32, y: u32, data: &[u8]) -> Result<(), ChipError> {
        let idx = self.ram_index(BlockKind::Ram, x, y)?;
        let capacity = self.geometry.ram_block_size;
        overwrite_block(&mut self.ram[idx], BlockKind::Ram, capacity, data)
    }

    /// Writes `data` into the RAM contents block at `(x, y)` starting at `address`.
    ///
    /// The first write allocates the full, zero-filled block. Bytes outside
    /// `address..address + data.len()` keep their previous value.
    pub fn write_ram_data(
        &mut self,
        x: u32,
        y: u32,
        data: &[u8],
        address: usize,
    ) -> Result<(), ChipError> {
        let idx = self.ram_index(BlockKind::RamData, x, y)?;
        let capacity = self.geometry.memory_size;
        check_fits(BlockKind::RamData, address, data.len(), capacity)?;
        let block = &mut self.ram_data[idx];
        if block.len() != capacity {
            block.resize(capacity, 0);
        }
        block[address..address + data.len()].copy_from_slice(data);
        Ok(())
    }

    /// Writes PLL unit settings selected by `select`.
    ///
    /// The first 12 bytes of `data` are copied into every sub-slot chosen by
    /// the mask (see [`selected_offsets`]). Anything from byte 12 onward is
    /// copied into the shared region after the eight slots. Nothing is
    /// written unless the whole request fits.
    pub fn write_pll_select(&mut self, select: u8, data: &[u8]) -> Result<(), ChipError> {
        let capacity = self.pll.len();
        let offsets: Vec<usize> = selected_offsets(select).collect();
        if !offsets.is_empty() && data.len() < PLL_UNIT_BYTES {
            return Err(ChipError::ShortPllData {
                select,
                len: data.len(),
            });
        }
        let tail = data.get(PLL_UNIT_BYTES..).unwrap_or(&[]);
        for &pos in &offsets {
            check_fits(BlockKind::Pll, pos, PLL_UNIT_BYTES, capacity)?;
        }
        check_fits(BlockKind::Pll, PLL_SHARED_OFFSET, tail.len(), capacity)?;

        for pos in offsets {
            self.pll[pos..pos + PLL_UNIT_BYTES].copy_from_slice(&data[..PLL_UNIT_BYTES]);
        }
        self.pll[PLL_SHARED_OFFSET..PLL_SHARED_OFFSET + tail.len()].copy_from_slice(tail);
        Ok(())
    }

    /// Overwrites the die-level configuration buffer, zero-filling past `data`.
    pub fn write_die_config(&mut self, data: &[u8]) -> Result<(), ChipError> {
        let capacity = self.geometry.die_config_size;
        overwrite_block(&mut self.die_config, BlockKind::DieConfig, capacity, data)
    }

    /// Overwrites the SERDES configuration buffer, zero-filling past `data`.
    pub fn write_serdes_config(&mut self, data: &[u8]) -> Result<(), ChipError> {
        let capacity = self.geometry.serdes_config_size;
        overwrite_block(&mut self.serdes_config, BlockKind::Serdes, capacity, data)
    }
}

/// Row-major index of `(x, y)`, if it lands inside a grid of `len` blocks.
fn grid_index(x: u32, y: u32, cols: u32, len: usize) -> Option<usize> {
    (y as usize)
        .checked_mul(cols as usize)?
        .checked_add(x as usize)
        .filter(|&idx| idx < len)
}

fn check_fits(kind: BlockKind, offset: usize, len: usize, capacity: usize) -> Result<(), ChipError> {
    match offset.checked_add(len) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(ChipError::BlockOverflow {
            kind,
            offset,
            len,
            capacity,
        }),
    }
}

fn overwrite_block(
    block: &mut Vec<u8>,
    kind: BlockKind,
    capacity: usize,
    data: &[u8],
) -> Result<(), ChipError> {
    check_fits(kind, 0, data.len(), capacity)?;
    block.clear();
    block.resize(capacity, 0);
    block[..data.len()].copy_from_slice(data);
    Ok(())
}
