//! Traits connecting symbolic entry sets to raw block bytes.

use crate::entry_set::ConfigEntrySet;
use crate::error::TranslateError;

/// Converts the entry set of one block category to and from raw bytes.
///
/// `encode` may return fewer bytes than the block holds; the storage layer
/// zero-fills the rest. `decode` must accept a full-size block.
pub trait BitTranslator {
    /// Encodes an entry set into block bytes.
    fn encode(&self, config: &ConfigEntrySet) -> Result<Vec<u8>, TranslateError>;

    /// Decodes block bytes into an entry set.
    fn decode(&self, data: &[u8]) -> ConfigEntrySet;
}

/// Supplies the translator for each block category of a device.
///
/// Tile layouts differ by tile kind, so the tile translator is chosen per
/// coordinate; the other three categories have one layout per device.
pub trait TranslatorSet {
    /// Returns the translator for the tile latch block at `(x, y)`.
    fn tile(&self, x: u32, y: u32) -> &dyn BitTranslator;

    /// Returns the translator for RAM configuration blocks.
    fn ram(&self) -> &dyn BitTranslator;

    /// Returns the translator for the die-level configuration buffer.
    fn die_config(&self) -> &dyn BitTranslator;

    /// Returns the translator for the SERDES configuration buffer.
    fn serdes(&self) -> &dyn BitTranslator;
}
