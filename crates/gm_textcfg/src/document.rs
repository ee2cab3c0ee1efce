//! The symbolic chip configuration document and its text grammar.

use std::collections::BTreeMap;
use std::fmt::{self, Write};
use std::str::FromStr;

use gm_chip::Location;
use serde::Serialize;

use crate::entry_set::ConfigEntrySet;
use crate::error::TextError;
use crate::token::TokenCursor;

/// Number of RAM initial-contents bytes written per line.
const BRAM_BYTES_PER_LINE: usize = 40;

/// A complete symbolic device configuration.
///
/// `tiles`, `brams` and `bram_data` are sparse: a location without
/// configuration has no entry at all, never an empty one. `configs` and
/// `serdes` hold one entry set per die and may hold empty sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChipConfiguration {
    /// Device name written after `.device`.
    pub chip_name: String,
    /// Die-level configuration, by die index.
    pub configs: BTreeMap<u32, ConfigEntrySet>,
    /// SERDES configuration, by die index.
    pub serdes: BTreeMap<u32, ConfigEntrySet>,
    /// Tile configuration, by location.
    pub tiles: BTreeMap<Location, ConfigEntrySet>,
    /// RAM block configuration, by location.
    pub brams: BTreeMap<Location, ConfigEntrySet>,
    /// RAM initial contents, by location.
    pub bram_data: BTreeMap<Location, Vec<u8>>,
}

/// Entry counts of a document, as reported by `gmcfg check`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentStats {
    /// Device name.
    pub device: String,
    /// Number of dies with a `.config` record.
    pub configs: usize,
    /// Number of dies with a `.serdes` record.
    pub serdes: usize,
    /// Number of configured tiles.
    pub tiles: usize,
    /// Number of configured RAM blocks.
    pub brams: usize,
    /// Number of RAM blocks with initial contents.
    pub bram_inits: usize,
    /// Total RAM initial-contents bytes.
    pub bram_init_bytes: usize,
}

impl ChipConfiguration {
    /// Creates an empty document for the named device.
    pub fn new(chip_name: impl Into<String>) -> Self {
        Self {
            chip_name: chip_name.into(),
            ..Self::default()
        }
    }

    /// Sets the configuration of a tile; an empty set removes it.
    pub fn set_tile(&mut self, loc: Location, config: ConfigEntrySet) {
        insert_sparse(&mut self.tiles, loc, config);
    }

    /// Sets the configuration of a RAM block; an empty set removes it.
    pub fn set_bram(&mut self, loc: Location, config: ConfigEntrySet) {
        insert_sparse(&mut self.brams, loc, config);
    }

    /// Sets the initial contents of a RAM block; an empty payload removes it.
    pub fn set_bram_data(&mut self, loc: Location, data: Vec<u8>) {
        if data.is_empty() {
            self.bram_data.remove(&loc);
        } else {
            self.bram_data.insert(loc, data);
        }
    }

    /// Parses a document from its text form.
    ///
    /// Records may appear in any order. A repeated `.config`, `.serdes`,
    /// `.tile` or `.bram` record replaces the earlier one; repeated
    /// `.bram_init` records for one location append.
    pub fn parse(text: &str) -> Result<Self, TextError> {
        let mut cursor = TokenCursor::new(text);
        let mut cc = ChipConfiguration::default();
        while cursor.more_input() {
            let Some(verb) = cursor.next_token() else {
                break;
            };
            match verb.text {
                ".device" => {
                    cc.chip_name = cursor.expect("device name")?.text.to_string();
                }
                ".config" => {
                    let die = cursor.expect_u32("die index")?;
                    cc.configs.insert(die, ConfigEntrySet::read(&mut cursor)?);
                }
                ".serdes" => {
                    let die = cursor.expect_u32("die index")?;
                    cc.serdes.insert(die, ConfigEntrySet::read(&mut cursor)?);
                }
                ".tile" => {
                    let loc = read_location(&mut cursor)?;
                    let config = ConfigEntrySet::read(&mut cursor)?;
                    cc.set_tile(loc, config);
                }
                ".bram" => {
                    let loc = read_location(&mut cursor)?;
                    let config = ConfigEntrySet::read(&mut cursor)?;
                    cc.set_bram(loc, config);
                }
                ".bram_init" => {
                    let loc = read_location(&mut cursor)?;
                    let mut bytes = Vec::new();
                    while cursor.more_in_record() {
                        let tok = cursor.expect("hex byte")?;
                        let value = tok
                            .text
                            .bytes()
                            .all(|b| b.is_ascii_hexdigit())
                            .then(|| u8::from_str_radix(tok.text, 16).ok())
                            .flatten()
                            .ok_or_else(|| TextError::InvalidHexByte {
                                token: tok.text.to_string(),
                                line: tok.line,
                            })?;
                        bytes.push(value);
                    }
                    if !bytes.is_empty() {
                        cc.bram_data.entry(loc).or_default().extend(bytes);
                    }
                }
                other => {
                    return Err(TextError::Format {
                        keyword: other.to_string(),
                        line: verb.line,
                    });
                }
            }
        }
        Ok(cc)
    }

    /// Renders the document in canonical text form.
    ///
    /// Records are emitted in a fixed order (device, configs, SERDES, tiles,
    /// RAM blocks, RAM contents), each followed by a blank line. Empty entry
    /// sets and payloads are skipped, as is the device line of an unnamed
    /// document.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        // Writing to a String cannot fail.
        let _ = self.write_text(&mut out);
        out
    }

    fn write_text(&self, out: &mut impl Write) -> fmt::Result {
        if !self.chip_name.is_empty() {
            writeln!(out, ".device {}", self.chip_name)?;
            writeln!(out)?;
        }
        for (die, config) in &self.configs {
            if !config.is_empty() {
                write!(out, ".config {die}\n{config}\n")?;
            }
        }
        for (die, config) in &self.serdes {
            if !config.is_empty() {
                write!(out, ".serdes {die}\n{config}\n")?;
            }
        }
        for (loc, config) in &self.tiles {
            if !config.is_empty() {
                write!(out, ".tile {loc}\n{config}\n")?;
            }
        }
        for (loc, config) in &self.brams {
            if !config.is_empty() {
                write!(out, ".bram {loc}\n{config}\n")?;
            }
        }
        for (loc, data) in &self.bram_data {
            if !data.is_empty() {
                writeln!(out, ".bram_init {loc}")?;
                write_hex_bytes(out, data)?;
                writeln!(out)?;
            }
        }
        Ok(())
    }

    /// Counts the records of this document.
    pub fn stats(&self) -> DocumentStats {
        DocumentStats {
            device: self.chip_name.clone(),
            configs: self.configs.values().filter(|c| !c.is_empty()).count(),
            serdes: self.serdes.values().filter(|c| !c.is_empty()).count(),
            tiles: self.tiles.len(),
            brams: self.brams.len(),
            bram_inits: self.bram_data.len(),
            bram_init_bytes: self.bram_data.values().map(Vec::len).sum(),
        }
    }
}

impl FromStr for ChipConfiguration {
    type Err = TextError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ChipConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_text(f)
    }
}

fn insert_sparse(map: &mut BTreeMap<Location, ConfigEntrySet>, loc: Location, config: ConfigEntrySet) {
    if config.is_empty() {
        map.remove(&loc);
    } else {
        map.insert(loc, config);
    }
}

fn read_location(cursor: &mut TokenCursor<'_>) -> Result<Location, TextError> {
    let die = cursor.expect_u32("die index")?;
    let x = cursor.expect_u32("column")?;
    let y = cursor.expect_u32("row")?;
    Ok(Location::new(die, x, y))
}

/// Writes lowercase two-digit hex bytes, 40 to a line, each line newline-terminated.
fn write_hex_bytes(out: &mut impl Write, data: &[u8]) -> fmt::Result {
    for (i, byte) in data.iter().enumerate() {
        if i > 0 {
            let sep = if i % BRAM_BYTES_PER_LINE == 0 { '\n' } else { ' ' };
            out.write_char(sep)?;
        }
        write!(out, "{byte:02x}")?;
    }
    writeln!(out)
}
