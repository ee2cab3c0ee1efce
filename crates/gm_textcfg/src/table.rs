//! Table-driven bit translators.
//!
//! A [`WordTable`] describes one block layout as a list of named words, each
//! mapped to the bit offsets it occupies. Tables are read from plain text
//! files:
//!
//! ```text
//! # name          bit offsets, bit 0 of the word first
//! CPE.INIT_L00    0 1 2 3
//! CPE.C_O         40 41
//! ```
//!
//! Bit `n` of a block is bit `n % 8` of byte `n / 8`.
//!
//! [`TableTranslators`] bundles the four tables of a device, loaded from a
//! directory holding `tile.db`, `ram.db`, `config.db` and `serdes.db`.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::Path;

use gm_chip::DieGeometry;

use crate::entry_set::{ConfigEntrySet, ConfigWord, Directive};
use crate::error::{TableError, TranslateError};
use crate::translate::{BitTranslator, TranslatorSet};

#[derive(Debug, Clone, PartialEq, Eq)]
struct WordLayout {
    name: String,
    bits: Vec<usize>,
}

/// The layout of one block category as named words over bit offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordTable {
    size: usize,
    words: Vec<WordLayout>,
    index: HashMap<String, usize>,
    covered: HashSet<usize>,
}

impl WordTable {
    /// Creates a table with no words for a block of `size` bytes.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            words: Vec::new(),
            index: HashMap::new(),
            covered: HashSet::new(),
        }
    }

    /// Parses a table file for a block of `size` bytes.
    ///
    /// Empty lines and `#` comments are skipped.
    ///
    /// # Errors
    ///
    /// Returns a message prefixed with the line number if a line is
    /// malformed, a word is defined twice, or a bit lies outside the block.
    pub fn parse(content: &str, size: usize) -> Result<Self, String> {
        let mut table = WordTable::new(size);
        for (line_no, line) in content.lines().enumerate() {
            let line = match line.find('#') {
                Some(pos) => &line[..pos],
                None => line,
            };
            let mut parts = line.split_whitespace();
            let Some(name) = parts.next() else {
                continue;
            };
            let bits = parts
                .map(|p| {
                    p.parse::<usize>()
                        .map_err(|e| format!("line {}: invalid bit offset '{p}': {e}", line_no + 1))
                })
                .collect::<Result<Vec<_>, _>>()?;
            table
                .add_word(name, bits)
                .map_err(|e| format!("line {}: {e}", line_no + 1))?;
        }
        Ok(table)
    }

    /// Adds a word occupying `bits`, bit 0 of the word first.
    pub fn add_word(&mut self, name: &str, bits: Vec<usize>) -> Result<(), String> {
        if bits.is_empty() {
            return Err(format!("word '{name}' has no bit offsets"));
        }
        if self.index.contains_key(name) {
            return Err(format!("duplicate word '{name}'"));
        }
        if let Some(&bit) = bits.iter().find(|&&b| b >= self.size * 8) {
            return Err(format!(
                "word '{name}' uses bit {bit} outside a {}-byte block",
                self.size
            ));
        }
        self.covered.extend(bits.iter().copied());
        self.index.insert(name.to_string(), self.words.len());
        self.words.push(WordLayout {
            name: name.to_string(),
            bits,
        });
        Ok(())
    }

    /// Block size in bytes.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of words in the table.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns whether the table defines no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    fn set_bit(&self, data: &mut [u8], bit: usize) -> Result<(), TranslateError> {
        let byte = data.get_mut(bit / 8).ok_or(TranslateError::BitOutOfRange {
            bit,
            size: self.size,
        })?;
        *byte |= 1 << (bit % 8);
        Ok(())
    }
}

fn get_bit(data: &[u8], bit: usize) -> bool {
    data.get(bit / 8).is_some_and(|b| (b >> (bit % 8)) & 1 == 1)
}

impl BitTranslator for WordTable {
    fn encode(&self, config: &ConfigEntrySet) -> Result<Vec<u8>, TranslateError> {
        let mut data = vec![0u8; self.size];
        for entry in config.entries() {
            match entry {
                Directive::Word(word) => {
                    let layout = self
                        .index
                        .get(&word.name)
                        .map(|&i| &self.words[i])
                        .ok_or_else(|| TranslateError::UnknownWord {
                            name: word.name.clone(),
                        })?;
                    if layout.bits.len() != word.value.len() {
                        return Err(TranslateError::WidthMismatch {
                            name: word.name.clone(),
                            expected: layout.bits.len(),
                            found: word.value.len(),
                        });
                    }
                    for (&bit, &set) in layout.bits.iter().zip(&word.value) {
                        if set {
                            self.set_bit(&mut data, bit)?;
                        }
                    }
                }
                Directive::Unknown(bit) => self.set_bit(&mut data, *bit)?,
            }
        }
        Ok(data)
    }

    fn decode(&self, data: &[u8]) -> ConfigEntrySet {
        let mut config = ConfigEntrySet::new();
        for layout in &self.words {
            let value: Vec<bool> = layout.bits.iter().map(|&b| get_bit(data, b)).collect();
            if value.iter().any(|&v| v) {
                config.add_word(ConfigWord::new(layout.name.clone(), value));
            }
        }
        for bit in 0..data.len() * 8 {
            if get_bit(data, bit) && !self.covered.contains(&bit) {
                config.add_unknown(bit);
            }
        }
        config
    }
}

/// The four tables of a device, one per block category.
///
/// Every tile uses the same layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableTranslators {
    tile: WordTable,
    ram: WordTable,
    die_config: WordTable,
    serdes: WordTable,
}

impl TableTranslators {
    /// Creates translators without any words; every set bit decodes as unknown.
    pub fn empty(geometry: &DieGeometry) -> Self {
        Self {
            tile: WordTable::new(geometry.latch_block_size),
            ram: WordTable::new(geometry.ram_block_size),
            die_config: WordTable::new(geometry.die_config_size),
            serdes: WordTable::new(geometry.serdes_config_size),
        }
    }

    /// Bundles four tables.
    pub fn new(tile: WordTable, ram: WordTable, die_config: WordTable, serdes: WordTable) -> Self {
        Self {
            tile,
            ram,
            die_config,
            serdes,
        }
    }

    /// Loads `tile.db`, `ram.db`, `config.db` and `serdes.db` from `dir`.
    ///
    /// A missing file yields a table without words.
    pub fn load_dir(dir: &Path, geometry: &DieGeometry) -> Result<Self, TableError> {
        Ok(Self {
            tile: load_table(&dir.join("tile.db"), geometry.latch_block_size)?,
            ram: load_table(&dir.join("ram.db"), geometry.ram_block_size)?,
            die_config: load_table(&dir.join("config.db"), geometry.die_config_size)?,
            serdes: load_table(&dir.join("serdes.db"), geometry.serdes_config_size)?,
        })
    }

    /// Total number of words across the four tables.
    pub fn word_count(&self) -> usize {
        self.tile.len() + self.ram.len() + self.die_config.len() + self.serdes.len()
    }
}

fn load_table(path: &Path, size: usize) -> Result<WordTable, TableError> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(WordTable::new(size)),
        Err(source) => {
            return Err(TableError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    WordTable::parse(&content, size).map_err(|message| TableError::Parse {
        path: path.to_path_buf(),
        message,
    })
}

impl TranslatorSet for TableTranslators {
    fn tile(&self, _x: u32, _y: u32) -> &dyn BitTranslator {
        &self.tile
    }

    fn ram(&self) -> &dyn BitTranslator {
        &self.ram
    }

    fn die_config(&self) -> &dyn BitTranslator {
        &self.die_config
    }

    fn serdes(&self) -> &dyn BitTranslator {
        &self.serdes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
# test layout
CPE.INIT 0 1 2 3
CPE.C_O  9 8   # reversed on purpose
";

    fn table() -> WordTable {
        WordTable::parse(TABLE, 4).unwrap()
    }

    fn set(text: &str) -> ConfigEntrySet {
        let mut cur = crate::token::TokenCursor::new(text);
        ConfigEntrySet::read(&mut cur).unwrap()
    }

    #[test]
    fn parse_table() {
        let t = table();
        assert_eq!(t.len(), 2);
        assert_eq!(t.size(), 4);
        assert!(!t.is_empty());
    }

    #[test]
    fn parse_rejects_duplicates() {
        let err = WordTable::parse("A 0\nA 1\n", 1).unwrap_err();
        assert_eq!(err, "line 2: duplicate word 'A'");
    }

    #[test]
    fn parse_rejects_missing_bits() {
        let err = WordTable::parse("A\n", 1).unwrap_err();
        assert!(err.contains("no bit offsets"));
    }

    #[test]
    fn parse_rejects_bit_outside_block() {
        let err = WordTable::parse("A 8\n", 1).unwrap_err();
        assert!(err.contains("outside a 1-byte block"));
    }

    #[test]
    fn parse_rejects_non_numeric_bit() {
        assert!(WordTable::parse("A x\n", 1).unwrap_err().starts_with("line 1:"));
    }

    #[test]
    fn encode_sets_word_bits() {
        let data = table().encode(&set("CPE.INIT 1001\nCPE.C_O 10\n")).unwrap();
        assert_eq!(data, vec![0b0000_1001, 0b0000_0010, 0, 0]);
    }

    #[test]
    fn encode_unknown_bits() {
        let data = table().encode(&set("unknown: 31\n")).unwrap();
        assert_eq!(data, vec![0, 0, 0, 0x80]);
    }

    #[test]
    fn encode_errors() {
        let t = table();
        assert_eq!(
            t.encode(&set("CPE.NOPE 1\n")).unwrap_err(),
            TranslateError::UnknownWord {
                name: "CPE.NOPE".to_string()
            }
        );
        assert_eq!(
            t.encode(&set("CPE.C_O 111\n")).unwrap_err(),
            TranslateError::WidthMismatch {
                name: "CPE.C_O".to_string(),
                expected: 2,
                found: 3
            }
        );
        assert_eq!(
            t.encode(&set("unknown: 32\n")).unwrap_err(),
            TranslateError::BitOutOfRange { bit: 32, size: 4 }
        );
    }

    #[test]
    fn decode_inverts_encode() {
        let t = table();
        let config = set("CPE.INIT 0110\nCPE.C_O 01\nunknown: 20\n");
        let back = t.decode(&t.encode(&config).unwrap());
        assert_eq!(back, config);
    }

    #[test]
    fn decode_skips_zero_words() {
        let t = table();
        assert!(t.decode(&[0u8; 4]).is_empty());
        let back = t.decode(&t.encode(&set("CPE.INIT 0000\n")).unwrap());
        assert!(back.is_empty());
    }

    #[test]
    fn empty_table_decodes_everything_as_unknown() {
        let t = WordTable::new(2);
        let back = t.decode(&[0b1000_0001, 0b0000_0100]);
        assert_eq!(
            back.entries(),
            &[
                Directive::Unknown(0),
                Directive::Unknown(7),
                Directive::Unknown(10)
            ]
        );
    }

    #[test]
    fn load_dir_with_missing_files() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("tile.db"), "CPE.A 0 1\n").unwrap();
        let t = TableTranslators::load_dir(dir.path(), &DieGeometry::GATEMATE).unwrap();
        assert_eq!(t.word_count(), 1);
        assert_eq!(t.tile(5, 5).encode(&set("CPE.A 11\n")).unwrap().len(), 112);
        assert_eq!(t.serdes().encode(&ConfigEntrySet::new()).unwrap().len(), 40);
    }

    #[test]
    fn load_dir_reports_parse_errors_with_path() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("ram.db"), "RAM.A 0\nRAM.A 1\n").unwrap();
        let err = TableTranslators::load_dir(dir.path(), &DieGeometry::GATEMATE).unwrap_err();
        match err {
            TableError::Parse { path, message } => {
                assert!(path.ends_with("ram.db"));
                assert_eq!(message, "line 2: duplicate word 'RAM.A'");
            }
            other => panic!("expected parse error, got {other}"),
        }
    }
}
