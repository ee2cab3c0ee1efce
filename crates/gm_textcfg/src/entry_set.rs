//! Symbolic configuration entries of one block.
//!
//! An entry set is the body of a `.config`, `.serdes`, `.tile` or `.bram`
//! record. Each line is one directive:
//!
//! ```text
//! CPE.INIT_L00 1010      # named word, bit 0 first
//! unknown: 417           # a set bit no layout covers
//! ```

use std::fmt;

use crate::error::TextError;
use crate::token::TokenCursor;

/// Keyword introducing an unknown-bit directive.
const UNKNOWN_KEYWORD: &str = "unknown:";

/// A named, fixed-width configuration word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWord {
    /// Word name (e.g., `CPE.INIT_L00`).
    pub name: String,
    /// Bit values, bit 0 first.
    pub value: Vec<bool>,
}

impl ConfigWord {
    /// Creates a word from its name and bits.
    pub fn new(name: impl Into<String>, value: Vec<bool>) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }

    /// Creates a word from a `0`/`1` string, bit 0 first.
    pub fn from_bits(name: impl Into<String>, bits: &str) -> Option<Self> {
        Some(Self::new(name, parse_bits(bits)?))
    }

    /// Renders the value as a `0`/`1` string, bit 0 first.
    pub fn bits(&self) -> String {
        self.value.iter().map(|&b| if b { '1' } else { '0' }).collect()
    }
}

/// One line of an entry set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    /// A named word and its value.
    Word(ConfigWord),
    /// A set bit, by bit offset within the block, that no word covers.
    Unknown(usize),
}

impl fmt::Display for Directive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Directive::Word(w) => write!(f, "{} {}", w.name, w.bits()),
            Directive::Unknown(bit) => write!(f, "{UNKNOWN_KEYWORD} {bit}"),
        }
    }
}

/// An ordered collection of directives.
///
/// Words are unique by name: setting an existing word replaces its value in
/// place. Unknown bits are unique by offset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigEntrySet {
    entries: Vec<Directive>,
}

impl ConfigEntrySet {
    /// Creates an empty entry set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the set holds no directives.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of directives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns the directives in order.
    pub fn entries(&self) -> &[Directive] {
        &self.entries
    }

    /// Iterates over the named words.
    pub fn words(&self) -> impl Iterator<Item = &ConfigWord> {
        self.entries.iter().filter_map(|d| match d {
            Directive::Word(w) => Some(w),
            Directive::Unknown(_) => None,
        })
    }

    /// Returns the word called `name`.
    pub fn word(&self, name: &str) -> Option<&ConfigWord> {
        self.words().find(|w| w.name == name)
    }

    /// Sets a word, replacing any earlier word of the same name.
    pub fn add_word(&mut self, word: ConfigWord) {
        let existing = self.entries.iter_mut().find_map(|d| match d {
            Directive::Word(w) if w.name == word.name => Some(w),
            _ => None,
        });
        match existing {
            Some(w) => w.value = word.value,
            None => self.entries.push(Directive::Word(word)),
        }
    }

    /// Records an unknown set bit.
    pub fn add_unknown(&mut self, bit: usize) {
        if !self.entries.contains(&Directive::Unknown(bit)) {
            self.entries.push(Directive::Unknown(bit));
        }
    }

    /// Reads directives from `cursor` until the current record ends.
    pub fn read(cursor: &mut TokenCursor<'_>) -> Result<Self, TextError> {
        let mut set = ConfigEntrySet::new();
        while cursor.more_in_record() {
            let tok = cursor.expect("config entry")?;
            if tok.text == UNKNOWN_KEYWORD {
                let bit = cursor.expect("unknown bit offset")?;
                let offset = bit.text.parse().map_err(|_| TextError::InvalidNumber {
                    what: "unknown bit offset",
                    token: bit.text.to_string(),
                    line: bit.line,
                })?;
                set.add_unknown(offset);
                continue;
            }
            let value = cursor.expect("config word value")?;
            let word = ConfigWord::from_bits(tok.text, value.text).ok_or_else(|| {
                TextError::InvalidEntry {
                    token: value.text.to_string(),
                    reason: "word values are non-empty strings of 0 and 1",
                    line: value.line,
                }
            })?;
            set.add_word(word);
        }
        Ok(set)
    }
}

impl fmt::Display for ConfigEntrySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        Ok(())
    }
}

fn parse_bits(bits: &str) -> Option<Vec<bool>> {
    if bits.is_empty() {
        return None;
    }
    bits.chars()
        .map(|c| match c {
            '0' => Some(false),
            '1' => Some(true),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(text: &str) -> Result<ConfigEntrySet, TextError> {
        let mut cur = TokenCursor::new(text);
        ConfigEntrySet::read(&mut cur)
    }

    #[test]
    fn word_bits_render_bit0_first() {
        let w = ConfigWord::new("A", vec![true, false, false]);
        assert_eq!(w.bits(), "100");
        assert_eq!(ConfigWord::from_bits("A", "100").unwrap(), w);
    }

    #[test]
    fn from_bits_rejects_non_binary() {
        assert!(ConfigWord::from_bits("A", "10x").is_none());
        assert!(ConfigWord::from_bits("A", "").is_none());
    }

    #[test]
    fn read_until_next_keyword() {
        let mut cur = TokenCursor::new("CPE.A 01\nunknown: 7\n.tile 0 0 0\n");
        let set = ConfigEntrySet::read(&mut cur).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.word("CPE.A").unwrap().value, vec![false, true]);
        assert_eq!(set.entries()[1], Directive::Unknown(7));
        assert_eq!(cur.next_token().unwrap().text, ".tile");
    }

    #[test]
    fn read_empty_record() {
        let set = read("").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn read_missing_value() {
        let err = read("CPE.A\n").unwrap_err();
        assert!(matches!(
            err,
            TextError::UnexpectedEnd {
                expected: "config word value",
                ..
            }
        ));
    }

    #[test]
    fn read_bad_value() {
        let err = read("CPE.A 12\n").unwrap_err();
        assert!(matches!(err, TextError::InvalidEntry { line: 1, .. }));
    }

    #[test]
    fn read_bad_unknown_offset() {
        let err = read("unknown: abc\n").unwrap_err();
        assert!(matches!(
            err,
            TextError::InvalidNumber {
                what: "unknown bit offset",
                ..
            }
        ));
    }

    #[test]
    fn duplicate_word_replaces_in_place() {
        let set = read("A 1\nB 0\nA 0\n").unwrap();
        let names: Vec<_> = set.words().map(|w| w.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(set.word("A").unwrap().bits(), "0");
    }

    #[test]
    fn duplicate_unknown_is_collapsed() {
        let set = read("unknown: 3\nunknown: 3\n").unwrap();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn display_one_line_per_directive() {
        let mut set = ConfigEntrySet::new();
        set.add_word(ConfigWord::from_bits("GPIO.OE", "1").unwrap());
        set.add_unknown(42);
        assert_eq!(set.to_string(), "GPIO.OE 1\nunknown: 42\n");
        assert_eq!(read(&set.to_string()).unwrap(), set);
    }
}
