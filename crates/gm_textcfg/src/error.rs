//! Error types for parsing, translation, and chip image conversion.

use gm_chip::{ChipError, Location};
use std::path::PathBuf;

/// Errors raised while parsing a text configuration document.
///
/// Every variant is fatal: parsing stops at the first error and no partial
/// document is returned. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// A top-level keyword is not part of the grammar.
    #[error("line {line}: unrecognised config entry '{keyword}'")]
    Format {
        /// The offending token.
        keyword: String,
        /// Line of the token.
        line: usize,
    },

    /// A record ended before a required field.
    #[error("line {line}: expected {expected}, found end of record")]
    UnexpectedEnd {
        /// Description of the missing field.
        expected: &'static str,
        /// Line where the record ended.
        line: usize,
    },

    /// A numeric field did not parse as a non-negative decimal integer.
    #[error("line {line}: invalid {what} '{token}'")]
    InvalidNumber {
        /// Description of the field.
        what: &'static str,
        /// The offending token.
        token: String,
        /// Line of the token.
        line: usize,
    },

    /// A RAM initial-contents token is not a hexadecimal byte.
    #[error("line {line}: invalid hex byte '{token}'")]
    InvalidHexByte {
        /// The offending token.
        token: String,
        /// Line of the token.
        line: usize,
    },

    /// A configuration entry line is malformed.
    #[error("line {line}: invalid config entry '{token}': {reason}")]
    InvalidEntry {
        /// The offending token.
        token: String,
        /// What is wrong with it.
        reason: &'static str,
        /// Line of the token.
        line: usize,
    },
}

/// Errors raised by a [`BitTranslator`](crate::BitTranslator) while encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslateError {
    /// The entry set names a word the block layout does not define.
    #[error("unknown config word '{name}'")]
    UnknownWord {
        /// The word name.
        name: String,
    },

    /// A bit offset lies beyond the end of the block.
    #[error("bit {bit} is outside a {size}-byte block")]
    BitOutOfRange {
        /// The offending bit offset.
        bit: usize,
        /// Block size in bytes.
        size: usize,
    },

    /// A word value has a different number of bits than its layout.
    #[error("config word '{name}' has {found} bit(s), expected {expected}")]
    WidthMismatch {
        /// The word name.
        name: String,
        /// Width defined by the layout.
        expected: usize,
        /// Width found in the entry set.
        found: usize,
    },
}

/// Errors raised while loading translator tables.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A table file could not be read.
    #[error("failed to read table {}: {source}", path.display())]
    Io {
        /// The file being read.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A table file is malformed.
    #[error("{}: {message}", path.display())]
    Parse {
        /// The file being parsed.
        path: PathBuf,
        /// Description of the problem, prefixed with its line number.
        message: String,
    },
}

/// Errors raised while converting between a document and a chip image.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    /// The document was written for a different device than the target profile.
    #[error("document targets device '{document}' but the profile is '{profile}'")]
    DeviceMismatch {
        /// Device named by the document.
        document: String,
        /// Device named by the profile.
        profile: String,
    },

    /// A sparse entry addresses a location outside the target geometry.
    #[error("{category} at {location} is outside the {device} geometry")]
    GeometryMismatch {
        /// Block category of the entry (`tile`, `bram`, `bram_init`).
        category: &'static str,
        /// The out-of-range location.
        location: Location,
        /// Target device name.
        device: String,
    },

    /// A per-die entry names a die the target device does not have.
    #[error("{category} for die {die} but {device} has {die_count} die(s)")]
    DieMismatch {
        /// Block category of the entry (`config`, `serdes`).
        category: &'static str,
        /// The requested die.
        die: u32,
        /// Target device name.
        device: String,
        /// Number of dies on the target.
        die_count: u32,
    },

    /// A translator rejected an entry set.
    #[error("cannot encode {category} {position}: {source}")]
    Translate {
        /// Block category being encoded.
        category: &'static str,
        /// Human-readable position of the block.
        position: String,
        /// The translator error.
        #[source]
        source: TranslateError,
    },

    /// The chip image rejected a write.
    #[error(transparent)]
    Chip(#[from] ChipError),
}
