//! Textual chip configuration documents and their binary counterpart.
//!
//! A [`ChipConfiguration`] is the symbolic view of a device configuration:
//! per-die global and SERDES entry sets plus sparse, location-keyed entry
//! sets for tiles and RAM blocks and raw RAM initial contents. This crate
//! reads and writes the line-oriented text form of that document and
//! converts it to and from a [`ChipImage`](gm_chip::ChipImage) through a
//! [`TranslatorSet`] of per-block [`BitTranslator`]s.
//!
//! # Format
//!
//! ```text
//! .device CCGM1A1
//!
//! .config 0
//! GPIO.BANK_S1 1
//!
//! .tile 0 12 34
//! CPE.INIT_L00 1010
//! unknown: 77
//!
//! .bram_init 0 1 2
//! 00 0a ff
//! ```

#![warn(missing_docs)]

pub mod document;
pub mod entry_set;
pub mod error;
pub mod table;
pub mod token;
pub mod transform;
pub mod translate;

pub use document::{ChipConfiguration, DocumentStats};
pub use entry_set::{ConfigEntrySet, ConfigWord, Directive};
pub use error::{TableError, TextError, TransformError, TranslateError};
pub use table::{TableTranslators, WordTable};
pub use token::{Token, TokenCursor};
pub use transform::{from_chip_image, geometry_issues, to_chip_image, validate_geometry};
pub use translate::{BitTranslator, TranslatorSet};
