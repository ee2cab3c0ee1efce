//! Binary configuration storage for multi-die GateMate FPGAs.
//!
//! This crate holds the physical side of a chip configuration: one [`Die`]
//! per die, each owning fixed-capacity byte blocks for tile latches, RAM
//! configuration, RAM initial contents, PLL mux settings, and the die-level
//! and SERDES configuration words. A [`ChipImage`] bundles the dies of one
//! device together with the [`ChipProfile`] describing its geometry.
//!
//! Capacities are never hard-coded here: every size comes from the
//! [`DieGeometry`] of the profile the image was created from.

#![warn(missing_docs)]

pub mod die;
pub mod error;
pub mod image;
pub mod location;
pub mod pll;
pub mod profile;

pub use die::Die;
pub use error::{BlockKind, ChipError};
pub use image::ChipImage;
pub use location::Location;
pub use profile::{ChipProfile, DieGeometry};
