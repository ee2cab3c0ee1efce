//! Die-qualified grid coordinates used to key sparse configuration maps.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A `(die, x, y)` coordinate.
///
/// Locations order by die, then row, then column, so a sorted map of
/// locations walks each die row by row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    /// Die index within the device.
    pub die: u32,
    /// Column within the die's grid.
    pub x: u32,
    /// Row within the die's grid.
    pub y: u32,
}

impl Location {
    /// Creates a new location.
    pub fn new(die: u32, x: u32, y: u32) -> Self {
        Self { die, x, y }
    }

    fn sort_key(&self) -> (u32, u32, u32) {
        (self.die, self.y, self.x)
    }
}

impl Ord for Location {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for Location {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.die, self.x, self.y)
    }
}
