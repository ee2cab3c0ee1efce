//! The binary configuration image of a whole device.

use crate::die::Die;
use crate::error::ChipError;
use crate::profile::ChipProfile;

/// One [`Die`] per die of a device, created from a [`ChipProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChipImage {
    profile: ChipProfile,
    dies: Vec<Die>,
}

impl ChipImage {
    /// Creates an image with every die empty.
    pub fn new(profile: ChipProfile) -> Self {
        let dies = (0..profile.die_count)
            .map(|_| Die::new(profile.die.clone()))
            .collect();
        Self { profile, dies }
    }

    /// Returns the device name.
    pub fn name(&self) -> &str {
        &self.profile.name
    }

    /// Returns the profile this image was created from.
    pub fn profile(&self) -> &ChipProfile {
        &self.profile
    }

    /// Returns the number of dies.
    pub fn die_count(&self) -> u32 {
        self.profile.die_count
    }

    /// Returns die `index`.
    pub fn die(&self, index: u32) -> Result<&Die, ChipError> {
        self.dies
            .get(index as usize)
            .ok_or(ChipError::NoSuchDie {
                die: index,
                die_count: self.profile.die_count,
            })
    }

    /// Returns die `index` for writing.
    pub fn die_mut(&mut self, index: u32) -> Result<&mut Die, ChipError> {
        let die_count = self.profile.die_count;
        self.dies
            .get_mut(index as usize)
            .ok_or(ChipError::NoSuchDie {
                die: index,
                die_count,
            })
    }

    /// Iterates over the dies in index order.
    pub fn dies(&self) -> impl Iterator<Item = &Die> {
        self.dies.iter()
    }
}
