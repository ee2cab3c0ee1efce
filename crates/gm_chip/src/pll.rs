//! PLL mux region layout.
//!
//! The PLL region of a die holds four PLL units, each with two 12-byte
//! sub-slots (eight slots in total), followed by a shared region that
//! carries settings common to all units.
//!
//! ```text
//! offset  0: unit 0 low   12: unit 0 high
//! offset 24: unit 1 low   36: unit 1 high
//! offset 48: unit 2 low   60: unit 2 high
//! offset 72: unit 3 low   84: unit 3 high
//! offset 96: shared
//! ```

/// Number of bytes in one PLL sub-slot.
pub const PLL_UNIT_BYTES: usize = 12;

/// Number of PLL units on a die.
pub const PLL_UNITS: usize = 4;

/// Number of 12-byte slots (two per unit).
pub const PLL_SLOTS: usize = PLL_UNITS * 2;

/// Offset of the shared region following the unit slots.
pub const PLL_SHARED_OFFSET: usize = PLL_SLOTS * PLL_UNIT_BYTES;

/// Returns the byte offsets of the sub-slots chosen by a select mask.
///
/// Bit `i` of the low nibble selects unit `i`; bit `i + 4` picks that unit's
/// high sub-slot instead of its low one.
pub fn selected_offsets(select: u8) -> impl Iterator<Item = usize> {
    (0..PLL_UNITS).filter_map(move |unit| {
        if select & (1 << unit) == 0 {
            return None;
        }
        let mut pos = unit * 2 * PLL_UNIT_BYTES;
        if select & (1 << (unit + 4)) != 0 {
            pos += PLL_UNIT_BYTES;
        }
        Some(pos)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shared_region_starts_after_slots() {
        assert_eq!(PLL_SHARED_OFFSET, 96);
    }

    #[test]
    fn unit0_low_and_high() {
        assert_eq!(selected_offsets(0b0000_0001).collect::<Vec<_>>(), vec![0]);
        assert_eq!(selected_offsets(0b0001_0001).collect::<Vec<_>>(), vec![12]);
    }

    #[test]
    fn all_units_mixed_halves() {
        let offsets: Vec<_> = selected_offsets(0b1010_1111).collect();
        assert_eq!(offsets, vec![0, 36, 48, 84]);
    }

    #[test]
    fn high_bits_without_unit_select_are_ignored() {
        assert_eq!(selected_offsets(0b1111_0000).count(), 0);
    }
}
