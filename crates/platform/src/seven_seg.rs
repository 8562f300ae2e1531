//! Seven-segment numeric display abstraction
//!
//! The board carries six HEX digits numbered 0 (rightmost) to 5. A *slot* is
//! the index of the rightmost digit used by a readout.

/// Index of the rightmost HEX digit of a readout (0..=5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentSlot(u8);

impl SegmentSlot {
    /// Number of physical HEX digits.
    pub const COUNT: u8 = 6;

    /// Create a slot, clamping to the last physical digit.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        if index >= Self::COUNT {
            Self(Self::COUNT - 1)
        } else {
            Self(index)
        }
    }

    /// Return the digit index.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Numeric readouts on the seven-segment bank.
///
/// Writes are register stores on hardware and cannot fail.
pub trait SegmentDisplay {
    /// Show `value` as two decimal digits at `slot` and `slot + 1`.
    ///
    /// Values above 99 show their last two digits.
    fn set_double(&mut self, slot: SegmentSlot, value: u32);

    /// Show `value` as a single decimal digit at `slot`.
    ///
    /// Values above 9 show their last digit.
    fn set_single(&mut self, slot: SegmentSlot, value: u32);
}

#[cfg(test)]
mod tests {
    use super::SegmentSlot;

    #[test]
    fn test_slot_in_range_is_kept() {
        assert_eq!(SegmentSlot::new(4).get(), 4);
    }

    #[test]
    fn test_slot_out_of_range_clamps_to_last_digit() {
        assert_eq!(SegmentSlot::new(9).get(), 5);
    }
}
