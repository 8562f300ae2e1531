//! DE1-SoC Computer system peripherals
//!
//! Base addresses follow the DE1-SoC Computer memory map (lightweight bridge
//! at `0xFF20_0000`, Cortex-A9 MPCore private peripherals at `0xFFFE_C000`,
//! HPS L4 watchdog 0 at `0xFFD0_2000`).
//!
//! The encoders in this module are pure functions and build on every target.
//! The register-level drivers live in submodules behind the `hardware`
//! feature; nothing outside this module touches an address.

#[cfg(feature = "hardware")]
pub mod codec;
#[cfg(feature = "hardware")]
pub mod lt24;
#[cfg(feature = "hardware")]
pub mod ports;

/// Push-button parallel port (KEY3..KEY0, data register).
pub const KEY_BASE: usize = 0xFF20_0050;
/// Slide-switch parallel port (SW9..SW0, data register).
pub const SW_BASE: usize = 0xFF20_0040;
/// HEX3..HEX0 seven-segment register.
pub const HEX3_0_BASE: usize = 0xFF20_0020;
/// HEX5..HEX4 seven-segment register.
pub const HEX5_4_BASE: usize = 0xFF20_0030;
/// LT24 LCD controller, hardware-optimised data path.
pub const LT24_BASE: usize = 0xFF20_0080;
/// Audio core (control, fifospace, left data, right data).
pub const AUDIO_BASE: usize = 0xFF20_3040;
/// Cortex-A9 private timer (load, value, control, interrupt status).
pub const PRIVATE_TIMER_BASE: usize = 0xFFFE_C600;
/// HPS L4 watchdog 0.
pub const WATCHDOG_BASE: usize = 0xFFD0_2000;

/// Mask of the four push buttons.
pub const KEY_MASK: u32 = 0xF;
/// Mask of the ten slide switches.
pub const SW_MASK: u32 = 0x3FF;

/// Segment patterns for 0-9 (bit 0 = segment a, active high).
pub const SEGMENT_CODES: [u8; 10] = [0x3F, 0x06, 0x5B, 0x4F, 0x66, 0x6D, 0x7D, 0x07, 0x7F, 0x6F];

/// Multiplier from a 16-bit cue sample to the codec's 24-bit sample word.
pub const SAMPLE_GAIN: i32 = 1 << 8;

/// One memory-mapped peripheral register.
#[cfg(feature = "hardware")]
#[derive(Debug, Clone, Copy)]
pub(crate) struct Register(usize);

#[cfg(feature = "hardware")]
impl Register {
    pub(crate) const fn at(base: usize, offset: usize) -> Self {
        Self(base.saturating_add(offset))
    }

    pub(crate) fn read(self) -> u32 {
        // SAFETY: every Register is built from the word-aligned base constants
        // above, which stay mapped for the lifetime of the program.
        unsafe { core::ptr::read_volatile(self.0 as *const u32) }
    }

    pub(crate) fn write(self, value: u32) {
        // SAFETY: as for `read`.
        unsafe { core::ptr::write_volatile(self.0 as *mut u32, value) }
    }

    pub(crate) fn write_half(self, value: u16) {
        // SAFETY: as for `read`; LT24 registers are halfword aligned.
        unsafe { core::ptr::write_volatile(self.0 as *mut u16, value) }
    }
}

/// Segment pattern for a single decimal digit; blank above 9.
pub fn segment_code(digit: u32) -> u8 {
    usize::try_from(digit)
        .ok()
        .and_then(|d| SEGMENT_CODES.get(d))
        .copied()
        .unwrap_or(0)
}

fn last_digit(value: u32) -> u32 {
    value.checked_rem(10).unwrap_or(0)
}

/// Software copy of the six HEX digits.
///
/// The hardware registers are write-only in practice and pack four and two
/// digits per word, so every update rewrites both words from this copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentShadow {
    patterns: [u8; 6],
}

impl SegmentShadow {
    /// All digits blank.
    pub const fn new() -> Self {
        Self { patterns: [0; 6] }
    }

    fn put(&mut self, index: u8, value: u32) {
        if let Some(cell) = self.patterns.get_mut(usize::from(index)) {
            *cell = segment_code(last_digit(value));
        }
    }

    /// Show the last digit of `value` at `index`.
    pub fn set_single(&mut self, index: u8, value: u32) {
        self.put(index, value);
    }

    /// Show the last two digits of `value` at `index` (units) and
    /// `index + 1` (tens).
    pub fn set_double(&mut self, index: u8, value: u32) {
        self.put(index, value);
        self.put(index.saturating_add(1), value.checked_div(10).unwrap_or(0));
    }

    /// Pattern currently held for digit `index`.
    pub fn pattern(&self, index: u8) -> u8 {
        self.patterns.get(usize::from(index)).copied().unwrap_or(0)
    }

    /// Word for the HEX3..HEX0 register.
    pub fn low_word(&self) -> u32 {
        let [h0, h1, h2, h3, _, _] = self.patterns;
        u32::from_le_bytes([h0, h1, h2, h3])
    }

    /// Word for the HEX5..HEX4 register.
    pub fn high_word(&self) -> u32 {
        let [_, _, _, _, h4, h5] = self.patterns;
        u32::from_le_bytes([h4, h5, 0, 0])
    }
}

/// Free slots in the audio core's output FIFOs (lesser of left and right).
pub fn write_space(fifospace: u32) -> u32 {
    let right = (fifospace >> 16) & 0xFF;
    let left = fifospace >> 24;
    left.min(right)
}

/// Codec sample word for one cue sample.
pub fn sample_word(sample: i16) -> u32 {
    u32::from_ne_bytes(i32::from(sample).saturating_mul(SAMPLE_GAIN).to_ne_bytes())
}

/// Ticks between `reference` and `current` on a down-counting timer.
pub fn ticks_since(reference: u32, current: u32) -> u32 {
    reference.wrapping_sub(current)
}

#[cfg(test)]
#[allow(clippy::indexing_slicing, clippy::arithmetic_side_effects)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_codes_for_digits() {
        assert_eq!(segment_code(0), 0x3F);
        assert_eq!(segment_code(8), 0x7F);
        assert_eq!(segment_code(10), 0);
    }

    #[test]
    fn test_double_spans_two_digits() {
        let mut hex = SegmentShadow::new();
        hex.set_double(4, 20);
        assert_eq!(hex.pattern(4), SEGMENT_CODES[0]);
        assert_eq!(hex.pattern(5), SEGMENT_CODES[2]);
        assert_eq!(hex.high_word(), 0x5B3F);
        assert_eq!(hex.low_word(), 0);
    }

    #[test]
    fn test_double_keeps_last_two_digits() {
        let mut hex = SegmentShadow::new();
        hex.set_double(0, 123);
        assert_eq!(hex.low_word(), 0x5B4F);
    }

    #[test]
    fn test_single_shows_last_digit() {
        let mut hex = SegmentShadow::new();
        hex.set_single(2, 14);
        assert_eq!(hex.low_word(), u32::from(SEGMENT_CODES[4]) << 16);
    }

    #[test]
    fn test_write_space_is_the_lesser_channel() {
        assert_eq!(write_space(0x8040_0000), 0x40);
        assert_eq!(write_space(0x0280_0000), 0x02);
        assert_eq!(write_space(0), 0);
    }

    #[test]
    fn test_sample_word_scales_and_keeps_sign() {
        assert_eq!(sample_word(1), 0x100);
        assert_eq!(sample_word(-1), 0xFFFF_FF00);
    }

    #[test]
    fn test_ticks_since_counts_down_through_wrap() {
        assert_eq!(ticks_since(1_000, 400), 600);
        assert_eq!(ticks_since(5, 0xFFFF_FFFE), 7);
    }
}
