//! Property-based tests for cue asset parsing.
//! Verifies invariants hold for ALL valid inputs, not just fixed examples.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]

use platform::wav::{decode_samples, WavError, WavHeader, HEADER_LEN};
use platform::SegmentSlot;

proptest::proptest! {
    /// WavHeader::parse never panics on arbitrary bytes.
    #[test]
    fn parse_never_panics(bytes in proptest::collection::vec(0u8..=255u8, 0..128)) {
        let _ = WavHeader::parse(&bytes);
    }

    /// Anything shorter than the canonical header is rejected as truncated.
    #[test]
    fn parse_rejects_short_input(len in 0usize..HEADER_LEN) {
        let bytes = vec![0u8; len];
        assert_eq!(WavHeader::parse(&bytes), Err(WavError::Truncated));
    }

    /// Every 16-bit PCM header survives serialisation.
    #[test]
    fn pcm16_header_survives_serialisation(
        channels in 1u16..=2,
        rate in 8_000u32..=96_000,
        data_len in 0u32..=1_000_000,
    ) {
        let header = WavHeader::pcm16(channels, rate, data_len);
        assert_eq!(WavHeader::parse(&header.to_bytes()), Ok(header));
    }

    /// decode_samples writes exactly min(out.len(), data.len() / 2) samples.
    #[test]
    fn decode_samples_count(data in proptest::collection::vec(0u8..=255u8, 0..64), cap in 0usize..40) {
        let mut out = vec![0i16; cap];
        let written = decode_samples(&data, &mut out);
        assert_eq!(written, cap.min(data.len() / 2));
    }

    /// SegmentSlot::new never yields an index past the last digit.
    #[test]
    fn segment_slot_always_in_range(index in 0u8..=255u8) {
        assert!(SegmentSlot::new(index).get() < SegmentSlot::COUNT);
    }
}
