//! Mock implementations for testing
//!
//! This module provides mock implementations of the platform traits for use
//! in unit and integration tests. Input is scripted frame by frame, the timer
//! advances by a fixed step per read, and the watchdog can be armed with a
//! feed limit so that a poll loop that never exits fails the test instead of
//! hanging it.

#![cfg(any(test, feature = "std"))]

use crate::*;

/// One scripted sample of the input lines, held for `polls` button reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputFrame {
    /// Push-button bitmask.
    pub buttons: u32,
    /// Slide-switch bitmask.
    pub switches: u32,
    /// Number of button reads this frame stays on the lines.
    pub polls: u32,
}

impl InputFrame {
    /// A single-poll frame with `mask` on the buttons and no switches.
    pub const fn buttons(mask: u32) -> Self {
        Self {
            buttons: mask,
            switches: 0,
            polls: 1,
        }
    }

    /// A single-poll frame with `mask` on the switches and no buttons.
    pub const fn switches(mask: u32) -> Self {
        Self {
            buttons: 0,
            switches: mask,
            polls: 1,
        }
    }

    /// Nothing pressed for `polls` reads.
    pub const fn idle(polls: u32) -> Self {
        Self {
            buttons: 0,
            switches: 0,
            polls,
        }
    }

    /// Add `mask` on the switches to this frame.
    #[must_use]
    pub const fn with_switches(mut self, mask: u32) -> Self {
        self.switches = mask;
        self
    }

    /// Hold this frame for `polls` button reads.
    #[must_use]
    pub const fn held(mut self, polls: u32) -> Self {
        self.polls = polls;
        self
    }
}

/// Scripted input lines.
///
/// Each [`read_buttons`](InputLines::read_buttons) call consumes one poll of
/// the front frame; [`read_switches`](InputLines::read_switches) only peeks,
/// so a caller that reads switches then buttons in one iteration sees a
/// consistent frame. Once the script runs out both lines read as idle.
pub struct MockInput {
    script: heapless::Deque<InputFrame, 64>,
    button_reads: usize,
}

impl MockInput {
    /// Create new mock input with an empty script
    pub fn new() -> Self {
        Self {
            script: heapless::Deque::new(),
            button_reads: 0,
        }
    }

    /// Build a mock from a list of frames (excess frames beyond capacity are dropped).
    pub fn scripted(frames: &[InputFrame]) -> Self {
        let mut input = Self::new();
        for frame in frames {
            if input.push(*frame).is_err() {
                break;
            }
        }
        input
    }

    /// Append a frame to the script
    pub fn push(&mut self, frame: InputFrame) -> Result<(), InputFrame> {
        self.script.push_back(frame)
    }

    /// Number of frames not yet fully consumed
    pub fn remaining(&self) -> usize {
        self.script.len()
    }

    /// Total button reads so far
    pub fn button_reads(&self) -> usize {
        self.button_reads
    }
}

impl Default for MockInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputLines for MockInput {
    fn read_buttons(&mut self) -> u32 {
        self.button_reads = self.button_reads.saturating_add(1);
        let Some(frame) = self.script.front_mut() else {
            return 0;
        };
        let buttons = frame.buttons;
        frame.polls = frame.polls.saturating_sub(1);
        if frame.polls == 0 {
            self.script.pop_front();
        }
        buttons
    }

    fn read_switches(&mut self) -> u32 {
        self.script.front().map_or(0, |frame| frame.switches)
    }
}

/// Tick timer driven by the test.
///
/// With [`auto_advance`](Self::auto_advance) every `elapsed_ticks` read moves
/// the clock forward by a fixed step, which makes countdown behaviour a pure
/// function of the number of polls.
pub struct ManualTimer {
    now: u32,
    reference: u32,
    step: u32,
    resets: usize,
}

impl ManualTimer {
    /// Create a stopped timer
    pub fn new() -> Self {
        Self::auto_advance(0)
    }

    /// Create a timer that advances `step` ticks on every read
    pub fn auto_advance(step: u32) -> Self {
        Self {
            now: 0,
            reference: 0,
            step,
            resets: 0,
        }
    }

    /// Move the clock forward by `ticks`
    pub fn advance(&mut self, ticks: u32) {
        self.now = self.now.wrapping_add(ticks);
    }

    /// Number of reference resets so far
    pub fn resets(&self) -> usize {
        self.resets
    }
}

impl Default for ManualTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl TickTimer for ManualTimer {
    fn elapsed_ticks(&mut self) -> u32 {
        self.now = self.now.wrapping_add(self.step);
        self.now.wrapping_sub(self.reference)
    }

    fn reset_reference(&mut self) {
        self.reference = self.now;
        self.resets = self.resets.saturating_add(1);
    }
}

/// Watchdog that counts feeds and optionally trips after a limit.
pub struct CountingWatchdog {
    feeds: usize,
    limit: Option<usize>,
}

impl CountingWatchdog {
    /// Create an unlimited watchdog
    pub fn new() -> Self {
        Self {
            feeds: 0,
            limit: None,
        }
    }

    /// Create a watchdog that panics on feed number `limit + 1`
    pub fn with_limit(limit: usize) -> Self {
        Self {
            feeds: 0,
            limit: Some(limit),
        }
    }

    /// Total feeds so far
    pub fn feeds(&self) -> usize {
        self.feeds
    }
}

impl Default for CountingWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl Watchdog for CountingWatchdog {
    #[allow(clippy::panic)] // test double: a runaway poll loop must fail loudly
    fn keepalive(&mut self) {
        self.feeds = self.feeds.saturating_add(1);
        if let Some(limit) = self.limit {
            if self.feeds > limit {
                panic!("watchdog expired: poll loop fed it more than {limit} times");
            }
        }
    }
}

/// Seven-segment bank that remembers the last value per slot.
pub struct MockSegments {
    values: [Option<u32>; SegmentSlot::COUNT as usize],
    writes: usize,
}

impl MockSegments {
    /// Create a blank bank
    pub fn new() -> Self {
        Self {
            values: [None; SegmentSlot::COUNT as usize],
            writes: 0,
        }
    }

    /// Last value written with `slot` as its rightmost digit
    pub fn value_at(&self, slot: SegmentSlot) -> Option<u32> {
        self.values.get(usize::from(slot.get())).copied().flatten()
    }

    /// Total writes so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    fn record(&mut self, slot: SegmentSlot, value: u32) {
        if let Some(entry) = self.values.get_mut(usize::from(slot.get())) {
            *entry = Some(value);
        }
        self.writes = self.writes.saturating_add(1);
    }
}

impl Default for MockSegments {
    fn default() -> Self {
        Self::new()
    }
}

impl SegmentDisplay for MockSegments {
    fn set_double(&mut self, slot: SegmentSlot, value: u32) {
        self.record(slot, value);
    }

    fn set_single(&mut self, slot: SegmentSlot, value: u32) {
        self.record(slot, value);
    }
}

/// Error returned by a failing [`MockAudio`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockAudioError;

/// Audio sink that records the length of every buffer played
pub struct MockAudio {
    played: heapless::Vec<usize, 32>,
    samples_played: usize,
    fail: bool,
}

impl MockAudio {
    /// Create new mock audio sink
    pub fn new() -> Self {
        Self {
            played: heapless::Vec::new(),
            samples_played: 0,
            fail: false,
        }
    }

    /// Create a sink whose every `play` fails
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Lengths of played buffers, in order (capped at 32 entries)
    pub fn played(&self) -> &[usize] {
        &self.played
    }

    /// Total samples played
    pub fn samples_played(&self) -> usize {
        self.samples_played
    }
}

impl Default for MockAudio {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioSink for MockAudio {
    type Error = MockAudioError;

    fn play(&mut self, samples: &[i16]) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockAudioError);
        }
        // Bounded log: the 33rd buffer onwards is only counted.
        let _ = self.played.push(samples.len());
        self.samples_played = self.samples_played.saturating_add(samples.len());
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_input_holds_frame_for_polls() {
        let mut input = MockInput::scripted(&[InputFrame::buttons(KEY1).held(2)]);

        assert_eq!(input.read_buttons(), KEY1);
        assert_eq!(input.read_buttons(), KEY1);
        assert_eq!(input.read_buttons(), 0);
        assert_eq!(input.button_reads(), 3);
    }

    #[test]
    fn test_mock_input_switch_read_does_not_consume() {
        let mut input = MockInput::scripted(&[InputFrame::buttons(KEY0).with_switches(1 << 8)]);

        assert_eq!(input.read_switches(), 1 << 8);
        assert_eq!(input.read_switches(), 1 << 8);
        assert_eq!(input.read_buttons(), KEY0);
        assert_eq!(input.read_switches(), 0);
        assert_eq!(input.remaining(), 0);
    }

    #[test]
    fn test_manual_timer_auto_advance() {
        let mut timer = ManualTimer::auto_advance(10);
        assert_eq!(timer.elapsed_ticks(), 10);
        assert_eq!(timer.elapsed_ticks(), 20);
        timer.reset_reference();
        assert_eq!(timer.elapsed_ticks(), 10);
        assert_eq!(timer.resets(), 1);
    }

    #[test]
    fn test_manual_timer_wraps() {
        let mut timer = ManualTimer::new();
        timer.advance(u32::MAX);
        timer.reset_reference();
        timer.advance(5);
        assert_eq!(timer.elapsed_ticks(), 5);
    }

    #[test]
    #[should_panic(expected = "watchdog expired")]
    fn test_counting_watchdog_trips_after_limit() {
        let mut dog = CountingWatchdog::with_limit(2);
        dog.keepalive();
        dog.keepalive();
        dog.keepalive();
    }

    #[test]
    fn test_mock_segments_tracks_last_value() {
        let mut seg = MockSegments::new();
        seg.set_double(SegmentSlot::new(4), 20);
        seg.set_double(SegmentSlot::new(4), 19);
        seg.set_single(SegmentSlot::new(2), 1);

        assert_eq!(seg.value_at(SegmentSlot::new(4)), Some(19));
        assert_eq!(seg.value_at(SegmentSlot::new(2)), Some(1));
        assert_eq!(seg.value_at(SegmentSlot::new(0)), None);
        assert_eq!(seg.writes(), 3);
    }

    #[test]
    fn test_mock_audio_records_and_fails() {
        let mut audio = MockAudio::new();
        audio.play(&[0i16; 128]).unwrap();
        assert_eq!(audio.played(), &[128]);

        let mut broken = MockAudio::failing();
        assert_eq!(broken.play(&[0i16; 4]), Err(MockAudioError));
    }
}
