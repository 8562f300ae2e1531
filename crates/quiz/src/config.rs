//! Game tuning constants.

use platform::SegmentSlot;

/// Countdown and readout configuration for one quiz build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct QuizConfig {
    /// Seconds allowed per question.
    pub countdown_seconds: u32,
    /// Timer ticks in one countdown second.
    pub ticks_per_second: u32,
    /// Seven-segment slot showing the score.
    pub score_slot: SegmentSlot,
    /// Seven-segment slot (rightmost of a pair) showing the countdown.
    pub countdown_slot: SegmentSlot,
}

impl QuizConfig {
    /// Default seconds per question.
    pub const COUNTDOWN_SECONDS: u32 = 20;

    /// A9 private timer rate with prescaler 0 (225 MHz peripheral clock).
    pub const A9_TICKS_PER_SECOND: u32 = 225_000_000;

    /// Board configuration: 20 s per question, A9 private timer, score on
    /// HEX2 and countdown on HEX5..HEX4.
    #[must_use]
    pub const fn de1soc() -> Self {
        Self {
            countdown_seconds: Self::COUNTDOWN_SECONDS,
            ticks_per_second: Self::A9_TICKS_PER_SECOND,
            score_slot: SegmentSlot::new(2),
            countdown_slot: SegmentSlot::new(4),
        }
    }

    /// Same layout with a different tick rate (simulator, tests).
    #[must_use]
    pub const fn with_ticks_per_second(mut self, ticks_per_second: u32) -> Self {
        self.ticks_per_second = ticks_per_second;
        self
    }

    /// Same layout with a different time limit.
    #[must_use]
    pub const fn with_countdown_seconds(mut self, seconds: u32) -> Self {
        self.countdown_seconds = seconds;
        self
    }
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self::de1soc()
    }
}
