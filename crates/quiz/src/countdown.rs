//! Per-question countdown over a free-running tick timer.
//!
//! The adapter never blocks: each [`Countdown::poll`] reads the ticks elapsed
//! since the timer's reference and, once a full second has gone by, drops one
//! second, refreshes the seven-segment readout and re-bases the reference.

use platform::{SegmentDisplay, SegmentSlot, TickTimer};

/// Result of one countdown poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerStatus {
    /// Time left, in whole seconds.
    Running(u32),
    /// The counter reached zero. Every later poll returns this too.
    Expired,
}

/// Seconds counter for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    seconds_remaining: u32,
    ticks_per_second: u32,
    slot: SegmentSlot,
}

impl Countdown {
    /// Create an idle (already expired) countdown.
    pub const fn new(ticks_per_second: u32, slot: SegmentSlot) -> Self {
        Self {
            seconds_remaining: 0,
            ticks_per_second,
            slot,
        }
    }

    /// Arm with `seconds`, re-base the timer and show the initial value.
    pub fn start<T: TickTimer, S: SegmentDisplay>(
        &mut self,
        seconds: u32,
        timer: &mut T,
        segments: &mut S,
    ) {
        self.seconds_remaining = seconds;
        timer.reset_reference();
        segments.set_double(self.slot, seconds);
    }

    /// Advance by at most one second.
    ///
    /// A poll that observes several elapsed periods at once still only drops
    /// one second; the remainder is discarded when the reference is re-based.
    pub fn poll<T: TickTimer, S: SegmentDisplay>(
        &mut self,
        timer: &mut T,
        segments: &mut S,
    ) -> TimerStatus {
        if self.seconds_remaining == 0 {
            return TimerStatus::Expired;
        }
        if timer.elapsed_ticks() >= self.ticks_per_second {
            timer.reset_reference();
            self.seconds_remaining = self.seconds_remaining.saturating_sub(1);
            segments.set_double(self.slot, self.seconds_remaining);
            tracing::debug!(remaining = self.seconds_remaining, "countdown tick");
            if self.seconds_remaining == 0 {
                return TimerStatus::Expired;
            }
        }
        TimerStatus::Running(self.seconds_remaining)
    }

    /// Seconds left.
    pub const fn seconds_remaining(&self) -> u32 {
        self.seconds_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::mocks::{ManualTimer, MockSegments};

    const SLOT: SegmentSlot = SegmentSlot::new(4);

    #[test]
    fn test_start_shows_initial_value() {
        let mut timer = ManualTimer::new();
        let mut seg = MockSegments::new();
        let mut countdown = Countdown::new(100, SLOT);

        countdown.start(20, &mut timer, &mut seg);

        assert_eq!(seg.value_at(SLOT), Some(20));
        assert_eq!(timer.resets(), 1);
    }

    #[test]
    fn test_running_until_period_elapses() {
        let mut timer = ManualTimer::new();
        let mut seg = MockSegments::new();
        let mut countdown = Countdown::new(100, SLOT);
        countdown.start(3, &mut timer, &mut seg);

        timer.advance(99);
        assert_eq!(countdown.poll(&mut timer, &mut seg), TimerStatus::Running(3));
        timer.advance(1);
        assert_eq!(countdown.poll(&mut timer, &mut seg), TimerStatus::Running(2));
        assert_eq!(seg.value_at(SLOT), Some(2));
    }

    #[test]
    fn test_multi_period_gap_drops_one_second() {
        let mut timer = ManualTimer::new();
        let mut seg = MockSegments::new();
        let mut countdown = Countdown::new(100, SLOT);
        countdown.start(5, &mut timer, &mut seg);

        timer.advance(450);
        assert_eq!(countdown.poll(&mut timer, &mut seg), TimerStatus::Running(4));
        assert_eq!(countdown.poll(&mut timer, &mut seg), TimerStatus::Running(4));
    }

    #[test]
    fn test_expired_is_fused() {
        let mut timer = ManualTimer::auto_advance(100);
        let mut seg = MockSegments::new();
        let mut countdown = Countdown::new(100, SLOT);
        countdown.start(2, &mut timer, &mut seg);

        assert_eq!(countdown.poll(&mut timer, &mut seg), TimerStatus::Running(1));
        assert_eq!(countdown.poll(&mut timer, &mut seg), TimerStatus::Expired);
        assert_eq!(seg.value_at(SLOT), Some(0));
        let writes = seg.writes();
        assert_eq!(countdown.poll(&mut timer, &mut seg), TimerStatus::Expired);
        assert_eq!(seg.writes(), writes);
    }

    #[test]
    fn test_new_countdown_is_expired() {
        let mut timer = ManualTimer::new();
        let mut seg = MockSegments::new();
        let mut countdown = Countdown::new(100, SLOT);
        assert_eq!(countdown.poll(&mut timer, &mut seg), TimerStatus::Expired);
    }
}
