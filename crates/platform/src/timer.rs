//! Free-running hardware timer abstraction

/// Free-running tick source with a movable reference point.
///
/// On the DE1-SoC this is the Cortex-A9 private timer counting down from
/// `0xFFFF_FFFF` in auto-reload mode; the implementation turns that into an
/// up-counting "ticks since reference" value with wrapping arithmetic.
pub trait TickTimer {
    /// Ticks elapsed since the last [`reset_reference`](Self::reset_reference).
    ///
    /// Must never block.
    fn elapsed_ticks(&mut self) -> u32;

    /// Re-base the reference point to "now".
    fn reset_reference(&mut self);
}
