//! Watchdog keep-alive abstraction

/// Hardware watchdog that resets the board unless fed periodically.
///
/// Every unbounded poll loop must call [`keepalive`](Self::keepalive) at
/// least once per iteration.
pub trait Watchdog {
    /// Restart the watchdog countdown.
    fn keepalive(&mut self);
}
