//! Discrete input abstraction

/// Push-button bit for KEY0 (confirm / choice A / end).
pub const KEY0: u32 = 1 << 0;
/// Push-button bit for KEY1 (choice B / quit).
pub const KEY1: u32 = 1 << 1;
/// Push-button bit for KEY2 (choice C).
pub const KEY2: u32 = 1 << 2;
/// Push-button bit for KEY3 (choice D / continue).
pub const KEY3: u32 = 1 << 3;

/// Level-triggered input lines: a push-button port and a slide-switch port.
///
/// Both reads return the raw bitmask as seen on the wire, one bit per
/// physical control, `1` = pressed / switched on. Implementations must not
/// debounce or latch; callers poll and act on the first qualifying pattern.
pub trait InputLines {
    /// Read the push-button bitmask.
    fn read_buttons(&mut self) -> u32;

    /// Read the slide-switch (digit-select) bitmask.
    fn read_switches(&mut self) -> u32;
}
