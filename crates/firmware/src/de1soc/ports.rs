//! Parallel ports, private timer, HPS watchdog and HEX display drivers.

use platform::{InputLines, SegmentDisplay, SegmentSlot, TickTimer, Watchdog};

use super::{
    ticks_since, Register, SegmentShadow, HEX3_0_BASE, HEX5_4_BASE, KEY_BASE, KEY_MASK,
    PRIVATE_TIMER_BASE, SW_BASE, SW_MASK, WATCHDOG_BASE,
};

/// KEY and SW parallel ports.
#[derive(Debug)]
pub struct ParallelPorts {
    keys: Register,
    switches: Register,
}

impl Default for ParallelPorts {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelPorts {
    /// Bind the data registers of both ports.
    pub const fn new() -> Self {
        Self {
            keys: Register::at(KEY_BASE, 0),
            switches: Register::at(SW_BASE, 0),
        }
    }
}

impl InputLines for ParallelPorts {
    fn read_buttons(&mut self) -> u32 {
        self.keys.read() & KEY_MASK
    }

    fn read_switches(&mut self) -> u32 {
        self.switches.read() & SW_MASK
    }
}

/// Cortex-A9 private timer in free-running auto-reload mode.
#[derive(Debug)]
pub struct PrivateTimer {
    load: Register,
    value: Register,
    control: Register,
    interrupt: Register,
    reference: u32,
}

impl PrivateTimer {
    const ENABLE: u32 = 1 << 0;
    const AUTO_RELOAD: u32 = 1 << 1;

    /// Load `0xFFFF_FFFF`, prescaler 0, auto-reload, no interrupt; start.
    pub fn start() -> Self {
        let mut timer = Self {
            load: Register::at(PRIVATE_TIMER_BASE, 0x0),
            value: Register::at(PRIVATE_TIMER_BASE, 0x4),
            control: Register::at(PRIVATE_TIMER_BASE, 0x8),
            interrupt: Register::at(PRIVATE_TIMER_BASE, 0xC),
            reference: 0,
        };
        timer.load.write(u32::MAX);
        timer.control.write(Self::AUTO_RELOAD | Self::ENABLE);
        if timer.interrupt.read() & 0x1 != 0 {
            timer.interrupt.write(0x1);
        }
        timer.reset_reference();
        timer
    }

    /// Busy-wait `ticks`, feeding `watchdog` on every poll.
    pub fn delay<W: Watchdog>(&mut self, ticks: u32, watchdog: &mut W) {
        let start = self.value.read();
        while ticks_since(start, self.value.read()) < ticks {
            watchdog.keepalive();
        }
    }
}

impl TickTimer for PrivateTimer {
    fn elapsed_ticks(&mut self) -> u32 {
        ticks_since(self.reference, self.value.read())
    }

    fn reset_reference(&mut self) {
        self.reference = self.value.read();
    }
}

/// HPS L4 watchdog 0.
///
/// Zero-sized apart from its register handle; any number of handles may
/// restart the same watchdog.
#[derive(Debug, Clone, Copy)]
pub struct HpsWatchdog {
    restart: Register,
}

impl Default for HpsWatchdog {
    fn default() -> Self {
        Self::new()
    }
}

impl HpsWatchdog {
    const RESTART_KEY: u32 = 0x76;

    /// Bind the counter-restart register.
    pub const fn new() -> Self {
        Self {
            restart: Register::at(WATCHDOG_BASE, 0xC),
        }
    }
}

impl Watchdog for HpsWatchdog {
    fn keepalive(&mut self) {
        self.restart.write(Self::RESTART_KEY);
    }
}

/// HEX5..HEX0 seven-segment digits.
#[derive(Debug)]
pub struct HexDisplay {
    low: Register,
    high: Register,
    shadow: SegmentShadow,
}

impl Default for HexDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl HexDisplay {
    /// Bind both registers and blank every digit.
    pub fn new() -> Self {
        let mut hex = Self {
            low: Register::at(HEX3_0_BASE, 0),
            high: Register::at(HEX5_4_BASE, 0),
            shadow: SegmentShadow::new(),
        };
        hex.flush();
        hex
    }

    fn flush(&mut self) {
        self.low.write(self.shadow.low_word());
        self.high.write(self.shadow.high_word());
    }
}

impl SegmentDisplay for HexDisplay {
    fn set_double(&mut self, slot: SegmentSlot, value: u32) {
        self.shadow.set_double(slot.get(), value);
        self.flush();
    }

    fn set_single(&mut self, slot: SegmentSlot, value: u32) {
        self.shadow.set_single(slot.get(), value);
        self.flush();
    }
}
