//! Audio core FIFO driver.
//!
//! The DE1-SoC Computer's audio/video configuration core sets up the WM8731
//! at reset; this driver only clears and feeds the output FIFOs.

use platform::{AudioSink, Watchdog};

use super::ports::HpsWatchdog;
use super::{sample_word, write_space, Register, AUDIO_BASE};

/// Polls of a full FIFO before playback gives up.
const STALL_LIMIT: u32 = 1_000_000;

/// Playback failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CodecError {
    /// The FIFO stayed full for [`STALL_LIMIT`] polls.
    FifoStalled,
}

impl core::fmt::Display for CodecError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::FifoStalled => f.write_str("audio FIFO stalled"),
        }
    }
}

/// Blocking mono-to-stereo playback through the audio core.
#[derive(Debug)]
pub struct AudioCodec {
    control: Register,
    fifospace: Register,
    left: Register,
    right: Register,
    watchdog: HpsWatchdog,
}

impl Default for AudioCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioCodec {
    const CLEAR_READ: u32 = 1 << 2;
    const CLEAR_WRITE: u32 = 1 << 3;

    /// Bind the core and clear both FIFO directions.
    pub fn new() -> Self {
        let codec = Self {
            control: Register::at(AUDIO_BASE, 0x0),
            fifospace: Register::at(AUDIO_BASE, 0x4),
            left: Register::at(AUDIO_BASE, 0x8),
            right: Register::at(AUDIO_BASE, 0xC),
            watchdog: HpsWatchdog::new(),
        };
        codec.control.write(Self::CLEAR_READ | Self::CLEAR_WRITE);
        codec.control.write(0);
        tracing::debug!(space = write_space(codec.fifospace.read()), "audio FIFO cleared");
        codec
    }

    fn wait_for_space(&mut self) -> Result<u32, CodecError> {
        for _ in 0..STALL_LIMIT {
            let space = write_space(self.fifospace.read());
            if space > 0 {
                return Ok(space);
            }
            self.watchdog.keepalive();
        }
        Err(CodecError::FifoStalled)
    }
}

impl AudioSink for AudioCodec {
    type Error = CodecError;

    fn play(&mut self, samples: &[i16]) -> Result<(), Self::Error> {
        let mut pending = samples.iter();
        loop {
            let space = self.wait_for_space()?;
            for _ in 0..space {
                let Some(&sample) = pending.next() else {
                    return Ok(());
                };
                let word = sample_word(sample);
                self.left.write(word);
                self.right.write(word);
            }
        }
    }
}
