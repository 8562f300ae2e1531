//! Board bring-up order.
//!
//! Initialization order:
//!   1. Private timer (free-running, needed by the LCD reset delays)
//!   2. Audio core (FIFOs cleared before any cue plays)
//!   3. Cues (decoded into RAM; a missing or malformed cue is fatal)
//!   4. Display (LT24 reset and first clear)
//!
//! Each step is recorded in a [`BootProgress`]; completing a step out of
//! order is an error, so the entry point cannot silently reorder bring-up.

use embedded_graphics::{pixelcolor::Rgb565, prelude::*};
use platform::AssetStore;

use crate::audio::{CueError, CueLibrary};
use crate::display::BACKGROUND;

/// Ordered list of boot sequence steps for documentation and logging.
pub const BOOT_SEQUENCE_STEPS: &[&str] = &[
    "1. Timer: A9 private timer, load 0xFFFFFFFF, auto-reload, enabled",
    "2. Audio: clear the audio core FIFOs",
    "3. Cues: decode correct_answer.wav and wrong_answer.wav into RAM",
    "4. Display: reset the LT24 and clear it to the background colour",
];

/// One bring-up step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootStep {
    /// Tick source.
    Timer,
    /// Codec FIFOs.
    Audio,
    /// Cue samples.
    Cues,
    /// LCD.
    Display,
}

impl BootStep {
    /// Every step, in the required order.
    pub const SEQUENCE: [Self; 4] = [Self::Timer, Self::Audio, Self::Cues, Self::Display];

    /// Short name for logs.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Timer => "timer",
            Self::Audio => "audio",
            Self::Cues => "cues",
            Self::Display => "display",
        }
    }
}

/// Fatal bring-up failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BootError {
    /// A step was completed before its predecessor.
    OutOfOrder {
        /// Step that should have come next.
        expected: Option<BootStep>,
        /// Step that was reported.
        got: BootStep,
    },
    /// A cue could not be loaded.
    Cues(CueError),
    /// The first panel clear failed.
    Display,
}

impl core::fmt::Display for BootError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfOrder {
                expected: Some(expected),
                got,
            } => write!(
                f,
                "boot step {} completed before {}",
                got.label(),
                expected.label()
            ),
            Self::OutOfOrder {
                expected: None,
                got,
            } => write!(f, "boot step {} completed after boot finished", got.label()),
            Self::Cues(err) => write!(f, "cue loading failed: {err}"),
            Self::Display => f.write_str("display bring-up failed"),
        }
    }
}

impl From<CueError> for BootError {
    fn from(err: CueError) -> Self {
        Self::Cues(err)
    }
}

/// Tracks which bring-up steps have completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BootProgress {
    done: usize,
}

impl BootProgress {
    /// Nothing brought up yet.
    pub const fn new() -> Self {
        Self { done: 0 }
    }

    /// Step expected next, or `None` once boot is complete.
    pub fn next(&self) -> Option<BootStep> {
        BootStep::SEQUENCE.get(self.done).copied()
    }

    /// `true` once every step has completed.
    pub fn is_complete(&self) -> bool {
        self.next().is_none()
    }

    /// Record `step` as done.
    pub fn complete(&mut self, step: BootStep) -> Result<(), BootError> {
        let expected = self.next();
        if expected != Some(step) {
            return Err(BootError::OutOfOrder { expected, got: step });
        }
        self.done = self.done.saturating_add(1);
        tracing::info!(step = step.label(), "boot step complete");
        Ok(())
    }
}

/// Step 3: decode both cues into the given buffers.
pub fn load_cues<'a, S: AssetStore>(
    progress: &mut BootProgress,
    store: &mut S,
    correct: &'a mut [i16],
    wrong: &'a mut [i16],
) -> Result<CueLibrary<'a>, BootError> {
    let library = CueLibrary::load(store, correct, wrong)?;
    tracing::info!(
        correct = library.correct().len(),
        wrong = library.wrong().len(),
        "cues loaded"
    );
    progress.complete(BootStep::Cues)?;
    Ok(library)
}

/// Step 4: clear the panel to the background colour.
pub fn clear_display<D>(progress: &mut BootProgress, target: &mut D) -> Result<(), BootError>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    target.clear(BACKGROUND).map_err(|err| {
        tracing::warn!(error = ?err, "panel clear failed");
        BootError::Display
    })?;
    progress.complete(BootStep::Display)
}
