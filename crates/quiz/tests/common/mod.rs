//! Shared fixtures for controller tests.

#![allow(dead_code)]

use platform::mocks::{CountingWatchdog, InputFrame, ManualTimer, MockAudio, MockInput, MockSegments};
use platform::SegmentSlot;
use quiz::{Board, Controller, CueSet, FeedbackMark, QuizConfig, Screen, ScreenRenderer};

/// Ticks per countdown second in tests.
pub const TICKS_PER_SECOND: u32 = 100;

/// Board layout with a fast tick rate.
pub const CONFIG: QuizConfig = QuizConfig::de1soc().with_ticks_per_second(TICKS_PER_SECOND);

pub const SCORE_SLOT: SegmentSlot = SegmentSlot::new(2);
pub const COUNTDOWN_SLOT: SegmentSlot = SegmentSlot::new(4);

pub static CORRECT_CUE: [i16; 8] = [1_000; 8];
pub static WRONG_CUE: [i16; 4] = [-1_000; 4];

/// Generous bound so a runaway wait fails instead of hanging.
pub const WATCHDOG_LIMIT: usize = 100_000;

/// Something drawn on the LCD.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Drawn {
    Screen(Screen),
    Mark(FeedbackMark),
}

/// Renderer that records every call.
#[derive(Default)]
pub struct RecordingRenderer {
    pub drawn: Vec<Drawn>,
    pub fail: bool,
}

impl RecordingRenderer {
    pub fn failing() -> Self {
        Self {
            drawn: Vec::new(),
            fail: true,
        }
    }

    pub fn screens(&self) -> Vec<Screen> {
        self.drawn
            .iter()
            .filter_map(|d| match d {
                Drawn::Screen(s) => Some(*s),
                Drawn::Mark(_) => None,
            })
            .collect()
    }

    pub fn marks(&self) -> Vec<FeedbackMark> {
        self.drawn
            .iter()
            .filter_map(|d| match d {
                Drawn::Mark(m) => Some(*m),
                Drawn::Screen(_) => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderFailed;

impl ScreenRenderer for RecordingRenderer {
    type Error = RenderFailed;

    fn render_screen(&mut self, screen: Screen) -> Result<(), Self::Error> {
        if self.fail {
            return Err(RenderFailed);
        }
        self.drawn.push(Drawn::Screen(screen));
        Ok(())
    }

    fn render_feedback(&mut self, mark: FeedbackMark) -> Result<(), Self::Error> {
        if self.fail {
            return Err(RenderFailed);
        }
        self.drawn.push(Drawn::Mark(mark));
        Ok(())
    }
}

pub type TestBoard =
    Board<MockInput, ManualTimer, CountingWatchdog, MockSegments, RecordingRenderer, MockAudio>;

pub type TestController = Controller<
    'static,
    MockInput,
    ManualTimer,
    CountingWatchdog,
    MockSegments,
    RecordingRenderer,
    MockAudio,
>;

/// Board whose timer never advances, so questions never time out.
pub fn board(frames: &[InputFrame]) -> TestBoard {
    board_with_timer(frames, ManualTimer::new())
}

pub fn board_with_timer(frames: &[InputFrame], timer: ManualTimer) -> TestBoard {
    Board {
        input: MockInput::scripted(frames),
        timer,
        watchdog: CountingWatchdog::with_limit(WATCHDOG_LIMIT),
        segments: MockSegments::new(),
        renderer: RecordingRenderer::default(),
        audio: MockAudio::new(),
    }
}

pub fn cues() -> CueSet<'static> {
    CueSet {
        correct: &CORRECT_CUE,
        wrong: &WRONG_CUE,
    }
}

pub fn controller(board: TestBoard) -> TestController {
    Controller::new(board, cues(), CONFIG)
}
