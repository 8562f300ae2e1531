//! Shared fixtures: an in-memory LCD and a mock board around it.

#![allow(dead_code)]

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use firmware::{LcdRenderer, LCD_HEIGHT, LCD_WIDTH};
use platform::mocks::{CountingWatchdog, InputFrame, ManualTimer, MockAudio, MockInput, MockSegments};
use quiz::{Board, Controller, CueSet, QuizConfig};

/// Generous bound so a runaway wait fails instead of hanging.
pub const WATCHDOG_LIMIT: usize = 100_000;

pub const CONFIG: QuizConfig = QuizConfig::de1soc().with_ticks_per_second(100);

pub static CORRECT_CUE: [i16; 8] = [1_000; 8];
pub static WRONG_CUE: [i16; 4] = [-1_000; 4];

/// Full-size RGB565 framebuffer.
pub struct FrameBuffer {
    pixels: Vec<Rgb565>,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self {
            pixels: vec![Rgb565::WHITE; (LCD_WIDTH * LCD_HEIGHT) as usize],
        }
    }

    pub fn at(&self, x: i32, y: i32) -> Rgb565 {
        self.pixels[y as usize * LCD_WIDTH as usize + x as usize]
    }

    pub fn count_in(&self, area: Rectangle, colour: Rgb565) -> usize {
        area.points().filter(|p| self.at(p.x, p.y) == colour).count()
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, c) in pixels {
            if self.bounding_box().contains(p) {
                self.pixels[p.y as usize * LCD_WIDTH as usize + p.x as usize] = c;
            }
        }
        Ok(())
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(LCD_WIDTH, LCD_HEIGHT)
    }
}

pub type LcdBoard = Board<
    MockInput,
    ManualTimer,
    CountingWatchdog,
    MockSegments,
    LcdRenderer<FrameBuffer>,
    MockAudio,
>;

pub type LcdController = Controller<
    'static,
    MockInput,
    ManualTimer,
    CountingWatchdog,
    MockSegments,
    LcdRenderer<FrameBuffer>,
    MockAudio,
>;

/// Controller on a framebuffer LCD whose timer never advances.
pub fn controller(frames: &[InputFrame]) -> LcdController {
    let board = Board {
        input: MockInput::scripted(frames),
        timer: ManualTimer::new(),
        watchdog: CountingWatchdog::with_limit(WATCHDOG_LIMIT),
        segments: MockSegments::new(),
        renderer: LcdRenderer::new(FrameBuffer::new()),
        audio: MockAudio::new(),
    };
    let cues = CueSet {
        correct: &CORRECT_CUE,
        wrong: &WRONG_CUE,
    };
    Controller::new(board, cues, CONFIG)
}
