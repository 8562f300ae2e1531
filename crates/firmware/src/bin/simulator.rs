//! Desktop simulator for the math quiz.
//!
//! Runs the real game loop against an embedded-graphics-simulator window:
//!
//! - `Z` `X` `C` `V` hold KEY0..KEY3
//! - `0`..`9` toggle slide switches SW0..SW9
//! - `Escape` or closing the window quits
//!
//! The strip under the LCD mirrors the seven-segment score and countdown.
//! Cues load from `$QUIZ_ASSETS` when set, otherwise from the copies linked
//! into the binary. Log level follows `RUST_LOG` (default `info`).

#![allow(clippy::print_stdout)]
#![allow(clippy::cast_possible_wrap)]

use std::cell::RefCell;
use std::convert::Infallible;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{anyhow, Context as _};
use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use embedded_graphics_simulator::{
    OutputSettingsBuilder, SimulatorDisplay, SimulatorEvent, Window,
};
use firmware::audio::{self, CueLibrary, CUE_CAPACITY};
use firmware::boot::{self, BootProgress, BootStep};
use firmware::{LcdRenderer, LCD_HEIGHT, LCD_WIDTH};
use platform::asset_local::LocalAssetStore;
use platform::{
    AudioSink, InputLines, SegmentDisplay, SegmentSlot, TickTimer, Watchdog, KEY0, KEY1, KEY2,
    KEY3,
};
use quiz::{Board, Controller, QuizConfig, Session};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Height of the seven-segment strip under the LCD.
const STRIP_HEIGHT: u32 = 32;
/// Top of the strip text.
const STRIP_TEXT_Y: i32 = 331;
/// Simulated timer rate.
const TICKS_PER_SECOND: u32 = 1_000;
/// Minimum time between window refreshes.
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Window, framebuffer and input state shared by every simulated peripheral.
struct Simulator {
    display: SimulatorDisplay<Rgb565>,
    window: Window,
    buttons: u32,
    switches: u32,
    readouts: [Option<u32>; SegmentSlot::COUNT as usize],
    config: QuizConfig,
    last_frame: Instant,
}

type Shared = Rc<RefCell<Simulator>>;

impl Simulator {
    fn new(config: QuizConfig) -> Self {
        let settings = OutputSettingsBuilder::new().scale(2).build();
        Self {
            display: SimulatorDisplay::new(Size::new(
                LCD_WIDTH,
                LCD_HEIGHT.saturating_add(STRIP_HEIGHT),
            )),
            window: Window::new(platform::config::dev_banner(), &settings),
            buttons: 0,
            switches: 0,
            readouts: [None; SegmentSlot::COUNT as usize],
            config,
            last_frame: Instant::now()
                .checked_sub(FRAME_INTERVAL)
                .unwrap_or_else(Instant::now),
        }
    }

    /// Redraw the strip, refresh the window and apply queued key events.
    fn pump(&mut self) {
        if self.last_frame.elapsed() < FRAME_INTERVAL {
            return;
        }
        self.last_frame = Instant::now();
        self.draw_strip();
        self.window.update(&self.display);

        let events: Vec<SimulatorEvent> = self.window.events().collect();
        for event in events {
            match event {
                SimulatorEvent::Quit => quit(),
                SimulatorEvent::KeyDown {
                    keycode, repeat, ..
                } => {
                    let name = keycode.name();
                    if name == "Escape" {
                        quit();
                    }
                    if let Some(bit) = key_bit(&name) {
                        self.buttons |= bit;
                    } else if let Some(bit) = switch_bit(&name) {
                        if !repeat {
                            self.switches ^= bit;
                            tracing::debug!(switches = self.switches, "switches");
                        }
                    }
                }
                SimulatorEvent::KeyUp { keycode, .. } => {
                    if let Some(bit) = key_bit(&keycode.name()) {
                        self.buttons &= !bit;
                    }
                }
                _ => {}
            }
        }
    }

    fn readout(&self, slot: SegmentSlot) -> String {
        self.readouts
            .get(usize::from(slot.get()))
            .copied()
            .flatten()
            .map_or_else(|| "--".to_owned(), |v| format!("{v:02}"))
    }

    fn draw_strip(&mut self) {
        let area = Rectangle::new(
            Point::new(0, LCD_HEIGHT as i32),
            Size::new(LCD_WIDTH, STRIP_HEIGHT),
        );
        let line = format!(
            "SCORE {}   TIME {}   SW {:010b}",
            self.readout(self.config.score_slot),
            self.readout(self.config.countdown_slot),
            self.switches,
        );
        let style = MonoTextStyle::new(&FONT_6X10, Rgb565::RED);
        let _ = area
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLACK))
            .draw(&mut self.display);
        let _ = Text::with_baseline(&line, Point::new(4, STRIP_TEXT_Y), style, Baseline::Top)
            .draw(&mut self.display);
    }
}

fn key_bit(name: &str) -> Option<u32> {
    match name {
        "Z" => Some(KEY0),
        "X" => Some(KEY1),
        "C" => Some(KEY2),
        "V" => Some(KEY3),
        _ => None,
    }
}

fn switch_bit(name: &str) -> Option<u32> {
    let digit = name.parse::<u32>().ok().filter(|d| *d <= 9)?;
    1u32.checked_shl(digit)
}

#[allow(clippy::exit)]
fn quit() -> ! {
    tracing::info!("window closed");
    std::process::exit(0);
}

/// The LCD area of the window.
struct Lcd(Shared);

impl OriginDimensions for Lcd {
    fn size(&self) -> Size {
        Size::new(LCD_WIDTH, LCD_HEIGHT)
    }
}

impl DrawTarget for Lcd {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        let mut sim = self.0.borrow_mut();
        sim.display
            .draw_iter(pixels.into_iter().filter(|Pixel(p, _)| bounds.contains(*p)))
    }
}

/// Keyboard-backed KEY/SW lines.
struct Keys(Shared);

impl InputLines for Keys {
    fn read_buttons(&mut self) -> u32 {
        self.0.borrow().buttons
    }

    fn read_switches(&mut self) -> u32 {
        self.0.borrow().switches
    }
}

/// Feeding the watchdog keeps the window responsive.
struct Pump(Shared);

impl Watchdog for Pump {
    fn keepalive(&mut self) {
        self.0.borrow_mut().pump();
    }
}

/// Seven-segment readouts shown in the strip.
struct Strip(Shared);

impl Strip {
    fn store(&mut self, slot: SegmentSlot, value: u32) {
        if let Some(cell) = self.0.borrow_mut().readouts.get_mut(usize::from(slot.get())) {
            *cell = Some(value);
        }
    }
}

impl SegmentDisplay for Strip {
    fn set_double(&mut self, slot: SegmentSlot, value: u32) {
        self.store(slot, value.checked_rem(100).unwrap_or(0));
    }

    fn set_single(&mut self, slot: SegmentSlot, value: u32) {
        self.store(slot, value.checked_rem(10).unwrap_or(0));
    }
}

/// Millisecond tick source.
struct Clock {
    reference: Instant,
}

impl TickTimer for Clock {
    fn elapsed_ticks(&mut self) -> u32 {
        u32::try_from(self.reference.elapsed().as_millis()).unwrap_or(u32::MAX)
    }

    fn reset_reference(&mut self) {
        self.reference = Instant::now();
    }
}

/// Logs each cue instead of playing it.
struct Speaker;

impl AudioSink for Speaker {
    type Error = Infallible;

    fn play(&mut self, samples: &[i16]) -> Result<(), Self::Error> {
        let peak = samples.iter().map(|s| s.unsigned_abs()).max().unwrap_or(0);
        tracing::info!(samples = samples.len(), peak, "cue played");
        Ok(())
    }
}

fn load_cues<'a>(
    progress: &mut BootProgress,
    correct: &'a mut [i16],
    wrong: &'a mut [i16],
) -> anyhow::Result<CueLibrary<'a>> {
    let library = if let Some(mut store) = LocalAssetStore::from_env() {
        tracing::info!("loading cues from QUIZ_ASSETS");
        boot::load_cues(progress, &mut store, correct, wrong)
    } else {
        boot::load_cues(progress, &mut audio::embedded_cues(), correct, wrong)
    };
    library.map_err(|err| anyhow!("{err}"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(fmt::layer().with_target(false))
        .init();

    tracing::info!(
        "{} v{} ({} simulator)",
        platform::config::APP_NAME,
        platform::config::APP_VERSION,
        platform::config::BOARD_NAME
    );
    println!("Keys: Z X C V = KEY0..KEY3, 0-9 = toggle SW0..SW9, Esc = quit");

    let config = QuizConfig::de1soc().with_ticks_per_second(TICKS_PER_SECOND);
    let mut progress = BootProgress::new();

    let timer = Clock {
        reference: Instant::now(),
    };
    progress.complete(BootStep::Timer).map_err(|err| anyhow!("{err}"))?;
    progress.complete(BootStep::Audio).map_err(|err| anyhow!("{err}"))?;

    let mut correct = vec![0i16; CUE_CAPACITY];
    let mut wrong = vec![0i16; CUE_CAPACITY];
    let cues = load_cues(&mut progress, &mut correct, &mut wrong).context("loading cues")?;

    let shared: Shared = Rc::new(RefCell::new(Simulator::new(config)));
    let mut lcd = Lcd(Rc::clone(&shared));
    boot::clear_display(&mut progress, &mut lcd).map_err(|err| anyhow!("{err}"))?;

    let board = Board {
        input: Keys(Rc::clone(&shared)),
        timer,
        watchdog: Pump(Rc::clone(&shared)),
        segments: Strip(Rc::clone(&shared)),
        renderer: LcdRenderer::new(lcd),
        audio: Speaker,
    };
    let mut controller = Controller::new(board, cues.cues(), config);
    let mut session = Session::new();
    controller
        .run(&mut session)
        .map_err(|err| anyhow!("{err}"))
        .context("game loop")?;

    tracing::info!(score = session.score(), "bye");
    Ok(())
}
