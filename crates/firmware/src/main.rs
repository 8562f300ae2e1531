//! Math Quiz Firmware - Main Entry Point
//!
//! Hardware-only entry point for the DE1-SoC (Cortex-A9, bare metal). The
//! board's startup code sets up stacks and caches and then calls `main`.

#![no_std]
#![no_main]

use firmware::boot::{self, BootError, BootProgress, BootStep};
use firmware::de1soc::codec::AudioCodec;
use firmware::de1soc::lt24::Lt24;
use firmware::de1soc::ports::{HexDisplay, HpsWatchdog, ParallelPorts, PrivateTimer};
use firmware::{audio, LcdRenderer, CUE_CAPACITY};
use platform::{SegmentDisplay, Watchdog};
use quiz::{Board, Controller, QuizConfig, Session};
use static_cell::StaticCell;

static CORRECT_SAMPLES: StaticCell<[i16; CUE_CAPACITY]> = StaticCell::new();
static WRONG_SAMPLES: StaticCell<[i16; CUE_CAPACITY]> = StaticCell::new();

/// Returning stops the watchdog feed, so the board resets.
#[no_mangle]
pub extern "C" fn main() -> i32 {
    match run() {
        Ok(()) => {
            tracing::info!("exiting the game");
            0
        }
        Err(err) => {
            tracing::error!(error = %err, "fatal");
            1
        }
    }
}

/// Fatal error out of the game loop.
enum Fatal {
    Boot(BootError),
    Game(quiz::GameError),
}

impl core::fmt::Display for Fatal {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Boot(err) => write!(f, "{err}"),
            Self::Game(err) => write!(f, "{err}"),
        }
    }
}

fn run() -> Result<(), Fatal> {
    let config = QuizConfig::de1soc();
    let mut progress = BootProgress::new();
    let mut watchdog = HpsWatchdog::new();

    // Step 1: tick source for the countdown and the LCD reset delays
    let mut timer = PrivateTimer::start();
    progress.complete(BootStep::Timer).map_err(Fatal::Boot)?;
    watchdog.keepalive();

    // Step 2: codec FIFOs
    let codec = AudioCodec::new();
    progress.complete(BootStep::Audio).map_err(Fatal::Boot)?;
    watchdog.keepalive();

    // Step 3: cues
    let correct = CORRECT_SAMPLES.init_with(|| [0; CUE_CAPACITY]);
    let wrong = WRONG_SAMPLES.init_with(|| [0; CUE_CAPACITY]);
    let mut store = audio::embedded_cues();
    let cues = boot::load_cues(&mut progress, &mut store, correct, wrong).map_err(Fatal::Boot)?;
    watchdog.keepalive();

    // Step 4: LCD
    let ticks_per_ms = config.ticks_per_second.checked_div(1_000).unwrap_or(1);
    let mut lcd = Lt24::init(&mut timer, ticks_per_ms);
    boot::clear_display(&mut progress, &mut lcd).map_err(Fatal::Boot)?;
    watchdog.keepalive();

    let mut segments = HexDisplay::new();
    segments.set_double(config.countdown_slot, config.countdown_seconds);

    let board = Board {
        input: ParallelPorts::new(),
        timer,
        watchdog,
        segments,
        renderer: LcdRenderer::new(lcd),
        audio: codec,
    };
    let mut controller = Controller::new(board, cues.cues(), config);
    let mut session = Session::new();
    controller.run(&mut session).map_err(Fatal::Game)
}

#[panic_handler]
fn panic(_info: &core::panic::PanicInfo) -> ! {
    // Stop feeding the watchdog; it resets the board.
    loop {
        core::hint::spin_loop();
    }
}
