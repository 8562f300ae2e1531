//! Math quiz firmware for the DE1-SoC
//!
//! Application layer of the quiz: the LCD renderer, cue loading, board
//! bring-up and the DE1-SoC peripheral drivers. The game itself lives in the
//! `quiz` crate and only sees the `platform` traits.
//!
//! # Architecture
//!
//! ```text
//! Entry points (main.rs on the board, bin/simulator.rs on the desktop)
//!         ↓
//! Game (quiz::Controller driving quiz::Session)
//!         ↓
//! Platform traits (InputLines, TickTimer, Watchdog, SegmentDisplay, AudioSink)
//!         ↓
//! Drivers (de1soc on hardware, embedded-graphics-simulator on the desktop)
//! ```
//!
//! # Features
//!
//! - `hardware` - Memory-mapped DE1-SoC drivers and the `firmware` binary
//! - `emulator` - Desktop simulator binary
//! - `std` - Enable standard library (for the simulator and testing)
//! - `defmt` - defmt::Format derives on value types
//!
//! # Examples
//!
//! ## Hardware Target
//!
//! ```bash
//! cargo build --release --target armv7a-none-eabi --features hardware
//! ```
//!
//! ## Simulator
//!
//! ```bash
//! cargo run -p firmware --bin simulator --features emulator
//! ```

#![cfg_attr(all(not(test), not(feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
// Logging discipline
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![warn(clippy::dbg_macro)]
// Intentional allows for this codebase:
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod audio;
pub mod boot;
pub mod de1soc;
pub mod display;

pub use audio::{CueError, CueLibrary, CUE_CAPACITY};
pub use boot::{BootError, BootProgress, BootStep, BOOT_SEQUENCE_STEPS};
pub use display::{LcdRenderer, LCD_HEIGHT, LCD_WIDTH};
