//! Hardware Abstraction Layer (HAL) for the math quiz board
//!
//! This crate provides trait-based abstractions for every peripheral the quiz
//! touches, enabling development and testing without physical hardware.
//!
//! # Architecture Layers
//!
//! ```text
//! Application Layer (firmware crate)
//!         ↓
//! Feature Layer (quiz: bank, decoder, countdown, evaluator, controller)
//!         ↓
//! Platform HAL (this crate - trait abstractions)
//!         ↓
//! Hardware Layer (memory-mapped DE1-SoC peripherals)
//! ```
//!
//! # Abstractions
//!
//! - [`InputLines`] - push-button and slide-switch bitmasks
//! - [`TickTimer`] - free-running hardware timer, "ticks since reference"
//! - [`Watchdog`] - keep-alive that must be fed inside every busy wait
//! - [`SegmentDisplay`] - seven-segment numeric readouts
//! - [`AudioSink`] - blocking PCM playback
//! - [`AssetStore`] - read-only named assets (audio cues)
//! - [`wav`] - RIFF/WAVE header parsing for cue assets
//!
//! # Features
//!
//! - `std`: Enable host mocks ([`mocks`]) and the directory-backed
//!   `asset_local::LocalAssetStore` for tests and the simulator
//! - `hardware`: Physical hardware target marker
//! - `defmt`: Enable defmt derives on value types
//!
//! # Example
//!
//! ```no_run
//! use platform::{InputLines, Watchdog};
//!
//! fn wait_for_any_key<I: InputLines, W: Watchdog>(input: &mut I, dog: &mut W) -> u32 {
//!     loop {
//!         dog.keepalive();
//!         let keys = input.read_buttons();
//!         if keys != 0 {
//!             return keys;
//!         }
//!     }
//! }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)] // no .unwrap() in production code
#![deny(clippy::expect_used)] // no .expect() in production code
#![deny(clippy::unreachable)] // no unreachable!() that isn't documented
#![deny(unused_must_use)]
// all Results must be handled
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::print_stdout)] // prefer tracing/defmt over println! in lib code
#![allow(clippy::doc_markdown)] // register names in doc comments
#![allow(clippy::must_use_candidate)] // hardware accessors, callers decide
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

#[cfg(all(feature = "std", not(test)))]
extern crate std;

#[cfg(feature = "std")]
pub mod asset_local;
pub mod asset_store;
pub mod audio;
pub mod config;
pub mod input;
pub mod seven_seg;
pub mod timer;
pub mod watchdog;
pub mod wav;

#[cfg(any(test, feature = "std"))]
pub mod mocks;

// Re-export main high-level traits
pub use asset_store::{AssetKey, AssetStore, MemoryAssetStore};
pub use audio::AudioSink;
pub use input::{InputLines, KEY0, KEY1, KEY2, KEY3};
pub use seven_seg::{SegmentDisplay, SegmentSlot};
pub use timer::TickTimer;
pub use watchdog::Watchdog;
pub use wav::{WavError, WavHeader};
