//! Timed arithmetic quiz: game logic
//!
//! Everything here is hardware-independent and `no_std`. The controller talks
//! to the board only through the [`platform`] traits and the
//! [`ScreenRenderer`] trait defined in [`screen`], so the whole game can be
//! driven on the host with scripted mocks.
//!
//! # Layout
//!
//! - [`bank`] - the fixed question catalog, three questions per tier
//! - [`decoder`] - raw button/switch bitmasks to semantic [`Event`]s
//! - [`countdown`] - per-question seconds counter over a [`platform::TickTimer`]
//! - [`evaluator`] - captured answer vs expected answer, feedback instructions
//! - [`session`] - game state, score and the legal transition table
//! - [`controller`] - busy-poll loops that drive one [`Session`] to completion
//!
//! # Example
//!
//! ```no_run
//! use quiz::{Board, Controller, CueSet, QuizConfig, Session};
//! # fn demo<I, T, W, S, R, A>(board: Board<I, T, W, S, R, A>)
//! # where I: platform::InputLines, T: platform::TickTimer, W: platform::Watchdog,
//! #       S: platform::SegmentDisplay, R: quiz::ScreenRenderer, A: platform::AudioSink {
//! let cues = CueSet { correct: &[], wrong: &[] };
//! let mut controller = Controller::new(board, cues, QuizConfig::default());
//! let mut session = Session::new();
//! controller.run(&mut session).ok();
//! # }
//! ```

// ── Lint policy ─────────────────────────────────────────────────────────────
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(unused_must_use)]
// ────────────────────────────────────────────────────────────────────────────
#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]

pub mod bank;
pub mod config;
pub mod controller;
pub mod countdown;
pub mod decoder;
pub mod error;
pub mod evaluator;
pub mod screen;
pub mod session;

pub use bank::{Answer, Difficulty, Question, QuestionBank, QUESTIONS_PER_TIER};
pub use config::QuizConfig;
pub use controller::{Board, Capture, Controller, CueSet};
pub use countdown::{Countdown, TimerStatus};
pub use decoder::{decode, decode_digit, process_switch_input, Choice, Context, Event, InvalidDigit};
pub use error::GameError;
pub use evaluator::{
    evaluate, CapturedAnswer, Cue, DigitSlot, Evaluation, Feedback, FeedbackMark, Outcome, Tint,
};
pub use screen::{Screen, ScreenRenderer};
pub use session::{GameState, Session};
