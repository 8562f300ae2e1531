//! Answer evaluation and feedback instructions.
//!
//! [`evaluate`] is pure: it decides the outcome and describes the feedback
//! (marks to draw, cue to play, score change) without touching any
//! collaborator. The controller carries the instructions out.

use heapless::Vec;

use crate::bank::{Difficulty, Question};

/// Answer captured for one question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum CapturedAnswer {
    /// Choice index (Easy) or digit (Medium/Hard).
    Value(u8),
    /// The countdown expired first.
    Unanswered,
}

impl CapturedAnswer {
    /// Raw encoding of [`Unanswered`](Self::Unanswered), shared by both
    /// answer domains.
    pub const SENTINEL: u8 = 10;

    /// Raw encoding: the value, or [`SENTINEL`](Self::SENTINEL).
    pub const fn raw(self) -> u8 {
        match self {
            Self::Value(v) => v,
            Self::Unanswered => Self::SENTINEL,
        }
    }

    /// Inverse of [`raw`](Self::raw).
    pub const fn from_raw(raw: u8) -> Self {
        if raw == Self::SENTINEL {
            Self::Unanswered
        } else {
            Self::Value(raw)
        }
    }
}

/// Verdict on one answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Outcome {
    /// Matches the expected answer.
    Correct,
    /// Does not match.
    Incorrect,
    /// Nothing was captured before the countdown expired.
    Unanswered,
}

/// Audio cue to play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cue {
    /// Jingle.
    Correct,
    /// Buzzer.
    Incorrect,
}

/// Glyph colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tint {
    /// Green.
    Correct,
    /// Red.
    Incorrect,
}

/// Where a digit glyph goes on a numeric question screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DigitSlot {
    /// Left: the expected digit.
    Expected,
    /// Right: the player's digit.
    Given,
}

/// One piece of visual feedback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FeedbackMark {
    /// Tick next to choice row `row`.
    Tick {
        /// Choice index.
        row: u8,
    },
    /// Cross next to choice row `row`.
    Cross {
        /// Choice index.
        row: u8,
    },
    /// Tinted digit glyph.
    Digit {
        /// Left or right slot.
        slot: DigitSlot,
        /// Digit 0..=9.
        value: u8,
        /// Green or red.
        tint: Tint,
    },
}

/// Everything the controller does after an answered question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Feedback {
    /// Marks to draw, in order.
    pub marks: Vec<FeedbackMark, 2>,
    /// Cue to play.
    pub cue: Cue,
    /// Points to add (0 or 1).
    pub score_delta: u32,
}

/// Result of [`evaluate`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
    /// Verdict.
    pub outcome: Outcome,
    /// Expected choice index or digit.
    pub correct_value: u8,
    /// `None` exactly when the question went unanswered.
    pub feedback: Option<Feedback>,
}

/// Compare `captured` with the expected answer of `question`.
///
/// An unanswered question short-circuits: no marks, no cue, no score change.
pub fn evaluate(difficulty: Difficulty, question: &Question, captured: CapturedAnswer) -> Evaluation {
    let correct_value = question.answer.value();

    let CapturedAnswer::Value(given) = captured else {
        tracing::debug!(correct_value, "unanswered, skipping feedback");
        return Evaluation {
            outcome: Outcome::Unanswered,
            correct_value,
            feedback: None,
        };
    };

    let is_correct = given == correct_value;
    let mut marks = Vec::new();
    // Two marks at most, so neither push can fail.
    if difficulty.is_multiple_choice() {
        marks.push(FeedbackMark::Tick { row: correct_value }).ok();
        if !is_correct {
            marks.push(FeedbackMark::Cross { row: given }).ok();
        }
    } else {
        marks
            .push(FeedbackMark::Digit {
                slot: DigitSlot::Expected,
                value: correct_value,
                tint: Tint::Correct,
            })
            .ok();
        marks
            .push(FeedbackMark::Digit {
                slot: DigitSlot::Given,
                value: given,
                tint: if is_correct { Tint::Correct } else { Tint::Incorrect },
            })
            .ok();
    }

    let (outcome, cue, score_delta) = if is_correct {
        (Outcome::Correct, Cue::Correct, 1)
    } else {
        (Outcome::Incorrect, Cue::Incorrect, 0)
    };
    tracing::debug!(given, correct_value, is_correct, "answer evaluated");

    Evaluation {
        outcome,
        correct_value,
        feedback: Some(Feedback {
            marks,
            cue,
            score_delta,
        }),
    }
}
