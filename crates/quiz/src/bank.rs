//! Static question catalog.
//!
//! Three tiers of three questions each. Easy questions are multiple choice
//! (four options, answered with KEY0..KEY3); Medium and Hard questions take a
//! single digit set on the slide switches.

/// Questions in every tier.
pub const QUESTIONS_PER_TIER: usize = 3;

/// Difficulty tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Difficulty {
    /// Multiple choice arithmetic.
    Easy,
    /// Single-digit algebra.
    Medium,
    /// Single-digit algebra and calculus.
    Hard,
}

impl Difficulty {
    /// All tiers, in selection order (KEY0, KEY1, KEY2).
    pub const ALL: [Self; 3] = [Self::Easy, Self::Medium, Self::Hard];

    /// Human-readable name.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// `true` when answers are captured as a choice index rather than a digit.
    pub const fn is_multiple_choice(self) -> bool {
        matches!(self, Self::Easy)
    }

    const fn tier(self) -> usize {
        match self {
            Self::Easy => 0,
            Self::Medium => 1,
            Self::Hard => 2,
        }
    }
}

/// Expected answer of a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Answer {
    /// Index (0..=3) of the correct option.
    Choice(u8),
    /// Correct digit (0..=9).
    Numeric(u8),
}

impl Answer {
    /// Raw expected value: choice index or digit.
    pub const fn value(self) -> u8 {
        match self {
            Self::Choice(v) | Self::Numeric(v) => v,
        }
    }
}

/// One catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Question {
    /// Question text.
    pub prompt: &'static str,
    /// Options A..D; empty for digit questions.
    pub choices: &'static [&'static str],
    /// Expected answer.
    pub answer: Answer,
}

impl Question {
    const fn choice(prompt: &'static str, choices: &'static [&'static str], correct: u8) -> Self {
        Self {
            prompt,
            choices,
            answer: Answer::Choice(correct),
        }
    }

    const fn numeric(prompt: &'static str, digit: u8) -> Self {
        Self {
            prompt,
            choices: &[],
            answer: Answer::Numeric(digit),
        }
    }
}

/// Read-only catalog indexed by tier and question number.
#[derive(Debug)]
pub struct QuestionBank {
    tiers: [[Question; QUESTIONS_PER_TIER]; 3],
}

static STANDARD: QuestionBank = QuestionBank {
    tiers: [
        [
            Question::choice("What is 6 * 7?", &["42", "36", "48", "30"], 0),
            Question::choice("What is 15 / 3?", &["3", "5", "7", "9"], 1),
            Question::choice("What is 8 * 9?", &["72", "64", "80", "68"], 0),
        ],
        [
            Question::numeric("Solve for x: 3x - 2 = 7", 3),
            Question::numeric("What is the value of 4x when x = 2?", 8),
            Question::numeric("If x - 2 = 5, what is x?", 7),
        ],
        [
            Question::numeric("Find x if 5x = 45", 9),
            Question::numeric("What is the unit digit of 2^8?", 6),
            Question::numeric("Calculate the derivative of x^2 at x = 3", 6),
        ],
    ],
};

impl QuestionBank {
    /// The built-in catalog.
    pub fn standard() -> &'static Self {
        &STANDARD
    }

    /// Question `index` of `difficulty`, or `None` past the end of the tier.
    pub fn get(&self, difficulty: Difficulty, index: usize) -> Option<&Question> {
        self.tiers.get(difficulty.tier())?.get(index)
    }

    /// Number of questions in `difficulty`.
    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.tiers.get(difficulty.tier()).map_or(0, |tier| tier.len())
    }
}
