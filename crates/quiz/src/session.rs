//! Game state and the legal transition table.
//!
//! `Session` is a plain value owned by the caller and lent to the controller
//! by `&mut`. Its mutators are crate-private: only the controller moves the
//! game forward, and every state change goes through
//! [`Session::transition`], which rejects edges missing from the table.

use crate::bank::{Difficulty, QUESTIONS_PER_TIER};
use crate::error::GameError;
use crate::evaluator::CapturedAnswer;

/// Phase of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameState {
    /// Title screen.
    StartMenu,
    /// Transient welcome step.
    Menu,
    /// Tier selection.
    SelectDifficulty,
    /// Answering the current tier's questions.
    InProgress,
    /// Tier finished, play on or end.
    AskContinue,
    /// Final score shown.
    End,
    /// Terminal.
    Quit,
}

impl GameState {
    /// Name for logs and error messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::StartMenu => "StartMenu",
            Self::Menu => "Menu",
            Self::SelectDifficulty => "SelectDifficulty",
            Self::InProgress => "InProgress",
            Self::AskContinue => "AskContinue",
            Self::End => "End",
            Self::Quit => "Quit",
        }
    }

    /// `true` if `next` is a legal successor of `self`.
    ///
    /// ```text
    /// StartMenu        -> Menu | Quit
    /// Menu             -> SelectDifficulty
    /// SelectDifficulty -> InProgress
    /// InProgress       -> AskContinue
    /// AskContinue      -> SelectDifficulty | End
    /// End              -> StartMenu
    /// Quit             -> (none)
    /// ```
    pub const fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::StartMenu, Self::Menu | Self::Quit)
                | (Self::Menu | Self::AskContinue, Self::SelectDifficulty)
                | (Self::SelectDifficulty, Self::InProgress)
                | (Self::InProgress, Self::AskContinue)
                | (Self::AskContinue, Self::End)
                | (Self::End, Self::StartMenu)
        )
    }

    /// `true` for [`Quit`](Self::Quit).
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Quit)
    }
}

/// One run of the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    state: GameState,
    difficulty: Difficulty,
    question_index: usize,
    score: u32,
    answers: [Option<CapturedAnswer>; QUESTIONS_PER_TIER],
}

impl Session {
    /// Fresh session on the start menu.
    pub const fn new() -> Self {
        Self {
            state: GameState::StartMenu,
            difficulty: Difficulty::Easy,
            question_index: 0,
            score: 0,
            answers: [None; QUESTIONS_PER_TIER],
        }
    }

    /// Current phase.
    pub const fn state(&self) -> GameState {
        self.state
    }

    /// Tier of the current (or last) playthrough.
    pub const fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Index of the question being asked, or `QUESTIONS_PER_TIER` once the
    /// tier is finished.
    pub const fn question_index(&self) -> usize {
        self.question_index
    }

    /// Points scored since the start menu.
    pub const fn score(&self) -> u32 {
        self.score
    }

    /// Answer captured for question `index` of the current tier, if any.
    pub fn answer(&self, index: usize) -> Option<CapturedAnswer> {
        self.answers.get(index).copied().flatten()
    }

    /// `true` once every question of the tier has been asked.
    pub const fn tier_finished(&self) -> bool {
        self.question_index >= QUESTIONS_PER_TIER
    }

    /// Move to `next`, applying the entry bookkeeping of that edge.
    ///
    /// - `AskContinue -> SelectDifficulty` rewinds to question 0.
    /// - `SelectDifficulty -> InProgress` clears captured answers.
    /// - `End -> StartMenu` resets the whole playthrough, score included.
    pub(crate) fn transition(&mut self, next: GameState) -> Result<(), GameError> {
        let from = self.state;
        if !from.can_transition_to(next) {
            tracing::warn!(from = from.label(), to = next.label(), "illegal transition");
            return Err(GameError::IllegalTransition { from, to: next });
        }
        match (from, next) {
            (GameState::AskContinue, GameState::SelectDifficulty) => self.question_index = 0,
            (GameState::SelectDifficulty, GameState::InProgress) => {
                self.answers = [None; QUESTIONS_PER_TIER];
            }
            (GameState::End, GameState::StartMenu) => *self = Self::new(),
            _ => {}
        }
        self.state = next;
        tracing::info!(from = from.label(), to = next.label(), "state transition");
        Ok(())
    }

    pub(crate) fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub(crate) fn record_answer(&mut self, answer: CapturedAnswer) {
        if let Some(slot) = self.answers.get_mut(self.question_index) {
            *slot = Some(answer);
        }
    }

    pub(crate) fn add_score(&mut self, delta: u32) {
        self.score = self.score.saturating_add(delta);
    }

    /// Step to the next question; returns `true` when the tier is finished.
    pub(crate) fn advance_question(&mut self) -> bool {
        if !self.tier_finished() {
            self.question_index = self.question_index.saturating_add(1);
        }
        self.tier_finished()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
