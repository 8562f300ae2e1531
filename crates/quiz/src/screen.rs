//! Screen identifiers and the rendering seam.

use crate::bank::Difficulty;
use crate::evaluator::FeedbackMark;

/// Every full-screen view the game can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Title screen: KEY3 to play, KEY1 to quit.
    Start,
    /// Tier selection.
    SelectLevel,
    /// Question `index` of `difficulty`.
    Question {
        /// Tier.
        difficulty: Difficulty,
        /// Question number within the tier.
        index: usize,
    },
    /// "Continue playing?" prompt.
    ContinuePrompt,
    /// Final score.
    GameOver {
        /// Points scored in the playthrough.
        score: u32,
    },
}

/// Draws screens and answer feedback on the LCD.
///
/// Failures are fatal to the game loop; the controller logs and converts
/// them to [`GameError::Render`](crate::GameError::Render).
pub trait ScreenRenderer {
    /// Error type
    type Error: core::fmt::Debug;

    /// Replace the whole panel with `screen`.
    fn render_screen(&mut self, screen: Screen) -> Result<(), Self::Error>;

    /// Draw one feedback mark over the current question screen.
    fn render_feedback(&mut self, mark: FeedbackMark) -> Result<(), Self::Error>;
}
