//! Game loop errors.

use crate::session::GameState;

/// Fatal errors surfaced by [`Controller::step`](crate::Controller::step).
///
/// Collaborator errors are logged where they occur and erased here, so the
/// controller's API does not depend on any driver's error type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum GameError {
    /// The screen renderer failed.
    Render,
    /// The audio sink failed.
    Audio,
    /// A transition not in the state table was attempted.
    IllegalTransition {
        /// Current state.
        from: GameState,
        /// Requested state.
        to: GameState,
    },
}

impl core::fmt::Display for GameError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Render => f.write_str("screen rendering failed"),
            Self::Audio => f.write_str("audio playback failed"),
            Self::IllegalTransition { from, to } => {
                write!(f, "illegal transition {} -> {}", from.label(), to.label())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_both_states() {
        let err = GameError::IllegalTransition {
            from: GameState::Menu,
            to: GameState::Quit,
        };
        assert_eq!(format!("{err}"), "illegal transition Menu -> Quit");
    }

    #[test]
    fn test_display_collaborator_errors() {
        assert_eq!(format!("{}", GameError::Render), "screen rendering failed");
        assert_eq!(format!("{}", GameError::Audio), "audio playback failed");
    }
}
