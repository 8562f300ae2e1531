//! Raw input lines to semantic events.
//!
//! Decoding is level-triggered: the same held button decodes to the same
//! event on every poll, and the waiting loop that receives it is expected to
//! leave after the first one. There is no debounce or edge detection.
//!
//! Button bits (KEY0..KEY3) mean different things depending on which screen
//! is waiting, so every decode takes a [`Context`].

use platform::{KEY0, KEY1, KEY2, KEY3};

/// Highest digit the switch bank can encode.
pub const MAX_DIGIT: u8 = 9;

/// Multiple-choice option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Choice {
    /// KEY0
    A,
    /// KEY1
    B,
    /// KEY2
    C,
    /// KEY3
    D,
}

impl Choice {
    /// Zero-based option index.
    pub const fn index(self) -> u8 {
        match self {
            Self::A => 0,
            Self::B => 1,
            Self::C => 2,
            Self::D => 3,
        }
    }

    /// Row label shown next to the option.
    pub const fn letter(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
        }
    }
}

/// Decoded input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// An option (or tier) was picked.
    Choice(Choice),
    /// Acknowledge / lock in the current digit.
    Confirm,
    /// Go on playing.
    Continue,
    /// Finish the playthrough.
    End,
    /// Leave the program.
    Quit,
}

/// Which screen is waiting for input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Context {
    /// Start screen: KEY3 continues, KEY1 quits.
    StartMenu,
    /// Tier select: KEY0/KEY1/KEY2 pick Easy/Medium/Hard.
    DifficultySelect,
    /// Easy question: KEY0..KEY3 pick A..D.
    MultipleChoice,
    /// Digit question: KEY0 locks in the switch value.
    DigitEntry,
    /// "Continue?" prompt: KEY3 continues, KEY0 ends.
    ContinuePrompt,
    /// Next-question gate and game-over screen: KEY0 confirms.
    Acknowledge,
}

/// Decode the push-button bitmask for `context`.
///
/// When several qualifying bits are held the first match in the context's
/// priority order wins (Continue before Quit/End, lower keys before higher).
pub fn decode(buttons: u32, context: Context) -> Option<Event> {
    let held = |mask: u32| buttons & mask != 0;
    match context {
        Context::StartMenu => {
            if held(KEY3) {
                Some(Event::Continue)
            } else if held(KEY1) {
                Some(Event::Quit)
            } else {
                None
            }
        }
        Context::DifficultySelect => lowest_key(buttons, &[KEY0, KEY1, KEY2]).map(Event::Choice),
        Context::MultipleChoice => lowest_key(buttons, &[KEY0, KEY1, KEY2, KEY3]).map(Event::Choice),
        Context::ContinuePrompt => {
            if held(KEY3) {
                Some(Event::Continue)
            } else if held(KEY0) {
                Some(Event::End)
            } else {
                None
            }
        }
        Context::DigitEntry | Context::Acknowledge => held(KEY0).then_some(Event::Confirm),
    }
}

fn lowest_key(buttons: u32, keys: &[u32]) -> Option<Choice> {
    const ORDER: [Choice; 4] = [Choice::A, Choice::B, Choice::C, Choice::D];
    keys.iter()
        .zip(ORDER)
        .find(|(mask, _)| buttons & **mask != 0)
        .map(|(_, choice)| choice)
}

/// Switch value that is not exactly one switch among SW0..SW9.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InvalidDigit {
    /// The rejected switch bitmask.
    pub raw: u32,
}

impl core::fmt::Display for InvalidDigit {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "switch value {:#05x} is not a single digit", self.raw)
    }
}

/// Decode a one-hot switch bitmask: `2^i` is digit `i` for `i` in `0..=9`.
pub fn decode_digit(switches: u32) -> Result<u8, InvalidDigit> {
    if switches.is_power_of_two() {
        if let Ok(digit) = u8::try_from(switches.trailing_zeros()) {
            if digit <= MAX_DIGIT {
                return Ok(digit);
            }
        }
    }
    Err(InvalidDigit { raw: switches })
}

/// `Some(i)` iff `switches == 2^i` with `i` in `0..=9`.
pub fn process_switch_input(switches: u32) -> Option<u8> {
    decode_digit(switches).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_start_menu_continue_wins_over_quit() {
        assert_eq!(decode(KEY3 | KEY1, Context::StartMenu), Some(Event::Continue));
        assert_eq!(decode(KEY1, Context::StartMenu), Some(Event::Quit));
        assert_eq!(decode(KEY0 | KEY2, Context::StartMenu), None);
    }

    #[test]
    fn test_difficulty_select_ignores_key3() {
        assert_eq!(decode(KEY3, Context::DifficultySelect), None);
        assert_eq!(decode(KEY2, Context::DifficultySelect), Some(Event::Choice(Choice::C)));
        assert_eq!(
            decode(KEY1 | KEY2, Context::DifficultySelect),
            Some(Event::Choice(Choice::B))
        );
    }

    #[test]
    fn test_multiple_choice_lowest_bit_wins() {
        assert_eq!(decode(KEY3, Context::MultipleChoice), Some(Event::Choice(Choice::D)));
        assert_eq!(
            decode(KEY0 | KEY3, Context::MultipleChoice),
            Some(Event::Choice(Choice::A))
        );
        assert_eq!(decode(0, Context::MultipleChoice), None);
    }

    #[test]
    fn test_continue_prompt() {
        assert_eq!(decode(KEY3 | KEY0, Context::ContinuePrompt), Some(Event::Continue));
        assert_eq!(decode(KEY0, Context::ContinuePrompt), Some(Event::End));
        assert_eq!(decode(KEY1, Context::ContinuePrompt), None);
    }

    #[test]
    fn test_confirm_only_on_key0() {
        assert_eq!(decode(KEY0, Context::Acknowledge), Some(Event::Confirm));
        assert_eq!(decode(KEY0, Context::DigitEntry), Some(Event::Confirm));
        assert_eq!(decode(KEY1 | KEY2 | KEY3, Context::Acknowledge), None);
    }

    #[test]
    fn test_upper_bits_are_not_keys() {
        assert_eq!(decode(1 << 4, Context::MultipleChoice), None);
    }

    #[test]
    fn test_digit_one_hot() {
        assert_eq!(process_switch_input(1), Some(0));
        assert_eq!(process_switch_input(1 << 8), Some(8));
        assert_eq!(process_switch_input(1 << 9), Some(9));
    }

    #[test]
    fn test_digit_rejects_none_many_or_high() {
        assert_eq!(decode_digit(0), Err(InvalidDigit { raw: 0 }));
        assert_eq!(process_switch_input(0b11), None);
        assert_eq!(process_switch_input(1 << 10), None);
        assert_eq!(process_switch_input(u32::MAX), None);
    }

    #[test]
    fn test_choice_index_and_letter() {
        assert_eq!(Choice::C.index(), 2);
        assert_eq!(Choice::D.letter(), 'D');
    }
}
