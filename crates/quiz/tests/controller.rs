//! End-to-end controller behaviour against scripted mocks.

#![allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_possible_truncation
)]

mod common;

use common::*;
use platform::mocks::{InputFrame, ManualTimer, MockAudio};
use platform::{KEY0, KEY1, KEY2, KEY3};
use quiz::{
    CapturedAnswer, Controller, CueSet, Difficulty, DigitSlot, FeedbackMark, GameError, GameState,
    Screen, Session, Tint,
};

/// Step `n` times, asserting each step succeeds.
fn step_n(controller: &mut TestController, session: &mut Session, n: usize) {
    for _ in 0..n {
        controller.step(session).unwrap();
    }
}

fn press(key: u32) -> InputFrame {
    InputFrame::buttons(key)
}

/// StartMenu -> Menu -> SelectDifficulty -> InProgress with `tier_key`.
fn enter_tier_frames(tier_key: u32) -> Vec<InputFrame> {
    vec![press(KEY3), press(tier_key)]
}

#[test]
fn start_menu_zeroes_score_display_and_continues() {
    let mut controller = controller(board(&[press(KEY3)]));
    let mut session = Session::new();

    assert_eq!(controller.step(&mut session).unwrap(), GameState::Menu);
    assert_eq!(controller.board().renderer.screens(), vec![Screen::Start]);
    assert_eq!(controller.board().segments.value_at(SCORE_SLOT), Some(0));
}

#[test]
fn start_menu_quit() {
    let mut controller = controller(board(&[InputFrame::idle(5), press(KEY1)]));
    let mut session = Session::new();

    controller.run(&mut session).unwrap();
    assert_eq!(session.state(), GameState::Quit);
}

#[test]
fn start_menu_continue_wins_when_both_held() {
    let mut controller = controller(board(&[press(KEY3 | KEY1)]));
    let mut session = Session::new();

    assert_eq!(controller.step(&mut session).unwrap(), GameState::Menu);
}

#[test]
fn menu_moves_straight_to_difficulty_select() {
    let mut controller = controller(board(&[press(KEY3)]));
    let mut session = Session::new();
    controller.step(&mut session).unwrap();

    let reads = controller.board().input.button_reads();
    assert_eq!(controller.step(&mut session).unwrap(), GameState::SelectDifficulty);
    assert_eq!(controller.board().input.button_reads(), reads);
}

#[test]
fn difficulty_select_ignores_key3() {
    let mut controller = controller(board(&[press(KEY3), press(KEY3), press(KEY2)]));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 3);
    assert_eq!(session.state(), GameState::InProgress);
    assert_eq!(session.difficulty(), Difficulty::Hard);
}

#[test]
fn easy_wrong_choice_ticks_correct_row_and_crosses_given() {
    let mut frames = enter_tier_frames(KEY0);
    frames.extend([press(KEY1), press(KEY0)]);
    let mut controller = controller(board(&frames));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 4);

    assert_eq!(session.answer(0), Some(CapturedAnswer::Value(1)));
    assert_eq!(session.score(), 0);
    assert_eq!(session.question_index(), 1);
    assert_eq!(
        controller.board().renderer.marks(),
        vec![FeedbackMark::Tick { row: 0 }, FeedbackMark::Cross { row: 1 }]
    );
    assert_eq!(controller.board().audio.played(), &[WRONG_CUE.len()]);
}

#[test]
fn medium_digit_eight_confirmed_scores() {
    let mut frames = enter_tier_frames(KEY1);
    frames.extend([
        // Q0: 3, correct
        InputFrame::switches(1 << 3),
        press(KEY0).with_switches(1 << 3),
        press(KEY0),
        // Q1: 8, correct
        InputFrame::switches(1 << 8),
        press(KEY0).with_switches(1 << 8),
        press(KEY0),
    ]);
    let mut controller = controller(board(&frames));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 5);

    assert_eq!(session.answer(1), Some(CapturedAnswer::Value(8)));
    assert_eq!(session.score(), 2);
    assert_eq!(controller.board().segments.value_at(SCORE_SLOT), Some(2));
    let marks = controller.board().renderer.marks();
    assert_eq!(
        marks.last(),
        Some(&FeedbackMark::Digit { slot: DigitSlot::Given, value: 8, tint: Tint::Correct })
    );
    assert_eq!(controller.board().audio.played(), &[CORRECT_CUE.len(), CORRECT_CUE.len()]);
}

#[test]
fn numeric_wrong_digit_shows_expected_and_given() {
    let mut frames = enter_tier_frames(KEY2);
    frames.extend([press(KEY0).with_switches(1 << 4), press(KEY0)]);
    let mut controller = controller(board(&frames));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 4);

    assert_eq!(
        controller.board().renderer.marks(),
        vec![
            FeedbackMark::Digit { slot: DigitSlot::Expected, value: 9, tint: Tint::Correct },
            FeedbackMark::Digit { slot: DigitSlot::Given, value: 4, tint: Tint::Incorrect },
        ]
    );
    assert_eq!(session.score(), 0);
}

#[test]
fn confirm_with_invalid_switches_is_ignored() {
    let mut frames = enter_tier_frames(KEY1);
    frames.extend([
        press(KEY0).with_switches(0b11).held(3),
        press(KEY0).with_switches(1 << 10),
        press(KEY0),
        press(KEY0).with_switches(1 << 3),
        press(KEY0),
    ]);
    let mut controller = controller(board(&frames));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 4);

    assert_eq!(session.answer(0), Some(CapturedAnswer::Value(3)));
    assert_eq!(session.score(), 1);
}

#[test]
fn timeout_records_sentinel_without_feedback_or_confirm() {
    // Every timer read observes a full second, so the countdown runs out
    // after `countdown_seconds` polls.
    let timer = ManualTimer::auto_advance(TICKS_PER_SECOND);
    let mut controller = controller(board_with_timer(&enter_tier_frames(KEY2), timer));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 4);

    assert_eq!(session.answer(0), Some(CapturedAnswer::Unanswered));
    assert_eq!(session.answer(0).map(CapturedAnswer::raw), Some(10));
    assert_eq!(session.score(), 0);
    assert_eq!(session.question_index(), 1);
    assert!(controller.board().renderer.marks().is_empty());
    assert!(controller.board().audio.played().is_empty());
    assert_eq!(controller.board().segments.value_at(COUNTDOWN_SLOT), Some(0));
}

#[test]
fn easy_timeout_also_uses_sentinel() {
    let timer = ManualTimer::auto_advance(TICKS_PER_SECOND);
    let mut controller = controller(board_with_timer(&enter_tier_frames(KEY0), timer));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 4);

    assert_eq!(session.answer(0), Some(CapturedAnswer::Unanswered));
    assert!(controller.board().renderer.marks().is_empty());
}

#[test]
fn countdown_shows_initial_value_for_each_question() {
    let mut frames = enter_tier_frames(KEY0);
    frames.extend([press(KEY0), press(KEY0)]);
    let mut controller = controller(board(&frames));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 4);
    assert_eq!(controller.board().segments.value_at(COUNTDOWN_SLOT), Some(20));
}

#[test]
fn third_question_moves_to_ask_continue_even_when_wrong() {
    let mut frames = enter_tier_frames(KEY0);
    for _ in 0..3 {
        frames.extend([press(KEY3), press(KEY0)]);
    }
    let mut controller = controller(board(&frames));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 5);
    assert_eq!(session.state(), GameState::InProgress);
    controller.step(&mut session).unwrap();

    assert_eq!(session.state(), GameState::AskContinue);
    assert_eq!(session.score(), 0);
    assert_eq!(session.question_index(), 3);
}

#[test]
fn continue_rewinds_to_difficulty_select_and_keeps_score() {
    let mut frames = enter_tier_frames(KEY0);
    frames.extend([press(KEY0), press(KEY0)]); // 6*7 = 42, A
    frames.extend([press(KEY2), press(KEY0)]);
    frames.extend([press(KEY2), press(KEY0)]);
    frames.push(press(KEY3)); // continue
    let mut controller = controller(board(&frames));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 7);

    assert_eq!(session.state(), GameState::SelectDifficulty);
    assert_eq!(session.question_index(), 0);
    assert_eq!(session.score(), 1);
    assert_eq!(controller.board().segments.value_at(SCORE_SLOT), Some(1));
}

#[test]
fn full_playthrough_to_quit() {
    let mut frames = enter_tier_frames(KEY0);
    frames.extend([press(KEY0), press(KEY0)]);
    frames.extend([press(KEY1), press(KEY0)]);
    frames.extend([press(KEY0), press(KEY0)]);
    frames.push(press(KEY0)); // end
    frames.push(InputFrame::idle(3));
    frames.push(press(KEY0)); // leave game over
    frames.push(press(KEY1)); // quit
    let mut controller = controller(board(&frames));
    let mut session = Session::new();

    controller.run(&mut session).unwrap();

    assert_eq!(session.state(), GameState::Quit);
    assert_eq!(session.score(), 0);
    let screens = controller.board().renderer.screens();
    assert_eq!(
        screens,
        vec![
            Screen::Start,
            Screen::SelectLevel,
            Screen::Question { difficulty: Difficulty::Easy, index: 0 },
            Screen::Question { difficulty: Difficulty::Easy, index: 1 },
            Screen::Question { difficulty: Difficulty::Easy, index: 2 },
            Screen::ContinuePrompt,
            Screen::GameOver { score: 3 },
            Screen::Start,
        ]
    );
    assert_eq!(controller.board().audio.played().len(), 3);
    assert_eq!(controller.board().segments.value_at(SCORE_SLOT), Some(0));
}

#[test]
fn replay_after_game_over_starts_from_first_question() {
    let mut frames = enter_tier_frames(KEY0);
    for _ in 0..3 {
        frames.extend([press(KEY0), press(KEY0)]);
    }
    frames.extend([press(KEY0), press(KEY0)]); // end, leave game over
    frames.extend(enter_tier_frames(KEY1));
    let mut controller = controller(board(&frames));
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 11);

    assert_eq!(session.state(), GameState::InProgress);
    assert_eq!(session.difficulty(), Difficulty::Medium);
    assert_eq!(session.question_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.answer(0), None);
}

#[test]
fn every_poll_iteration_feeds_the_watchdog() {
    let mut frames = vec![InputFrame::idle(7), press(KEY3), InputFrame::idle(4), press(KEY1)];
    frames.extend([InputFrame::switches(1 << 2).held(5), press(KEY0).with_switches(1 << 3)]);
    frames.extend([InputFrame::idle(2), press(KEY0)]);
    let board = board(&frames);
    // No cues: playback would add feeds outside any poll loop.
    let mut controller = Controller::new(board, CueSet::default(), CONFIG);
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 4);

    let board = controller.board();
    assert!(board.input.button_reads() > 0);
    assert_eq!(board.watchdog.feeds(), board.input.button_reads());
}

#[test]
fn render_failure_is_fatal() {
    let mut board = board(&[press(KEY3)]);
    board.renderer = RecordingRenderer::failing();
    let mut controller = controller(board);
    let mut session = Session::new();

    assert_eq!(controller.step(&mut session), Err(GameError::Render));
    assert_eq!(session.state(), GameState::StartMenu);
}

#[test]
fn audio_failure_is_fatal() {
    let mut frames = enter_tier_frames(KEY0);
    frames.push(press(KEY0));
    let mut board = board(&frames);
    board.audio = MockAudio::failing();
    let mut controller = controller(board);
    let mut session = Session::new();

    step_n(&mut controller, &mut session, 3);
    assert_eq!(controller.step(&mut session), Err(GameError::Audio));
}

#[test]
fn capture_answer_reports_timeout_flag() {
    let timer = ManualTimer::auto_advance(TICKS_PER_SECOND);
    let mut controller = controller(board_with_timer(&[], timer));

    let capture = controller.capture_answer(Difficulty::Medium);
    assert!(capture.timed_out);
    assert_eq!(capture.answer, CapturedAnswer::Unanswered);

    let mut board = controller.into_board();
    board.input.push(press(KEY2)).unwrap();
    board.timer = ManualTimer::new();
    let mut controller = Controller::new(board, cues(), CONFIG);
    let capture = controller.capture_answer(Difficulty::Easy);
    assert!(!capture.timed_out);
    assert_eq!(capture.answer, CapturedAnswer::Value(2));
}
