//! Session controller: the busy-poll loops that drive a [`Session`].
//!
//! Every wait in here is an explicit loop that feeds the watchdog once per
//! iteration before touching any input. Navigation waits have no timeout;
//! only the per-question capture is bounded, by the countdown.

use platform::{AudioSink, InputLines, SegmentDisplay, TickTimer, Watchdog};

use crate::bank::{Difficulty, QuestionBank};
use crate::config::QuizConfig;
use crate::countdown::{Countdown, TimerStatus};
use crate::decoder::{decode, decode_digit, Choice, Context, Event};
use crate::error::GameError;
use crate::evaluator::{evaluate, CapturedAnswer, Cue, Evaluation};
use crate::screen::{Screen, ScreenRenderer};
use crate::session::{GameState, Session};

/// The collaborators the controller drives.
pub struct Board<I, T, W, S, R, A> {
    /// Push buttons and slide switches.
    pub input: I,
    /// Free-running tick source for the countdown.
    pub timer: T,
    /// Keep-alive fed inside every poll loop.
    pub watchdog: W,
    /// Score and countdown readouts.
    pub segments: S,
    /// LCD.
    pub renderer: R,
    /// Codec.
    pub audio: A,
}

/// PCM samples for the two feedback cues. An empty slice plays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CueSet<'a> {
    /// Played after a correct answer.
    pub correct: &'a [i16],
    /// Played after an incorrect answer.
    pub wrong: &'a [i16],
}

impl<'a> CueSet<'a> {
    fn samples(&self, cue: Cue) -> &'a [i16] {
        match cue {
            Cue::Correct => self.correct,
            Cue::Incorrect => self.wrong,
        }
    }
}

/// Result of one timed capture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Capture {
    /// What was captured; [`CapturedAnswer::Unanswered`] on timeout.
    pub answer: CapturedAnswer,
    /// `true` when the countdown expired before any qualifying input.
    pub timed_out: bool,
}

/// Drives a [`Session`] through the game's states.
pub struct Controller<'a, I, T, W, S, R, A> {
    board: Board<I, T, W, S, R, A>,
    cues: CueSet<'a>,
    config: QuizConfig,
    bank: &'static QuestionBank,
}

impl<'a, I, T, W, S, R, A> Controller<'a, I, T, W, S, R, A>
where
    I: InputLines,
    T: TickTimer,
    W: Watchdog,
    S: SegmentDisplay,
    R: ScreenRenderer,
    A: AudioSink,
{
    /// Create a controller over the standard question bank.
    pub fn new(board: Board<I, T, W, S, R, A>, cues: CueSet<'a>, config: QuizConfig) -> Self {
        Self {
            board,
            cues,
            config,
            bank: QuestionBank::standard(),
        }
    }

    /// Borrow the collaborators.
    pub fn board(&self) -> &Board<I, T, W, S, R, A> {
        &self.board
    }

    /// Mutably borrow the collaborators.
    pub fn board_mut(&mut self) -> &mut Board<I, T, W, S, R, A> {
        &mut self.board
    }

    /// Give the collaborators back.
    pub fn into_board(self) -> Board<I, T, W, S, R, A> {
        self.board
    }

    /// Run `step` until the session reaches [`GameState::Quit`].
    pub fn run(&mut self, session: &mut Session) -> Result<(), GameError> {
        while !session.state().is_terminal() {
            self.step(session)?;
        }
        tracing::info!("exiting the game");
        Ok(())
    }

    /// Run the handler of the current state once and return the new state.
    ///
    /// `InProgress` handles a single question per step. `Quit` is a no-op.
    pub fn step(&mut self, session: &mut Session) -> Result<GameState, GameError> {
        match session.state() {
            GameState::StartMenu => self.start_menu(session)?,
            GameState::Menu => {
                tracing::info!("welcome to the math quiz");
                session.transition(GameState::SelectDifficulty)?;
            }
            GameState::SelectDifficulty => self.select_difficulty(session)?,
            GameState::InProgress => self.play_question(session)?,
            GameState::AskContinue => self.ask_continue(session)?,
            GameState::End => self.game_over(session)?,
            GameState::Quit => {}
        }
        Ok(session.state())
    }

    fn start_menu(&mut self, session: &mut Session) -> Result<(), GameError> {
        self.render(Screen::Start)?;
        self.board.segments.set_single(self.config.score_slot, 0);
        let next = self.wait_for(Context::StartMenu, |event| match event {
            Event::Continue => Some(GameState::Menu),
            Event::Quit => Some(GameState::Quit),
            _ => None,
        });
        session.transition(next)
    }

    fn select_difficulty(&mut self, session: &mut Session) -> Result<(), GameError> {
        self.render(Screen::SelectLevel)?;
        let difficulty = self.wait_for(Context::DifficultySelect, |event| match event {
            Event::Choice(Choice::A) => Some(Difficulty::Easy),
            Event::Choice(Choice::B) => Some(Difficulty::Medium),
            Event::Choice(Choice::C) => Some(Difficulty::Hard),
            _ => None,
        });
        tracing::info!(difficulty = difficulty.label(), "difficulty selected");
        session.set_difficulty(difficulty);
        self.board.timer.reset_reference();
        session.transition(GameState::InProgress)
    }

    fn play_question(&mut self, session: &mut Session) -> Result<(), GameError> {
        let difficulty = session.difficulty();
        let index = session.question_index();
        let bank = self.bank;
        let Some(question) = bank.get(difficulty, index) else {
            return session.transition(GameState::AskContinue);
        };

        self.render(Screen::Question { difficulty, index })?;
        tracing::info!(difficulty = difficulty.label(), index, prompt = question.prompt, "question");

        let capture = self.capture_answer(difficulty);
        session.record_answer(capture.answer);

        let evaluation = evaluate(difficulty, question, capture.answer);
        self.apply_feedback(session, &evaluation)?;

        if !capture.timed_out {
            self.wait_for(Context::Acknowledge, |event| {
                (event == Event::Confirm).then_some(())
            });
        }

        if session.advance_question() {
            session.transition(GameState::AskContinue)?;
        }
        Ok(())
    }

    /// Timed capture for one question.
    ///
    /// Each iteration feeds the watchdog, polls the countdown, then the
    /// input lines. Multiple choice takes the first held KEY0..KEY3. Digit
    /// entry is two-phase: the switch value is validated every iteration
    /// and a KEY0 press locks in the last valid digit; KEY0 with an invalid
    /// switch value is ignored.
    pub fn capture_answer(&mut self, difficulty: Difficulty) -> Capture {
        let mut countdown = Countdown::new(self.config.ticks_per_second, self.config.countdown_slot);
        countdown.start(
            self.config.countdown_seconds,
            &mut self.board.timer,
            &mut self.board.segments,
        );

        let mut held_digit: Option<u8> = None;
        let mut last_switches: Option<u32> = None;

        loop {
            self.board.watchdog.keepalive();

            if countdown.poll(&mut self.board.timer, &mut self.board.segments) == TimerStatus::Expired {
                tracing::info!("time is up");
                return Capture {
                    answer: CapturedAnswer::Unanswered,
                    timed_out: true,
                };
            }

            if difficulty.is_multiple_choice() {
                let buttons = self.board.input.read_buttons();
                if let Some(Event::Choice(choice)) = decode(buttons, Context::MultipleChoice) {
                    tracing::debug!(choice = %choice.letter(), "choice captured");
                    return Capture {
                        answer: CapturedAnswer::Value(choice.index()),
                        timed_out: false,
                    };
                }
                continue;
            }

            let switches = self.board.input.read_switches();
            if last_switches != Some(switches) {
                last_switches = Some(switches);
                held_digit = match decode_digit(switches) {
                    Ok(digit) => {
                        tracing::debug!(digit, "switch input noted");
                        Some(digit)
                    }
                    Err(err) => {
                        tracing::debug!(raw = err.raw, "enter a single digit on the switches");
                        None
                    }
                };
            }

            let buttons = self.board.input.read_buttons();
            if decode(buttons, Context::DigitEntry) == Some(Event::Confirm) {
                if let Some(digit) = held_digit {
                    return Capture {
                        answer: CapturedAnswer::Value(digit),
                        timed_out: false,
                    };
                }
            }
        }
    }

    fn apply_feedback(&mut self, session: &mut Session, evaluation: &Evaluation) -> Result<(), GameError> {
        let Some(feedback) = &evaluation.feedback else {
            return Ok(());
        };

        for mark in &feedback.marks {
            self.board.renderer.render_feedback(*mark).map_err(|err| {
                tracing::warn!(error = ?err, "feedback render failed");
                GameError::Render
            })?;
        }

        if feedback.score_delta > 0 {
            session.add_score(feedback.score_delta);
            self.board.segments.set_single(self.config.score_slot, session.score());
            tracing::info!(score = session.score(), "correct");
        } else {
            tracing::info!(correct_value = evaluation.correct_value, "incorrect");
        }

        self.play_cue(feedback.cue)
    }

    fn ask_continue(&mut self, session: &mut Session) -> Result<(), GameError> {
        self.render(Screen::ContinuePrompt)?;
        self.board.segments.set_single(self.config.score_slot, session.score());
        let next = self.wait_for(Context::ContinuePrompt, |event| match event {
            Event::Continue => Some(GameState::SelectDifficulty),
            Event::End => Some(GameState::End),
            _ => None,
        });
        session.transition(next)
    }

    fn game_over(&mut self, session: &mut Session) -> Result<(), GameError> {
        let score = session.score();
        self.render(Screen::GameOver { score })?;
        self.wait_for(Context::Acknowledge, |event| (event == Event::Confirm).then_some(()));
        tracing::info!(score, "game over");
        session.transition(GameState::StartMenu)
    }

    /// Poll the buttons until `accept` maps a decoded event to a value.
    fn wait_for<U>(&mut self, context: Context, mut accept: impl FnMut(Event) -> Option<U>) -> U {
        loop {
            self.board.watchdog.keepalive();
            let buttons = self.board.input.read_buttons();
            if let Some(value) = decode(buttons, context).and_then(&mut accept) {
                return value;
            }
        }
    }

    fn render(&mut self, screen: Screen) -> Result<(), GameError> {
        self.board.renderer.render_screen(screen).map_err(|err| {
            tracing::warn!(error = ?err, "screen render failed");
            GameError::Render
        })
    }

    fn play_cue(&mut self, cue: Cue) -> Result<(), GameError> {
        let samples = self.cues.samples(cue);
        if samples.is_empty() {
            tracing::debug!("cue not loaded, skipping playback");
            return Ok(());
        }
        self.board.watchdog.keepalive();
        let result = self.board.audio.play(samples).map_err(|err| {
            tracing::warn!(error = ?err, "cue playback failed");
            GameError::Audio
        });
        self.board.watchdog.keepalive();
        result
    }
}
