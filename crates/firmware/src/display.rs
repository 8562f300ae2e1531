//! LCD renderer for the 240×320 LT24 panel
//!
//! Every [`Screen`] is mapped through [`layout`] to a background colour and a
//! fixed set of text items; question screens add the prompt and options from
//! the [`QuestionBank`]. Feedback marks are drawn over the current question
//! screen without clearing it.
//!
//! The renderer is generic over any `DrawTarget<Color = Rgb565>`, so the same
//! code drives the LT24 on hardware and the simulator window on the desktop.

use core::fmt::Write as _;

use embedded_graphics::{
    mono_font::{
        ascii::{FONT_10X20, FONT_9X18},
        MonoTextStyle,
    },
    pixelcolor::Rgb565,
    prelude::*,
    primitives::{Line, PrimitiveStyle, Rectangle},
    text::{Alignment, Baseline, Text, TextStyleBuilder},
};
use embedded_text::{alignment::HorizontalAlignment, style::TextBoxStyleBuilder, TextBox};
use quiz::{Difficulty, DigitSlot, FeedbackMark, QuestionBank, Screen, ScreenRenderer, Tint};

/// Panel width in pixels.
pub const LCD_WIDTH: u32 = 240;
/// Panel height in pixels.
pub const LCD_HEIGHT: u32 = 320;

/// Question screen background (`0xFE2E`).
pub const BACKGROUND: Rgb565 = Rgb565::new(31, 49, 14);
/// Game-over background (`0xFE2D`).
pub const GAME_OVER_BACKGROUND: Rgb565 = Rgb565::new(31, 49, 13);
/// Correct feedback tint (`0x4E4E`).
pub const GREEN: Rgb565 = Rgb565::new(9, 50, 14);
/// Incorrect feedback tint (`0xEA64`).
pub const RED: Rgb565 = Rgb565::new(29, 19, 4);
/// Text colour.
pub const INK: Rgb565 = Rgb565::BLACK;

/// Left edge of the tick/cross column.
pub const MARK_X: i32 = 176;
/// Top of the first choice row.
pub const MARK_TOP: i32 = 147;
/// Vertical distance between choice rows.
pub const ROW_PITCH: i32 = 30;
/// Side of a tick/cross box.
pub const MARK_SIZE: u32 = 15;

/// Left edge of the expected-digit box.
pub const EXPECTED_X: i32 = 12;
/// Left edge of the given-digit box.
pub const GIVEN_X: i32 = 188;
/// Top of both digit boxes.
pub const DIGIT_Y: i32 = 250;
/// Side of a digit box.
pub const DIGIT_SIZE: u32 = 40;

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];
const LETTERS: [&str; 4] = ["A", "B", "C", "D"];

/// Static part of a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Fill colour.
    pub background: Rgb565,
    /// Centred headline.
    pub title: &'static str,
    /// Key hints, one per line.
    pub hints: &'static [&'static str],
    /// Top of the first hint line.
    pub hint_top: i32,
}

/// Look up the static layout of `screen`.
pub const fn layout(screen: Screen) -> Layout {
    match screen {
        Screen::Start => Layout {
            background: BACKGROUND,
            title: "MATH QUIZ",
            hints: &["KEY3  Play", "KEY1  Quit"],
            hint_top: 230,
        },
        Screen::SelectLevel => Layout {
            background: BACKGROUND,
            title: "Select level",
            hints: &["KEY0  Easy", "KEY1  Medium", "KEY2  Hard"],
            hint_top: 230,
        },
        Screen::Question {
            difficulty: Difficulty::Easy,
            ..
        } => Layout {
            background: BACKGROUND,
            title: "Easy",
            hints: &[],
            hint_top: 298,
        },
        Screen::Question {
            difficulty: Difficulty::Medium,
            ..
        } => Layout {
            background: BACKGROUND,
            title: "Medium",
            hints: &["Switch digit, KEY0"],
            hint_top: 298,
        },
        Screen::Question {
            difficulty: Difficulty::Hard,
            ..
        } => Layout {
            background: BACKGROUND,
            title: "Hard",
            hints: &["Switch digit, KEY0"],
            hint_top: 298,
        },
        Screen::ContinuePrompt => Layout {
            background: BACKGROUND,
            title: "Continue playing?",
            hints: &["KEY3  Continue", "KEY0  End"],
            hint_top: 230,
        },
        Screen::GameOver { .. } => Layout {
            background: GAME_OVER_BACKGROUND,
            title: "GAME OVER",
            hints: &["KEY0  Start menu"],
            hint_top: 230,
        },
    }
}

/// Top-left corner of the tick/cross box for choice `row`.
pub fn mark_origin(row: u8) -> Point {
    let offset = ROW_PITCH.saturating_mul(i32::from(row));
    Point::new(MARK_X, MARK_TOP.saturating_add(offset))
}

fn offset(origin: Point, dx: i32, dy: i32) -> Point {
    Point::new(origin.x.saturating_add(dx), origin.y.saturating_add(dy))
}

/// Top-left corner of a digit box.
pub const fn digit_origin(slot: DigitSlot) -> Point {
    match slot {
        DigitSlot::Expected => Point::new(EXPECTED_X, DIGIT_Y),
        DigitSlot::Given => Point::new(GIVEN_X, DIGIT_Y),
    }
}

/// Feedback colour of `tint`.
pub const fn tint_colour(tint: Tint) -> Rgb565 {
    match tint {
        Tint::Correct => GREEN,
        Tint::Incorrect => RED,
    }
}

/// Draws quiz screens on an RGB565 target.
pub struct LcdRenderer<D> {
    target: D,
    bank: &'static QuestionBank,
}

impl<D> LcdRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
{
    /// Render onto `target` with the standard question catalog.
    pub fn new(target: D) -> Self {
        Self {
            target,
            bank: QuestionBank::standard(),
        }
    }

    /// Borrow the draw target.
    pub fn target(&self) -> &D {
        &self.target
    }

    /// Mutably borrow the draw target.
    pub fn target_mut(&mut self) -> &mut D {
        &mut self.target
    }

    /// Release the draw target.
    pub fn into_target(self) -> D {
        self.target
    }

    fn draw_title(&mut self, title: &str) -> Result<(), D::Error> {
        let style = MonoTextStyle::new(&FONT_10X20, INK);
        let centre = i32::try_from(LCD_WIDTH / 2).unwrap_or(120);
        Text::with_alignment(title, Point::new(centre, 36), style, Alignment::Center)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn draw_hints(&mut self, hints: &[&str], top: i32) -> Result<(), D::Error> {
        let style = MonoTextStyle::new(&FONT_9X18, INK);
        let text_style = TextStyleBuilder::new().baseline(Baseline::Top).build();
        let mut y = top;
        for hint in hints {
            Text::with_text_style(hint, Point::new(40, y), style, text_style)
                .draw(&mut self.target)?;
            y = y.saturating_add(24);
        }
        Ok(())
    }

    fn draw_prompt(&mut self, prompt: &str, area: Rectangle) -> Result<(), D::Error> {
        let character_style = MonoTextStyle::new(&FONT_9X18, INK);
        let textbox_style = TextBoxStyleBuilder::new()
            .alignment(HorizontalAlignment::Center)
            .build();
        TextBox::with_textbox_style(prompt, area, character_style, textbox_style)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn draw_question(&mut self, difficulty: Difficulty, index: usize) -> Result<(), D::Error> {
        let Some(question) = self.bank.get(difficulty, index) else {
            tracing::warn!(tier = difficulty.label(), index, "no such question to draw");
            return Ok(());
        };

        if difficulty.is_multiple_choice() {
            self.draw_prompt(
                question.prompt,
                Rectangle::new(Point::new(16, 59), Size::new(208, 80)),
            )?;
            let style = MonoTextStyle::new(&FONT_9X18, INK);
            let text_style = TextStyleBuilder::new().baseline(Baseline::Top).build();
            for (row, (choice, letter)) in question.choices.iter().zip(LETTERS).enumerate() {
                let top = mark_origin(u8::try_from(row).unwrap_or(u8::MAX)).y;
                let mut line = heapless::String::<24>::new();
                // Options are short literals; an overlong one is drawn truncated.
                write!(line, "{letter})  {choice}").ok();
                Text::with_text_style(&line, Point::new(40, top), style, text_style)
                    .draw(&mut self.target)?;
            }
        } else {
            self.draw_prompt(
                question.prompt,
                Rectangle::new(Point::new(12, 100), Size::new(215, 120)),
            )?;
        }
        Ok(())
    }

    fn draw_score(&mut self, score: u32) -> Result<(), D::Error> {
        let mut line = heapless::String::<24>::new();
        // "Score: " plus ten digits fits the buffer.
        write!(line, "Score: {score}").ok();
        let style = MonoTextStyle::new(&FONT_10X20, INK);
        let centre = i32::try_from(LCD_WIDTH / 2).unwrap_or(120);
        Text::with_alignment(&line, Point::new(centre, 150), style, Alignment::Center)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn draw_tick(&mut self, row: u8) -> Result<(), D::Error> {
        let o = mark_origin(row);
        let style = PrimitiveStyle::with_stroke(GREEN, 2);
        Line::new(offset(o, 1, 8), offset(o, 5, 13))
            .into_styled(style)
            .draw(&mut self.target)?;
        Line::new(offset(o, 5, 13), offset(o, 13, 2))
            .into_styled(style)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn draw_cross(&mut self, row: u8) -> Result<(), D::Error> {
        let o = mark_origin(row);
        let style = PrimitiveStyle::with_stroke(RED, 2);
        Line::new(offset(o, 2, 2), offset(o, 12, 12))
            .into_styled(style)
            .draw(&mut self.target)?;
        Line::new(offset(o, 12, 2), offset(o, 2, 12))
            .into_styled(style)
            .draw(&mut self.target)?;
        Ok(())
    }

    fn draw_digit(&mut self, slot: DigitSlot, value: u8, tint: Tint) -> Result<(), D::Error> {
        let origin = digit_origin(slot);
        let colour = tint_colour(tint);
        let area = Rectangle::new(origin, Size::new(DIGIT_SIZE, DIGIT_SIZE));
        area.into_styled(PrimitiveStyle::with_stroke(colour, 3))
            .draw(&mut self.target)?;

        let glyph = DIGITS.get(usize::from(value)).copied().unwrap_or("?");
        let style = MonoTextStyle::new(&FONT_10X20, colour);
        let text_style = TextStyleBuilder::new()
            .alignment(Alignment::Center)
            .baseline(Baseline::Middle)
            .build();
        Text::with_text_style(glyph, area.center(), style, text_style).draw(&mut self.target)?;
        Ok(())
    }
}

impl<D> ScreenRenderer for LcdRenderer<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    type Error = D::Error;

    fn render_screen(&mut self, screen: Screen) -> Result<(), Self::Error> {
        let layout = layout(screen);
        self.target.clear(layout.background)?;
        self.draw_title(layout.title)?;
        match screen {
            Screen::Question { difficulty, index } => self.draw_question(difficulty, index)?,
            Screen::GameOver { score } => self.draw_score(score)?,
            Screen::Start | Screen::SelectLevel | Screen::ContinuePrompt => {}
        }
        self.draw_hints(layout.hints, layout.hint_top)
    }

    fn render_feedback(&mut self, mark: FeedbackMark) -> Result<(), Self::Error> {
        match mark {
            FeedbackMark::Tick { row } => self.draw_tick(row),
            FeedbackMark::Cross { row } => self.draw_cross(row),
            FeedbackMark::Digit { slot, value, tint } => self.draw_digit(slot, value, tint),
        }
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::arithmetic_side_effects,
    clippy::cast_sign_loss
)]
mod tests {
    use super::*;
    use core::convert::Infallible;

    /// Full-size RGB565 framebuffer.
    struct FrameBuffer {
        pixels: Vec<Rgb565>,
    }

    impl FrameBuffer {
        fn new() -> Self {
            Self {
                pixels: vec![Rgb565::WHITE; (LCD_WIDTH * LCD_HEIGHT) as usize],
            }
        }

        fn at(&self, x: i32, y: i32) -> Rgb565 {
            self.pixels[y as usize * LCD_WIDTH as usize + x as usize]
        }

        fn count_in(&self, area: Rectangle, colour: Rgb565) -> usize {
            area.points().filter(|p| self.at(p.x, p.y) == colour).count()
        }
    }

    impl DrawTarget for FrameBuffer {
        type Color = Rgb565;
        type Error = Infallible;

        fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            for Pixel(p, c) in pixels {
                if self.bounding_box().contains(p) {
                    self.pixels[p.y as usize * LCD_WIDTH as usize + p.x as usize] = c;
                }
            }
            Ok(())
        }
    }

    impl OriginDimensions for FrameBuffer {
        fn size(&self) -> Size {
            Size::new(LCD_WIDTH, LCD_HEIGHT)
        }
    }

    fn mark_box(row: u8) -> Rectangle {
        Rectangle::new(mark_origin(row), Size::new(MARK_SIZE, MARK_SIZE))
    }

    #[test]
    fn test_palette_matches_panel_values() {
        assert_eq!(BACKGROUND.into_storage(), 0xFE2E);
        assert_eq!(GAME_OVER_BACKGROUND.into_storage(), 0xFE2D);
        assert_eq!(GREEN.into_storage(), 0x4E4E);
        assert_eq!(RED.into_storage(), 0xEA64);
    }

    #[test]
    fn test_layout_table_backgrounds() {
        assert_eq!(layout(Screen::Start).background, BACKGROUND);
        assert_eq!(layout(Screen::GameOver { score: 3 }).background, GAME_OVER_BACKGROUND);
        assert_eq!(layout(Screen::SelectLevel).hints.len(), 3);
    }

    #[test]
    fn test_mark_rows_are_thirty_pixels_apart() {
        assert_eq!(mark_origin(0), Point::new(176, 147));
        assert_eq!(mark_origin(2), Point::new(176, 207));
    }

    #[test]
    fn test_question_screen_clears_to_background() {
        let mut lcd = LcdRenderer::new(FrameBuffer::new());
        lcd.render_screen(Screen::Question {
            difficulty: Difficulty::Medium,
            index: 0,
        })
        .unwrap();

        let fb = lcd.target();
        assert_eq!(fb.at(0, 0), BACKGROUND);
        assert_eq!(fb.at(239, 319), BACKGROUND);
        let prompt_area = Rectangle::new(Point::new(12, 100), Size::new(215, 120));
        assert!(fb.count_in(prompt_area, INK) > 0, "prompt should be drawn");
    }

    #[test]
    fn test_game_over_uses_its_own_background() {
        let mut lcd = LcdRenderer::new(FrameBuffer::new());
        lcd.render_screen(Screen::GameOver { score: 7 }).unwrap();
        assert_eq!(lcd.target().at(0, 0), GAME_OVER_BACKGROUND);
    }

    #[test]
    fn test_largest_score_is_drawn_in_full() {
        let band = Rectangle::new(Point::new(0, 120), Size::new(LCD_WIDTH, 60));
        let mut small = LcdRenderer::new(FrameBuffer::new());
        small.render_screen(Screen::GameOver { score: 0 }).unwrap();
        let mut large = LcdRenderer::new(FrameBuffer::new());
        large.render_screen(Screen::GameOver { score: u32::MAX }).unwrap();

        let short = small.target().count_in(band, INK);
        let long = large.target().count_in(band, INK);
        assert!(short > 0);
        assert!(long > short);
    }

    #[test]
    fn test_tick_and_cross_land_in_their_rows() {
        let mut lcd = LcdRenderer::new(FrameBuffer::new());
        lcd.render_screen(Screen::Question {
            difficulty: Difficulty::Easy,
            index: 0,
        })
        .unwrap();
        lcd.render_feedback(FeedbackMark::Tick { row: 0 }).unwrap();
        lcd.render_feedback(FeedbackMark::Cross { row: 1 }).unwrap();

        let fb = lcd.target();
        assert!(fb.count_in(mark_box(0), GREEN) > 0);
        assert_eq!(fb.count_in(mark_box(0), RED), 0);
        assert!(fb.count_in(mark_box(1), RED) > 0);
        assert_eq!(fb.count_in(mark_box(2), GREEN) + fb.count_in(mark_box(2), RED), 0);
    }

    #[test]
    fn test_digit_glyph_is_tinted_in_its_slot() {
        let mut lcd = LcdRenderer::new(FrameBuffer::new());
        lcd.render_feedback(FeedbackMark::Digit {
            slot: DigitSlot::Given,
            value: 4,
            tint: Tint::Incorrect,
        })
        .unwrap();

        let fb = lcd.target();
        let given = Rectangle::new(digit_origin(DigitSlot::Given), Size::new(40, 40));
        let expected = Rectangle::new(digit_origin(DigitSlot::Expected), Size::new(40, 40));
        assert!(fb.count_in(given, RED) > 0);
        assert_eq!(fb.count_in(expected, RED), 0);
    }

    #[test]
    fn test_every_screen_renders() {
        let mut lcd = LcdRenderer::new(FrameBuffer::new());
        let mut screens = vec![
            Screen::Start,
            Screen::SelectLevel,
            Screen::ContinuePrompt,
            Screen::GameOver { score: 99 },
        ];
        for difficulty in Difficulty::ALL {
            for index in 0..4 {
                screens.push(Screen::Question { difficulty, index });
            }
        }
        for screen in screens {
            assert!(lcd.render_screen(screen).is_ok());
        }
    }
}
