//! LT24 (ILI9341) LCD on the JP1 header.
//!
//! Commands go to the controller's command register and parameters/pixels to
//! its data register. Pixels are streamed in RGB565 inside an address window.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
use platform::Watchdog;

use super::ports::{HpsWatchdog, PrivateTimer};
use super::{Register, LT24_BASE};
use crate::display::{LCD_HEIGHT, LCD_WIDTH};

const SOFTWARE_RESET: u8 = 0x01;
const SLEEP_OUT: u8 = 0x11;
const DISPLAY_ON: u8 = 0x29;
const COLUMN_ADDRESS_SET: u8 = 0x2A;
const PAGE_ADDRESS_SET: u8 = 0x2B;
const MEMORY_WRITE: u8 = 0x2C;
const MEMORY_ACCESS_CONTROL: u8 = 0x36;
const PIXEL_FORMAT_SET: u8 = 0x3A;

/// Portrait, BGR panel order.
const MADCTL_PORTRAIT_BGR: u16 = 0x48;
/// 16 bits per pixel on the parallel bus.
const PIXEL_FORMAT_RGB565: u16 = 0x55;

/// LT24 panel driver.
#[derive(Debug)]
pub struct Lt24 {
    command: Register,
    data: Register,
    watchdog: HpsWatchdog,
}

impl Lt24 {
    /// Reset and configure the panel, then switch it on.
    ///
    /// `ticks_per_ms` is the rate of `timer`; the controller needs 120 ms
    /// after reset and after leaving sleep.
    pub fn init(timer: &mut PrivateTimer, ticks_per_ms: u32) -> Self {
        let mut lcd = Self {
            command: Register::at(LT24_BASE, 0x0),
            data: Register::at(LT24_BASE, 0x2),
            watchdog: HpsWatchdog::new(),
        };
        let settle = ticks_per_ms.saturating_mul(120);

        lcd.write_command(SOFTWARE_RESET);
        timer.delay(settle, &mut lcd.watchdog);
        lcd.write_command(SLEEP_OUT);
        timer.delay(settle, &mut lcd.watchdog);
        lcd.write_command(PIXEL_FORMAT_SET);
        lcd.write_data(PIXEL_FORMAT_RGB565);
        lcd.write_command(MEMORY_ACCESS_CONTROL);
        lcd.write_data(MADCTL_PORTRAIT_BGR);
        lcd.write_command(DISPLAY_ON);
        tracing::info!("LT24 ready");
        lcd
    }

    fn write_command(&mut self, command: u8) {
        self.command.write_half(u16::from(command));
    }

    fn write_data(&mut self, value: u16) {
        self.data.write_half(value);
    }

    fn write_range(&mut self, command: u8, start: u16, end: u16) {
        self.write_command(command);
        for byte in start.to_be_bytes().into_iter().chain(end.to_be_bytes()) {
            self.write_data(u16::from(byte));
        }
    }

    /// Open a write window on `area` (already clipped to the panel).
    fn set_window(&mut self, area: &Rectangle) {
        let Some(bottom_right) = area.bottom_right() else {
            return;
        };
        let x0 = u16::try_from(area.top_left.x).unwrap_or(0);
        let y0 = u16::try_from(area.top_left.y).unwrap_or(0);
        let x1 = u16::try_from(bottom_right.x).unwrap_or(0);
        let y1 = u16::try_from(bottom_right.y).unwrap_or(0);
        self.write_range(COLUMN_ADDRESS_SET, x0, x1);
        self.write_range(PAGE_ADDRESS_SET, y0, y1);
        self.write_command(MEMORY_WRITE);
    }
}

impl OriginDimensions for Lt24 {
    fn size(&self) -> Size {
        Size::new(LCD_WIDTH, LCD_HEIGHT)
    }
}

impl DrawTarget for Lt24 {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let bounds = self.bounding_box();
        for Pixel(point, colour) in pixels {
            if bounds.contains(point) {
                self.set_window(&Rectangle::new(point, Size::new(1, 1)));
                self.write_data(colour.into_storage());
            }
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        self.watchdog.keepalive();
        self.set_window(&area);
        let raw = color.into_storage();
        for _ in area.points() {
            self.write_data(raw);
        }
        self.watchdog.keepalive();
        Ok(())
    }
}
