//! Character LCD adapter implementing [`DisplayPort`].
//!
//! Every `write_line` blanks the rest of the row so shorter text never
//! leaves stale characters behind.  Bus errors are logged and dropped.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use log::warn;

use crate::app::ports::DisplayPort;
use crate::drivers::lcd::Lcd;
use crate::error::DisplayError;

pub struct LcdDisplay<I, D> {
    lcd: Lcd<I, D>,
}

impl<I: I2c, D: DelayNs> LcdDisplay<I, D> {
    /// Wrap an already initialised LCD.
    pub fn new(lcd: Lcd<I, D>) -> Self {
        Self { lcd }
    }

    pub fn lcd_mut(&mut self) -> &mut Lcd<I, D> {
        &mut self.lcd
    }

    fn padded_write(&mut self, col: u8, row: u8, text: &str) -> Result<(), DisplayError> {
        let width = usize::from(self.lcd.cols().saturating_sub(col));
        self.lcd.set_cursor(col, row)?;

        let mut written = 0;
        for (i, ch) in text.char_indices() {
            if written == width {
                break;
            }
            self.lcd.print(&text[i..i + ch.len_utf8()])?;
            written += 1;
        }
        for _ in written..width {
            self.lcd.print(" ")?;
        }
        Ok(())
    }
}

impl<I: I2c, D: DelayNs> DisplayPort for LcdDisplay<I, D> {
    fn write_line(&mut self, col: u8, row: u8, text: &str) {
        if let Err(e) = self.padded_write(col, row, text) {
            warn!("LCD row {}: {}", row, e);
        }
    }

    fn clear(&mut self) {
        if let Err(e) = self.lcd.clear() {
            warn!("LCD clear: {}", e);
        }
    }
}
