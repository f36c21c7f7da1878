//! HD44780 character LCD behind a PCF8574 I²C backpack.
//!
//! The backpack maps the expander's eight outputs onto the LCD's control
//! lines and the upper data nibble:
//!
//! ```text
//!  P7 P6 P5 P4 | P3        P2  P1  P0
//!  D7 D6 D5 D4 | backlight EN  RW  RS
//! ```
//!
//! The controller runs in 4-bit mode; every byte goes out as two nibbles,
//! each latched by an EN pulse.  RW is tied low (write-only).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::error::DisplayError;

const RS: u8 = 0b0000_0001;
const EN: u8 = 0b0000_0100;
const BACKLIGHT: u8 = 0b0000_1000;

const CMD_CLEAR: u8 = 0x01;
const CMD_ENTRY_MODE_INC: u8 = 0x06;
const CMD_DISPLAY_ON: u8 = 0x0C;
const CMD_FUNCTION_4BIT_2LINE: u8 = 0x28;
const CMD_SET_DDRAM: u8 = 0x80;

/// DDRAM start address of each row on 20×4 / 16×2 modules.
const ROW_OFFSETS: [u8; 4] = [0x00, 0x40, 0x14, 0x54];

pub struct Lcd<I, D> {
    i2c: I,
    delay: D,
    address: u8,
    cols: u8,
    rows: u8,
    backlight: u8,
}

impl<I: I2c, D: DelayNs> Lcd<I, D> {
    pub fn new(i2c: I, delay: D, address: u8, cols: u8, rows: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            cols,
            rows,
            backlight: BACKLIGHT,
        }
    }

    /// Run the HD44780 4-bit initialisation sequence.
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on wait, then three 8-bit function-set nibbles to sync the
        // controller regardless of the mode it woke up in.
        self.delay.delay_ms(50);
        self.write_expander(self.backlight)?;
        for wait_us in [4_500, 4_500, 150] {
            self.write_nibble(0x30, 0)?;
            self.delay.delay_us(wait_us);
        }
        self.write_nibble(0x20, 0)?;

        self.command(CMD_FUNCTION_4BIT_2LINE)?;
        self.command(CMD_DISPLAY_ON)?;
        self.clear()?;
        self.command(CMD_ENTRY_MODE_INC)
    }

    pub fn clear(&mut self) -> Result<(), DisplayError> {
        self.command(CMD_CLEAR)?;
        // Clear is the one slow instruction.
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn set_backlight(&mut self, on: bool) -> Result<(), DisplayError> {
        self.backlight = if on { BACKLIGHT } else { 0 };
        self.write_expander(self.backlight)
    }

    pub fn set_cursor(&mut self, col: u8, row: u8) -> Result<(), DisplayError> {
        if col >= self.cols || row >= self.rows || row as usize >= ROW_OFFSETS.len() {
            return Err(DisplayError::OutOfBounds);
        }
        self.command(CMD_SET_DDRAM | (ROW_OFFSETS[row as usize] + col))
    }

    /// Print ASCII text at the cursor.  Non-ASCII characters show as `?`.
    pub fn print(&mut self, text: &str) -> Result<(), DisplayError> {
        for ch in text.chars() {
            let byte = if ch.is_ascii() { ch as u8 } else { b'?' };
            self.send(byte, RS)?;
        }
        Ok(())
    }

    pub fn cols(&self) -> u8 {
        self.cols
    }

    pub fn rows(&self) -> u8 {
        self.rows
    }

    pub fn bus(&self) -> &I {
        &self.i2c
    }

    fn command(&mut self, cmd: u8) -> Result<(), DisplayError> {
        self.send(cmd, 0)
    }

    fn send(&mut self, byte: u8, mode: u8) -> Result<(), DisplayError> {
        self.write_nibble(byte & 0xF0, mode)?;
        self.write_nibble((byte << 4) & 0xF0, mode)
    }

    fn write_nibble(&mut self, nibble: u8, mode: u8) -> Result<(), DisplayError> {
        let bits = nibble | mode | self.backlight;
        self.write_expander(bits | EN)?;
        self.delay.delay_us(1);
        self.write_expander(bits)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn write_expander(&mut self, bits: u8) -> Result<(), DisplayError> {
        self.i2c
            .write(self.address, &[bits])
            .map_err(|_| DisplayError::BusWriteFailed)
    }
}
