//! HD44780 character LCD, 4-bit bus.

use embedded_hal::blocking::delay::{DelayMs, DelayUs};
use embedded_hal::digital::v2::OutputPin;

use crate::config::{LCD_COLUMNS, LCD_ROWS};
use crate::peripherals::{CharacterDisplay, Scroll};

const CLEAR_DISPLAY: u8 = 0x01;
const RETURN_HOME: u8 = 0x02;
const ENTRY_MODE_SET: u8 = 0x04;
const DISPLAY_CONTROL: u8 = 0x08;
const CURSOR_OR_DISPLAY_SHIFT: u8 = 0x10;
const FUNCTION_SET: u8 = 0x20;
const SET_CGRAM_ADDR: u8 = 0x40;
const SET_DDRAM_ADDR: u8 = 0x80;

const ENTRY_INCREMENT: u8 = 0x02;
const DISPLAY_ON: u8 = 0x04;
const DISPLAY_MOVE: u8 = 0x08;
const MOVE_RIGHT: u8 = 0x04;
const TWO_LINES: u8 = 0x08;
const EIGHT_BIT_MODE: u8 = 0x10;

const ROW_OFFSET: [u8; 2] = [0x00, 0x40];

/// All six bus lines share one pin type; on the nRF52 that is the degraded
/// `Pin<Output<PushPull>>`.
pub struct Hd44780<P, D> {
    rs: P,
    enable: P,
    data: [P; 4],
    delay: D,
}

impl<P, D, E> Hd44780<P, D>
where
    P: OutputPin<Error = E>,
    D: DelayUs<u16> + DelayMs<u16>,
{
    /// Run the power-on reset sequence and leave the display on, cursor off,
    /// cleared, writing left to right.
    pub fn new(rs: P, enable: P, data: [P; 4], delay: D) -> Result<Self, E> {
        let mut lcd = Hd44780 {
            rs,
            enable,
            data,
            delay,
        };
        lcd.delay.delay_ms(500);

        // three times in 8-bit mode, whatever state the controller was left in
        lcd.write_nibble(false, FUNCTION_SET | EIGHT_BIT_MODE)?;
        lcd.delay.delay_us(4_500);
        lcd.write_nibble(false, FUNCTION_SET | EIGHT_BIT_MODE)?;
        lcd.delay.delay_us(4_500);
        lcd.write_nibble(false, FUNCTION_SET | EIGHT_BIT_MODE)?;
        lcd.delay.delay_us(150);
        lcd.write_nibble(false, FUNCTION_SET)?;

        lcd.command(FUNCTION_SET | TWO_LINES)?;
        lcd.command(DISPLAY_CONTROL | DISPLAY_ON)?;
        lcd.command(RETURN_HOME)?;
        lcd.command(CLEAR_DISPLAY)?;
        lcd.command(ENTRY_MODE_SET | ENTRY_INCREMENT)?;
        Ok(lcd)
    }

    /// Put the upper nibble of `bits` on D4..D7 and strobe E.
    fn write_nibble(&mut self, data: bool, bits: u8) -> Result<(), E> {
        if data {
            self.rs.set_high()?;
        } else {
            self.rs.set_low()?;
        }
        for (n, pin) in self.data.iter_mut().enumerate() {
            if bits & (0x10 << n) != 0 {
                pin.set_high()?;
            } else {
                pin.set_low()?;
            }
        }
        self.enable.set_high()?;
        self.delay.delay_us(1);
        self.enable.set_low()?;
        self.delay.delay_us(1_000);
        Ok(())
    }

    fn write_byte(&mut self, data: bool, byte: u8) -> Result<(), E> {
        self.write_nibble(data, byte & 0xF0)?;
        self.write_nibble(data, byte << 4)
    }

    pub fn command(&mut self, command: u8) -> Result<(), E> {
        self.write_byte(false, command)?;
        // clear and home are the slow ones
        if command < 3 {
            self.delay.delay_us(1_520);
        } else {
            self.delay.delay_us(37);
        }
        Ok(())
    }

    pub fn write_data(&mut self, byte: u8) -> Result<(), E> {
        self.write_byte(true, byte)
    }

    pub fn try_clear(&mut self) -> Result<(), E> {
        self.command(CLEAR_DISPLAY)
    }

    pub fn try_set_cursor(&mut self, col: u8, row: u8) -> Result<(), E> {
        if col >= LCD_COLUMNS || row >= LCD_ROWS {
            return Ok(());
        }
        self.command(SET_DDRAM_ADDR | (col + ROW_OFFSET[row as usize]))
    }

    pub fn try_write_str(&mut self, text: &str) -> Result<(), E> {
        text.bytes().try_for_each(|b| self.write_data(b))
    }

    pub fn try_scroll(&mut self, direction: Scroll) -> Result<(), E> {
        let shift = CURSOR_OR_DISPLAY_SHIFT | DISPLAY_MOVE;
        match direction {
            Scroll::Left => self.command(shift),
            Scroll::Right => self.command(shift | MOVE_RIGHT),
        }
    }

    pub fn try_load_glyph(&mut self, slot: u8, rows: &[u8; 8]) -> Result<(), E> {
        self.command(SET_CGRAM_ADDR | ((slot & 0x07) << 3))?;
        rows.iter().try_for_each(|&row| self.write_data(row))
    }
}

impl<P, D, E> CharacterDisplay for Hd44780<P, D>
where
    P: OutputPin<Error = E>,
    D: DelayUs<u16> + DelayMs<u16>,
{
    fn clear(&mut self) {
        let _ = self.try_clear();
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        let _ = self.try_set_cursor(col, row);
    }

    fn write_str(&mut self, text: &str) {
        let _ = self.try_write_str(text);
    }

    fn write_glyph(&mut self, code: u8) {
        let _ = self.write_data(code & 0x07);
    }

    fn scroll(&mut self, direction: Scroll) {
        let _ = self.try_scroll(direction);
    }

    fn load_glyph(&mut self, slot: u8, rows: &[u8; 8]) {
        let _ = self.try_load_glyph(slot, rows);
    }
}
