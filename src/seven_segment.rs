//! Four-digit common-anode seven-segment module behind a pair of shift
//! registers. Each byte is clocked out on SPI and latched on the rising edge
//! of the select line.

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::blocking::spi::Write;
use embedded_hal::digital::v2::OutputPin;
use heapless::Vec;

use crate::peripherals::DigitDisplay;

/// Segment patterns for 0..=9, active low.
const PATTERNS: [u8; 10] = [0xC0, 0xF9, 0xA4, 0xB0, 0x99, 0x92, 0x82, 0xF8, 0x80, 0x98];

const DIGITS: usize = 4;

#[derive(Debug, Eq, PartialEq)]
pub enum Error<S, P> {
    Spi(S),
    Latch(P),
}

pub struct SevenSegment<SPI, L, D> {
    spi: SPI,
    latch: L,
    delay: D,
}

/// Decimal digits of `value`, least significant first. Only the lowest four
/// fit on the module.
fn digits(mut value: u32) -> Vec<u8, DIGITS> {
    let mut out = Vec::new();
    while value != 0 && !out.is_full() {
        // can't fail, capacity checked above
        let _ = out.push((value % 10) as u8);
        value /= 10;
    }
    out
}

impl<SPI, L, D, S, P> SevenSegment<SPI, L, D>
where
    SPI: Write<u8, Error = S>,
    L: OutputPin<Error = P>,
    D: DelayMs<u8>,
{
    pub fn new(spi: SPI, mut latch: L, delay: D) -> Result<Self, Error<S, P>> {
        latch.set_high().map_err(Error::Latch)?;
        Ok(SevenSegment { spi, latch, delay })
    }

    fn send(&mut self, byte: u8) -> Result<(), Error<S, P>> {
        self.latch.set_low().map_err(Error::Latch)?;
        self.spi.write(&[byte]).map_err(Error::Spi)?;
        self.latch.set_high().map_err(Error::Latch)
    }

    /// Multiplex `value` across the digits once.
    pub fn refresh(&mut self, value: u32) -> Result<(), Error<S, P>> {
        if value == 0 {
            self.send(PATTERNS[0])?;
            return self.send(0x01);
        }
        for (place, digit) in digits(value).into_iter().enumerate() {
            self.send(PATTERNS[digit as usize])?;
            self.send(1 << place)?;
            self.delay.delay_ms(1);
        }
        Ok(())
    }
}

impl<SPI, L, D, S, P> DigitDisplay for SevenSegment<SPI, L, D>
where
    SPI: Write<u8, Error = S>,
    L: OutputPin<Error = P>,
    D: DelayMs<u8>,
{
    fn show(&mut self, value: u32) {
        let _ = self.refresh(value);
    }
}
