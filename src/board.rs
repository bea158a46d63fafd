//! micro:bit v2 side of the wiring.
//!
//! | signal      | edge pin | nRF52833 |
//! |-------------|----------|----------|
//! | ENC A       | P0       | P0.02    |
//! | ENC B       | P1       | P0.03    |
//! | ENC BTN     | P2       | P0.04    |
//! | LCD RS      | P8       | P0.10    |
//! | LCD E       | P9       | P0.09    |
//! | LCD D4      | P12      | P0.12    |
//! | LCD D5      | P16      | P1.02    |
//! | LCD D6      | P19      | P0.26    |
//! | LCD D7      | P20      | P1.00    |
//! | 7-seg SCK   | P13      | P0.17    |
//! | 7-seg latch | P14      | P0.01    |
//! | 7-seg MOSI  | P15      | P0.13    |
//!
//! The hunger bar is the top row of the LED matrix, the heartbeat is its
//! rightmost LED.

use embedded_hal::digital::v2::OutputPin;
use microbit::hal::gpio::{Input, Output, Pin, PullUp, PushPull};
use pet_alive::encoder::PinEncoder;
use pet_alive::peripherals::LedBar;

pub type OutPin = Pin<Output<PushPull>>;
pub type InPin = Pin<Input<PullUp>>;

pub type Encoder = PinEncoder<InPin, InPin, InPin>;
pub type Heartbeat = ActiveLow<OutPin>;

/// Swaps the sense of an output, for LEDs wired between a pin and VDD.
pub struct ActiveLow<P>(pub P);

impl<P: OutputPin> OutputPin for ActiveLow<P> {
    type Error = P::Error;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.0.set_low()
    }
}

/// Matrix row 1 held high; a column LED lights when its pin is pulled low.
pub struct MatrixBar {
    _row: OutPin,
    cols: [OutPin; 4],
}

impl MatrixBar {
    pub fn new(mut row: OutPin, cols: [OutPin; 4]) -> Self {
        let _ = row.set_high();
        let mut bar = MatrixBar { _row: row, cols };
        bar.set_mask(0);
        bar
    }
}

impl LedBar for MatrixBar {
    fn set_mask(&mut self, mask: u8) {
        for (n, col) in self.cols.iter_mut().enumerate() {
            let _ = if mask & (1 << n) != 0 {
                col.set_low()
            } else {
                col.set_high()
            };
        }
    }
}
