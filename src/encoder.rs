//! PMOD ENC rotary encoder read straight off three input pins.

use embedded_hal::digital::v2::InputPin;

use crate::peripherals::QuadratureEncoder;

pub struct PinEncoder<A, B, BTN> {
    a: A,
    b: B,
    button: BTN,
}

impl<A, B, BTN> PinEncoder<A, B, BTN>
where
    A: InputPin,
    B: InputPin,
    BTN: InputPin,
{
    pub fn new(a: A, b: B, button: BTN) -> Self {
        PinEncoder { a, b, button }
    }
}

impl<A, B, BTN> QuadratureEncoder for PinEncoder<A, B, BTN>
where
    A: InputPin,
    B: InputPin,
    BTN: InputPin,
{
    /// A channel that fails to read is taken as high, its rest level. The
    /// button is active high and reads as released on error.
    fn read(&mut self) -> (u8, bool) {
        let a = self.a.is_high().unwrap_or(true) as u8;
        let b = self.b.is_high().unwrap_or(true) as u8;
        let pressed = self.button.is_high().unwrap_or(false);
        ((a << 1) | b, pressed)
    }
}
