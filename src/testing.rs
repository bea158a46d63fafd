//! Host-side stand-ins for the board, used by the unit tests.

use core::cell::Cell;
use core::convert::Infallible;

use embedded_hal::blocking::delay::DelayMs;
use embedded_hal::digital::v2::OutputPin;

use crate::peripherals::{CharacterDisplay, DigitDisplay, LedBar, QuadratureEncoder, Scroll};
use crate::state::SharedGameState;
use crate::ticks::{CountdownTick, EncoderTick, PwmTick, Tick};

const REST: u8 = 0b11;
const CLOCKWISE: [u8; 4] = [0b10, 0b00, 0b01, 0b11];
const COUNTER_CLOCKWISE: [u8; 4] = [0b01, 0b00, 0b10, 0b11];
const PRESS_MS: u32 = 20;

/// An encoder that plays back a script, one sample per read.
#[derive(Debug, Default)]
pub struct ScriptedEncoder {
    now: u32,
    phases: Option<Vec<u8>>,
    turns: Vec<(u32, i8)>,
    presses: Vec<(u32, u32)>,
}

impl ScriptedEncoder {
    pub fn new() -> Self {
        ScriptedEncoder::default()
    }

    /// Play back raw phases, one per read, resting once they run out.
    pub fn from_phases(phases: Vec<u8>) -> Self {
        ScriptedEncoder {
            phases: Some(phases),
            ..ScriptedEncoder::default()
        }
    }

    /// One detent starting at sample `at`; positive is clockwise.
    pub fn turn(&mut self, at: u32, direction: i8) -> &mut Self {
        self.turns.push((at, direction));
        self
    }

    pub fn press(&mut self, at: u32) -> &mut Self {
        self.presses.push((at, PRESS_MS));
        self
    }

    /// A button bounce lasting `samples` reads.
    pub fn glitch(&mut self, at: u32, samples: u32) -> &mut Self {
        self.presses.push((at, samples));
        self
    }

    fn phase_at(&self, t: u32) -> u8 {
        if let Some(phases) = &self.phases {
            return phases.get(t as usize).copied().unwrap_or(REST);
        }
        self.turns
            .iter()
            .find(|(start, _)| (*start..*start + 4).contains(&t))
            .map(|&(start, direction)| {
                let sequence = if direction > 0 {
                    CLOCKWISE
                } else {
                    COUNTER_CLOCKWISE
                };
                sequence[(t - start) as usize]
            })
            .unwrap_or(REST)
    }
}

impl QuadratureEncoder for ScriptedEncoder {
    fn read(&mut self) -> (u8, bool) {
        let t = self.now;
        self.now += 1;
        let pressed = self
            .presses
            .iter()
            .any(|&(start, len)| t >= start && t < start + len);
        (self.phase_at(t), pressed)
    }
}

/// Counts how often it was driven high.
#[derive(Debug, Default)]
pub struct ProbePin {
    high: Cell<u32>,
}

impl ProbePin {
    pub fn new() -> Self {
        ProbePin::default()
    }

    pub fn reset(&self) {
        self.high.set(0);
    }

    pub fn high_count(&self) -> u32 {
        self.high.get()
    }
}

impl OutputPin for ProbePin {
    type Error = Infallible;

    fn set_low(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.high.set(self.high.get() + 1);
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub enum LcdOp {
    Clear,
    Cursor(u8, u8),
    Text(String),
    Glyph(u8),
    Scroll(Scroll),
    Load(u8),
}

#[derive(Debug, Default)]
pub struct RecordingLcd {
    ops: Vec<LcdOp>,
}

impl RecordingLcd {
    pub fn ops(&self) -> &[LcdOp] {
        &self.ops
    }

    pub fn count(&self, op: &LcdOp) -> usize {
        self.ops.iter().filter(|o| *o == op).count()
    }

    pub fn has_text(&self, text: &str) -> bool {
        self.ops
            .iter()
            .any(|op| matches!(op, LcdOp::Text(t) if t == text))
    }
}

impl CharacterDisplay for RecordingLcd {
    fn clear(&mut self) {
        self.ops.push(LcdOp::Clear);
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.ops.push(LcdOp::Cursor(col, row));
    }

    fn write_str(&mut self, text: &str) {
        self.ops.push(LcdOp::Text(text.into()));
    }

    fn write_glyph(&mut self, code: u8) {
        self.ops.push(LcdOp::Glyph(code));
    }

    fn scroll(&mut self, direction: Scroll) {
        self.ops.push(LcdOp::Scroll(direction));
    }

    fn load_glyph(&mut self, slot: u8, _rows: &[u8; 8]) {
        self.ops.push(LcdOp::Load(slot));
    }
}

#[derive(Debug, Default)]
pub struct RecordingLeds {
    writes: Vec<u8>,
}

impl RecordingLeds {
    pub fn writes(&self) -> &[u8] {
        &self.writes
    }

    /// Writes with consecutive repeats collapsed.
    pub fn distinct(&self) -> Vec<u8> {
        let mut masks = self.writes.clone();
        masks.dedup();
        masks
    }
}

impl LedBar for RecordingLeds {
    fn set_mask(&mut self, mask: u8) {
        self.writes.push(mask);
    }
}

#[derive(Debug, Default)]
pub struct RecordingDigits {
    shown: Vec<u32>,
}

impl RecordingDigits {
    pub fn last(&self) -> Option<u32> {
        self.shown.last().copied()
    }
}

impl DigitDisplay for RecordingDigits {
    fn show(&mut self, value: u32) {
        self.shown.push(value);
    }
}

/// Simulated time. Every millisecond of delay fires each tick task once, in
/// the same order the interrupt priorities give on the board.
pub struct SimClock<'a> {
    encoder: EncoderTick<'a, ScriptedEncoder>,
    countdown: CountdownTick<'a>,
    pwm: PwmTick<'a, ProbePin>,
    now: u32,
}

impl<'a> SimClock<'a> {
    pub fn new(shared: &'a SharedGameState, encoder: ScriptedEncoder) -> Self {
        SimClock {
            encoder: EncoderTick::new(encoder, shared),
            countdown: CountdownTick::new(shared),
            pwm: PwmTick::new(ProbePin::new(), shared),
            now: 0,
        }
    }

    pub fn now_ms(&self) -> u32 {
        self.now
    }
}

impl DelayMs<u32> for SimClock<'_> {
    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.encoder.tick();
            self.countdown.tick();
            self.pwm.tick();
            self.now += 1;
        }
    }
}
