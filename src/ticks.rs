//! The three 1 kHz tick tasks.
//!
//! Each task is bound to one hardware timer and runs to completion inside its
//! interrupt. None of them block or log, and each one writes only the
//! fields of [`SharedGameState`] it owns.

use embedded_hal::digital::v2::OutputPin;

use crate::config::{BUTTON_DEBOUNCE_SAMPLES, COUNTDOWN_STEP_MS, PWM_PERIOD_FRAMES};
use crate::peripherals::QuadratureEncoder;
use crate::state::{Phase, SharedGameState};

/// Work done on every firing of a periodic timer.
pub trait Tick {
    fn tick(&mut self);
}

/// Quadrature phase the PMOD ENC rests in between detents.
const REST: u8 = 0b11;

/// Rotation between two consecutive quadrature phases.
///
/// A detent is counted on the transition back into the rest phase, so one
/// click of the knob moves the menu by exactly one. Anything else, including
/// illegal two-bit jumps caused by contact bounce, is a stall.
pub fn rotation(previous: u8, current: u8) -> i8 {
    match (previous & 0b11, current & 0b11) {
        (0b01, REST) => 1,
        (0b10, REST) => -1,
        _ => 0,
    }
}

/// One encoder poll, after decoding.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EncoderSample {
    pub phase: u8,
    pub delta: i8,
    pub pressed: bool,
}

/// Accepts a new level only after it has been stable for a few samples.
#[derive(Debug)]
struct Debouncer {
    stable: bool,
    pending: u8,
}

impl Debouncer {
    const fn new() -> Self {
        Debouncer {
            stable: false,
            pending: 0,
        }
    }

    /// Feed one raw sample; returns the debounced level.
    fn update(&mut self, raw: bool) -> bool {
        if raw == self.stable {
            self.pending = 0;
        } else {
            self.pending += 1;
            if self.pending >= BUTTON_DEBOUNCE_SAMPLES {
                self.stable = raw;
                self.pending = 0;
            }
        }
        self.stable
    }
}

/// Polls the rotary encoder, moves the menu cursor and latches button presses.
pub struct EncoderTick<'a, E> {
    encoder: E,
    shared: &'a SharedGameState,
    last_phase: u8,
    button: Debouncer,
}

impl<'a, E: QuadratureEncoder> EncoderTick<'a, E> {
    pub fn new(mut encoder: E, shared: &'a SharedGameState) -> Self {
        let (last_phase, _) = encoder.read();
        EncoderTick {
            encoder,
            shared,
            last_phase,
            button: Debouncer::new(),
        }
    }

    fn poll(&mut self) -> EncoderSample {
        let (phase, raw_button) = self.encoder.read();
        let sample = EncoderSample {
            phase,
            delta: rotation(self.last_phase, phase),
            pressed: self.button.update(raw_button),
        };
        self.last_phase = phase;
        sample
    }
}

impl<E: QuadratureEncoder> Tick for EncoderTick<'_, E> {
    fn tick(&mut self) {
        let was_pressed = self.button.stable;
        let sample = self.poll();

        // presses are always latched, the menu only moves before play
        if sample.pressed && !was_pressed {
            self.shared.raise_button_edge();
        }
        if sample.delta != 0 && !self.shared.difficulty_locked() {
            self.shared.step_menu(sample.delta);
        }
    }
}

/// Drives the survival countdown.
///
/// The millisecond accumulator only runs while the game is `Playing`; in any
/// other phase it is held at zero, so play always starts on a fresh second.
pub struct CountdownTick<'a> {
    shared: &'a SharedGameState,
    elapsed_ms: u32,
}

impl<'a> CountdownTick<'a> {
    pub const fn new(shared: &'a SharedGameState) -> Self {
        CountdownTick {
            shared,
            elapsed_ms: 0,
        }
    }
}

impl Tick for CountdownTick<'_> {
    fn tick(&mut self) {
        if self.shared.phase() != Phase::Playing {
            self.elapsed_ms = 0;
            return;
        }
        self.elapsed_ms += 1;
        if self.elapsed_ms >= COUNTDOWN_STEP_MS {
            self.elapsed_ms = 0;
            self.shared.consume_survival(COUNTDOWN_STEP_MS);
        }
    }
}

/// Software PWM for the heartbeat LED.
pub struct PwmTick<'a, P> {
    pin: P,
    shared: &'a SharedGameState,
    frame: u8,
}

impl<'a, P: OutputPin> PwmTick<'a, P> {
    pub fn new(pin: P, shared: &'a SharedGameState) -> Self {
        PwmTick {
            pin,
            shared,
            frame: 0,
        }
    }

    #[cfg(test)]
    pub(crate) fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> Tick for PwmTick<'_, P> {
    fn tick(&mut self) {
        let _ = if self.frame < self.shared.duty_frames() {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };
        self.frame += 1;
        if self.frame >= PWM_PERIOD_FRAMES {
            self.frame = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_MENU_INDEX;
    use crate::testing::{ProbePin, ScriptedEncoder};

    #[test]
    fn only_detent_transitions_rotate() {
        assert_eq!(rotation(0b01, 0b11), 1);
        assert_eq!(rotation(0b10, 0b11), -1);
        assert_eq!(rotation(0b11, 0b10), 0);
        assert_eq!(rotation(0b00, 0b01), 0);
        // illegal double jump
        assert_eq!(rotation(0b00, 0b11), 0);
        assert_eq!(rotation(0b11, 0b11), 0);
    }

    #[test]
    fn menu_stays_in_range_under_noisy_rotation() {
        let shared = SharedGameState::new();
        // pseudo-random phase walk, including illegal jumps
        let mut seed: u32 = 0x1234_5678;
        let phases: Vec<u8> = (0..5_000)
            .map(|_| {
                seed ^= seed << 13;
                seed ^= seed >> 17;
                seed ^= seed << 5;
                (seed & 0b11) as u8
            })
            .collect();
        let mut tick = EncoderTick::new(ScriptedEncoder::from_phases(phases.clone()), &shared);
        let mut before = shared.menu_index();
        for _ in 0..phases.len() {
            tick.tick();
            let after = shared.menu_index();
            assert!(after <= MAX_MENU_INDEX);
            assert!((after as i16 - before as i16).abs() <= 1);
            before = after;
        }
    }

    #[test]
    fn clockwise_detents_walk_the_menu() {
        let shared = SharedGameState::new();
        let mut encoder = ScriptedEncoder::new();
        encoder.turn(0, 1).turn(10, 1).turn(20, -1);
        let mut tick = EncoderTick::new(encoder, &shared);
        for _ in 0..40 {
            tick.tick();
        }
        assert_eq!(shared.menu_index(), 1);
    }

    #[test]
    fn rotation_is_ignored_once_difficulty_is_locked() {
        let shared = SharedGameState::new();
        shared.lock_difficulty();
        let mut encoder = ScriptedEncoder::new();
        encoder.turn(0, 1).turn(10, 1);
        let mut tick = EncoderTick::new(encoder, &shared);
        for _ in 0..40 {
            tick.tick();
        }
        assert_eq!(shared.menu_index(), 0);
    }

    #[test]
    fn button_press_latches_one_edge_after_debounce() {
        let shared = SharedGameState::new();
        let mut encoder = ScriptedEncoder::new();
        encoder.press(2);
        let mut tick = EncoderTick::new(encoder, &shared);
        for _ in 0..BUTTON_DEBOUNCE_SAMPLES {
            tick.tick();
        }
        assert!(!shared.take_button_edge());
        for _ in 0..100 {
            tick.tick();
        }
        assert!(shared.take_button_edge());
        assert!(!shared.take_button_edge());
    }

    #[test]
    fn short_glitches_never_latch() {
        let shared = SharedGameState::new();
        let mut encoder = ScriptedEncoder::new();
        encoder.glitch(3, BUTTON_DEBOUNCE_SAMPLES as u32 - 1);
        let mut tick = EncoderTick::new(encoder, &shared);
        for _ in 0..50 {
            tick.tick();
        }
        assert!(!shared.take_button_edge());
    }

    #[test]
    fn countdown_only_runs_while_playing() {
        let shared = SharedGameState::new();
        shared.reset_survival(8_000);
        let mut tick = CountdownTick::new(&shared);
        for _ in 0..2_500 {
            tick.tick();
        }
        assert_eq!(shared.survival_remaining_ms(), 8_000);

        shared.set_phase(Phase::Playing);
        for _ in 0..999 {
            tick.tick();
        }
        assert_eq!(shared.survival_remaining_ms(), 8_000);
        tick.tick();
        assert_eq!(shared.survival_remaining_ms(), 7_000);

        for _ in 0..10_000 {
            tick.tick();
        }
        assert_eq!(shared.survival_remaining_ms(), 0);

        shared.set_phase(Phase::Lost);
        shared.reset_survival(3_000);
        for _ in 0..2_000 {
            tick.tick();
        }
        assert_eq!(shared.survival_remaining_ms(), 3_000);
    }

    #[test]
    fn pwm_high_time_matches_duty() {
        let shared = SharedGameState::new();
        let mut pwm = PwmTick::new(ProbePin::new(), &shared);
        for (duty, frames_high) in [(100, 20), (50, 10), (25, 5), (10, 2), (0, 0)] {
            shared.set_duty_percent(duty);
            pwm.pin().reset();
            for _ in 0..PWM_PERIOD_FRAMES {
                pwm.tick();
            }
            assert_eq!(pwm.pin().high_count(), frames_high, "duty {}", duty);
        }
    }
}
