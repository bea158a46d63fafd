use core::sync::atomic::{AtomicBool, AtomicU32, AtomicU8, Ordering};

use crate::config::{MAX_MENU_INDEX, PWM_PERIOD_FRAMES};

/// Where the game is in its lifecycle.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Phase {
    Menu = 0,
    /// Fixed banner shown before play begins.
    CountdownIntro = 1,
    Playing = 2,
    Won = 3,
    Lost = 4,
}

impl Phase {
    fn from_u8(raw: u8) -> Self {
        match raw {
            1 => Phase::CountdownIntro,
            2 => Phase::Playing,
            3 => Phase::Won,
            4 => Phase::Lost,
            _ => Phase::Menu,
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Phase::Won | Phase::Lost)
    }
}

/// The four life segments shown on the LED bar. Bit `n` is segment `n`.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct HungerMask(u8);

impl HungerMask {
    pub const FULL: HungerMask = HungerMask(0x0F);
    pub const EMPTY: HungerMask = HungerMask(0x00);

    pub const fn new(bits: u8) -> Self {
        HungerMask(bits & 0x0F)
    }

    pub const fn bits(self) -> u8 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Number of segments still lit (0..=4).
    pub const fn lit(self) -> u8 {
        self.0.count_ones() as u8
    }

    pub fn clear(&mut self, segment: u8) {
        self.0 &= !(1 << segment) & 0x0F;
    }
}

/// State shared between the tick interrupts and the foreground loop.
///
/// Every field is its own atomic and has exactly one writer, so no lock is
/// ever taken:
///
/// | field                   | written by                                     |
/// |-------------------------|------------------------------------------------|
/// | `menu_index`            | encoder tick                                   |
/// | `button_edge`           | set by encoder tick, cleared by foreground     |
/// | `difficulty_locked`     | foreground                                     |
/// | `phase`                 | foreground                                     |
/// | `survival_remaining_ms` | foreground outside `Playing`, countdown inside |
/// | `duty_percent`          | foreground                                     |
///
/// A flag raised by an interrupt while the foreground is mid-iteration is seen
/// on the next read, never retroactively.
pub struct SharedGameState {
    menu_index: AtomicU8,
    button_edge: AtomicBool,
    difficulty_locked: AtomicBool,
    phase: AtomicU8,
    survival_remaining_ms: AtomicU32,
    duty_percent: AtomicU8,
}

impl SharedGameState {
    pub const fn new() -> Self {
        SharedGameState {
            menu_index: AtomicU8::new(0),
            button_edge: AtomicBool::new(false),
            difficulty_locked: AtomicBool::new(false),
            phase: AtomicU8::new(Phase::Menu as u8),
            survival_remaining_ms: AtomicU32::new(0),
            duty_percent: AtomicU8::new(0),
        }
    }

    pub fn menu_index(&self) -> u8 {
        self.menu_index.load(Ordering::Relaxed)
    }

    /// Move the menu cursor by `delta`, clamped to the menu. Encoder tick only.
    pub fn step_menu(&self, delta: i8) -> u8 {
        let current = self.menu_index.load(Ordering::Relaxed) as i16;
        let next = (current + delta as i16).clamp(0, MAX_MENU_INDEX as i16) as u8;
        self.menu_index.store(next, Ordering::Relaxed);
        next
    }

    pub fn raise_button_edge(&self) {
        self.button_edge.store(true, Ordering::Release);
    }

    /// Consume the latched button edge. Returns true at most once per press.
    pub fn take_button_edge(&self) -> bool {
        self.button_edge.swap(false, Ordering::Acquire)
    }

    pub fn difficulty_locked(&self) -> bool {
        self.difficulty_locked.load(Ordering::Acquire)
    }

    /// Latch the difficulty. Returns true only for the call that flipped it.
    pub fn lock_difficulty(&self) -> bool {
        !self.difficulty_locked.swap(true, Ordering::AcqRel)
    }

    pub fn phase(&self) -> Phase {
        Phase::from_u8(self.phase.load(Ordering::Acquire))
    }

    pub fn set_phase(&self, phase: Phase) {
        self.phase.store(phase as u8, Ordering::Release);
    }

    pub fn won(&self) -> bool {
        self.phase() == Phase::Won
    }

    pub fn lost(&self) -> bool {
        self.phase() == Phase::Lost
    }

    pub fn survival_remaining_ms(&self) -> u32 {
        self.survival_remaining_ms.load(Ordering::Acquire)
    }

    /// Arm the countdown. Foreground only, and only while not `Playing`.
    pub fn reset_survival(&self, ms: u32) {
        self.survival_remaining_ms.store(ms, Ordering::Release);
    }

    /// Take `step` off the countdown, floored at zero. Countdown tick only.
    pub fn consume_survival(&self, step: u32) {
        let _ = self
            .survival_remaining_ms
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |left| {
                Some(left.saturating_sub(step))
            });
    }

    pub fn duty_percent(&self) -> u8 {
        self.duty_percent.load(Ordering::Relaxed)
    }

    pub fn set_duty_percent(&self, percent: u8) {
        self.duty_percent.store(percent.min(100), Ordering::Relaxed);
    }

    /// Frames per PWM period the heartbeat stays high at the current duty.
    pub fn duty_frames(&self) -> u8 {
        ((PWM_PERIOD_FRAMES as u16 * self.duty_percent() as u16) / 100) as u8
    }
}

impl Default for SharedGameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_is_clamped_at_both_ends() {
        let state = SharedGameState::new();
        assert_eq!(state.step_menu(-1), 0);
        for _ in 0..10 {
            state.step_menu(1);
        }
        assert_eq!(state.menu_index(), MAX_MENU_INDEX);
        assert_eq!(state.step_menu(-1), MAX_MENU_INDEX - 1);
    }

    #[test]
    fn button_edge_is_consumed_once() {
        let state = SharedGameState::new();
        assert!(!state.take_button_edge());
        state.raise_button_edge();
        state.raise_button_edge();
        assert!(state.take_button_edge());
        assert!(!state.take_button_edge());
    }

    #[test]
    fn difficulty_locks_exactly_once() {
        let state = SharedGameState::new();
        assert!(!state.difficulty_locked());
        assert!(state.lock_difficulty());
        assert!(!state.lock_difficulty());
        assert!(state.difficulty_locked());
    }

    #[test]
    fn survival_floors_at_zero() {
        let state = SharedGameState::new();
        state.reset_survival(1_500);
        state.consume_survival(1_000);
        assert_eq!(state.survival_remaining_ms(), 500);
        state.consume_survival(1_000);
        assert_eq!(state.survival_remaining_ms(), 0);
    }

    #[test]
    fn hunger_mask_clears_single_segments() {
        let mut mask = HungerMask::FULL;
        mask.clear(3);
        assert_eq!(mask.bits(), 0b0111);
        mask.clear(3);
        assert_eq!(mask.bits(), 0b0111);
        mask.clear(0);
        assert_eq!(mask.lit(), 2);
        assert_eq!(HungerMask::new(0xFF), HungerMask::FULL);
    }

    #[test]
    fn duty_frames_follow_the_period() {
        let state = SharedGameState::new();
        state.set_duty_percent(50);
        assert_eq!(state.duty_frames(), 10);
        state.set_duty_percent(10);
        assert_eq!(state.duty_frames(), 2);
        state.set_duty_percent(100);
        assert_eq!(state.duty_frames(), PWM_PERIOD_FRAMES);
    }
}
