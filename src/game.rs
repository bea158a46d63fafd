use embedded_hal::blocking::delay::DelayMs;

use crate::config::{
    INTRO_BANNER_MS, LCD_COLUMNS, LOOP_PACING_MS, MOONWALK_BANNER_MS, MOONWALK_LEFT_STEPS,
    MOONWALK_RIGHT_STEPS, MOONWALK_STEP_MS, SURVIVAL_MS, WIN_FLASH_HALF_PERIOD_MS,
    WIN_FLASH_TOGGLES,
};
use crate::duty::duty_level;
use crate::peripherals::{CharacterDisplay, DigitDisplay, LedBar, Scroll};
use crate::sprites::{Sprite, ARROW_SLOT, RIGHT_ARROW};
use crate::state::{HungerMask, Phase, SharedGameState};
use crate::trace;

/// Column the play sprites start at.
const PET_COLUMN: u8 = 6;

/// Menu labels, two per page.
const MENU_LABELS: [&str; 6] = ["EASY", "MEDIUM", "MEDIUM", "HARD", "HARD", "DISPLAY PET"];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    /// Time between two segments of the hunger bar going dark.
    pub fn decay_interval_ms(self) -> u32 {
        match self {
            Difficulty::Easy => 1_000,
            Difficulty::Medium => 500,
            Difficulty::Hard => 250,
        }
    }

    pub fn sprite(self) -> Sprite {
        match self {
            Difficulty::Easy => Sprite::Dog,
            Difficulty::Medium => Sprite::Crow,
            Difficulty::Hard => Sprite::Cat,
        }
    }
}

/// What pressing the button on a menu entry does.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum MenuEntry {
    Play(Difficulty),
    /// Show off the turtle. Leaves the menu untouched.
    DisplayPet,
}

impl MenuEntry {
    pub fn from_index(index: u8) -> Self {
        match index {
            0 => MenuEntry::Play(Difficulty::Easy),
            1 | 2 => MenuEntry::Play(Difficulty::Medium),
            3 | 4 => MenuEntry::Play(Difficulty::Hard),
            _ => MenuEntry::DisplayPet,
        }
    }
}

/// Everything the foreground loop drives.
pub struct Devices<L, B, D, T> {
    pub lcd: L,
    pub leds: B,
    pub digits: D,
    pub delay: T,
}

/// The foreground game loop.
///
/// [`step`](PetGame::step) runs one iteration. Interrupts may update the shared
/// state during any of the blocking delays inside it; the loop only looks at
/// that state again after the delay returns.
pub struct PetGame<'a, L, B, D, T> {
    shared: &'a SharedGameState,
    devices: Devices<L, B, D, T>,
    phase: Phase,
    /// Menu index currently on screen, `None` forces a redraw.
    drawn_index: Option<u8>,
    difficulty: Difficulty,
    hunger: HungerMask,
    /// Segment the next decay clears, `None` once the bar is exhausted.
    next_segment: Option<u8>,
}

impl<'a, L, B, D, T> PetGame<'a, L, B, D, T>
where
    L: CharacterDisplay,
    B: LedBar,
    D: DigitDisplay,
    T: DelayMs<u32>,
{
    pub fn new(shared: &'a SharedGameState, devices: Devices<L, B, D, T>) -> Self {
        PetGame {
            shared,
            devices,
            phase: Phase::Menu,
            drawn_index: None,
            difficulty: Difficulty::Easy,
            hunger: HungerMask::EMPTY,
            next_segment: None,
        }
    }

    /// Put the outputs into their power-on state.
    pub fn init(&mut self) {
        self.devices.lcd.load_glyph(ARROW_SLOT, &RIGHT_ARROW);
        self.devices.lcd.clear();
        self.devices.leds.set_mask(0);
        self.shared.set_duty_percent(0);
        self.shared.set_phase(Phase::Menu);
        trace!("pet: boot");
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn hunger(&self) -> HungerMask {
        self.hunger
    }

    pub fn difficulty(&self) -> Option<Difficulty> {
        if self.shared.difficulty_locked() {
            Some(self.difficulty)
        } else {
            None
        }
    }

    pub fn devices(&self) -> &Devices<L, B, D, T> {
        &self.devices
    }

    /// Run one foreground iteration and return the phase it ended in.
    ///
    /// Returns `Won` only after the win animation has played; the caller is
    /// expected to stop calling `step` from then on.
    pub fn step(&mut self) -> Phase {
        match self.phase {
            Phase::Menu => self.menu_step(),
            Phase::CountdownIntro => self.start_play(),
            Phase::Playing => self.play_step(),
            Phase::Lost => self.lost_step(),
            Phase::Won => {}
        }
        self.phase
    }

    fn enter(&mut self, phase: Phase) {
        trace!("pet: {:?} -> {:?}", self.phase, phase);
        self.phase = phase;
        self.shared.set_phase(phase);
    }

    fn menu_step(&mut self) {
        let index = self.shared.menu_index();
        if self.drawn_index != Some(index) {
            self.devices.lcd.clear();
            self.draw_menu(index);
            self.drawn_index = Some(index);
        }

        if self.shared.take_button_edge() {
            trace!("pet: menu entry {} selected", index);
            match MenuEntry::from_index(index) {
                MenuEntry::DisplayPet => {
                    self.moonwalk();
                    self.drawn_index = None;
                    return;
                }
                MenuEntry::Play(difficulty) => {
                    self.lock_difficulty(difficulty);
                    return;
                }
            }
        }
        self.devices.delay.delay_ms(LOOP_PACING_MS);
    }

    fn draw_menu(&mut self, index: u8) {
        let page = (index / 2) as usize;
        let lcd = &mut self.devices.lcd;
        lcd.set_cursor(0, index % 2);
        lcd.write_glyph(ARROW_SLOT);
        lcd.set_cursor(1, 0);
        lcd.write_str(MENU_LABELS[page * 2]);
        lcd.set_cursor(1, 1);
        lcd.write_str(MENU_LABELS[page * 2 + 1]);
    }

    fn lock_difficulty(&mut self, difficulty: Difficulty) {
        self.shared.lock_difficulty();
        self.difficulty = difficulty;
        self.hunger = HungerMask::FULL;
        self.next_segment = Some(3);
        self.shared.reset_survival(SURVIVAL_MS);
        trace!(
            "pet: {:?}, decay every {} ms",
            difficulty,
            difficulty.decay_interval_ms()
        );

        let lcd = &mut self.devices.lcd;
        lcd.clear();
        lcd.set_cursor(0, 0);
        lcd.write_str("Keep Pet Alive");
        lcd.set_cursor(0, 1);
        lcd.write_str("For 8 Seconds!");
        self.enter(Phase::CountdownIntro);
    }

    /// Hold the banner, then hand over to play. Nothing else is running yet,
    /// so blocking here is harmless.
    fn start_play(&mut self) {
        self.devices.delay.delay_ms(INTRO_BANNER_MS);
        self.shared.reset_survival(SURVIVAL_MS);
        self.show_pet(self.difficulty.sprite());
        self.enter(Phase::Playing);
    }

    fn play_step(&mut self) {
        if self.shared.take_button_edge() {
            self.refill();
        }
        self.push_outputs();

        // loss is latched first and wins a tie
        if self.hunger.is_empty() {
            self.enter(Phase::Lost);
            self.banner("YOU LOSE!");
        } else if self.shared.survival_remaining_ms() == 0 {
            self.enter(Phase::Won);
            self.banner("YOU WIN!");
            self.flash_win();
            return;
        }

        if !self.phase.is_terminal() && self.decay() {
            return;
        }
        self.devices.delay.delay_ms(LOOP_PACING_MS);
    }

    /// Wait one decay interval, then either refill (if the player pressed in the
    /// meantime) or let the next segment go dark. Returns true if a refill cut
    /// the iteration short.
    fn decay(&mut self) -> bool {
        let Some(segment) = self.next_segment else {
            return false;
        };
        self.devices.leds.set_mask(self.hunger.bits());
        self.devices
            .delay
            .delay_ms(self.difficulty.decay_interval_ms());

        if self.shared.take_button_edge() {
            self.refill();
            self.devices.leds.set_mask(self.hunger.bits());
            return true;
        }

        self.hunger.clear(segment);
        self.next_segment = segment.checked_sub(1);
        self.devices.leds.set_mask(self.hunger.bits());
        trace!("pet: hunger {:04b}", self.hunger.bits());
        false
    }

    /// Top the bar back up. Only possible while something is left of it.
    fn refill(&mut self) -> bool {
        if self.hunger.is_empty() {
            return false;
        }
        self.hunger = HungerMask::FULL;
        self.next_segment = Some(3);
        trace!("pet: fed");
        true
    }

    fn lost_step(&mut self) {
        // a press still has to be consumed, but there is nothing to refill
        if self.shared.take_button_edge() {
            self.refill();
        }
        self.push_outputs();
        self.devices.delay.delay_ms(LOOP_PACING_MS);
    }

    fn push_outputs(&mut self) {
        self.devices.leds.set_mask(self.hunger.bits());
        self.shared.set_duty_percent(duty_level(self.hunger));
        self.devices
            .digits
            .show(self.shared.survival_remaining_ms() / 1_000);
    }

    fn banner(&mut self, text: &str) {
        self.devices.lcd.clear();
        self.devices.lcd.set_cursor(0, 0);
        self.devices.lcd.write_str(text);
    }

    fn flash_win(&mut self) {
        let mut leds = 0x00;
        for _ in 0..WIN_FLASH_TOGGLES {
            leds ^= 0x0F;
            self.devices.leds.set_mask(leds);
            self.devices.delay.delay_ms(WIN_FLASH_HALF_PERIOD_MS);
        }
    }

    fn load_sprite(&mut self, sprite: Sprite) {
        for (slot, rows) in sprite.glyphs().iter().enumerate() {
            self.devices.lcd.load_glyph(slot as u8, rows);
        }
    }

    /// Load a sprite and draw it on both rows starting at `PET_COLUMN`.
    fn show_pet(&mut self, sprite: Sprite) {
        self.load_sprite(sprite);
        self.devices.lcd.clear();
        let columns = sprite.columns();
        for code in 0..sprite.glyphs().len() as u8 {
            self.devices
                .lcd
                .set_cursor(PET_COLUMN + code % columns, code / columns);
            self.devices.lcd.write_glyph(code);
        }
    }

    fn draw_turtle_at(&mut self, col: u8) {
        for code in 0..Sprite::Turtle.columns() {
            self.devices.lcd.set_cursor(col + code, 0);
            self.devices.lcd.write_glyph(code);
        }
    }

    /// The turtle walks off to the right, then moonwalks back in from the far
    /// edge. Rotation during the show still moves the menu cursor.
    fn moonwalk(&mut self) {
        trace!("pet: moonwalk");
        self.load_sprite(Sprite::Turtle);
        self.devices.lcd.clear();
        self.draw_turtle_at(0);
        self.devices.delay.delay_ms(MOONWALK_STEP_MS);
        for _ in 0..MOONWALK_RIGHT_STEPS {
            self.devices.lcd.scroll(Scroll::Right);
            self.devices.delay.delay_ms(MOONWALK_STEP_MS);
        }

        self.banner("Moonwalk!");
        self.devices.delay.delay_ms(MOONWALK_BANNER_MS);
        self.devices.lcd.clear();

        self.load_sprite(Sprite::Turtle);
        self.draw_turtle_at(LCD_COLUMNS - Sprite::Turtle.columns());
        for _ in 0..MOONWALK_LEFT_STEPS {
            self.devices.lcd.scroll(Scroll::Left);
            self.devices.delay.delay_ms(MOONWALK_STEP_MS);
        }

        self.devices.lcd.clear();
        self.devices.lcd.load_glyph(ARROW_SLOT, &RIGHT_ARROW);
    }
}
