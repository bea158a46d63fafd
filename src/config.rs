//! Compile-time tunables for the pet game.

/// Rate of all three periodic tick sources.
pub const TICK_HZ: u32 = 1_000;

/// Hardware timer cycles per millisecond (the nRF timers count at 1 MHz).
pub const TIMER_CYCLES_PER_MS: u32 = 1_000_000 / TICK_HZ;

/// Number of entries in the main menu.
pub const MENU_ENTRIES: u8 = 6;

/// Highest selectable menu index.
pub const MAX_MENU_INDEX: u8 = MENU_ENTRIES - 1;

/// How long the "Keep Pet Alive" banner stays up before play starts.
pub const INTRO_BANNER_MS: u32 = 3_000;

/// Length of the survival countdown.
pub const SURVIVAL_MS: u32 = 8_000;

/// Granularity of the survival countdown.
pub const COUNTDOWN_STEP_MS: u32 = 1_000;

/// Pacing delay at the end of every foreground iteration.
pub const LOOP_PACING_MS: u32 = 50;

/// Software PWM period, in ticks.
pub const PWM_PERIOD_FRAMES: u8 = 20;

/// Heartbeat duty (percent) indexed by the number of lit hunger segments.
pub const DUTY_TABLE: [u8; 5] = [0, 10, 25, 50, 100];

/// LED bar toggles in the win animation (six flashes).
pub const WIN_FLASH_TOGGLES: u8 = 12;

pub const WIN_FLASH_HALF_PERIOD_MS: u32 = 200;

pub const MOONWALK_STEP_MS: u32 = 300;
pub const MOONWALK_RIGHT_STEPS: u8 = 13;
pub const MOONWALK_LEFT_STEPS: u8 = 14;
pub const MOONWALK_BANNER_MS: u32 = 1_500;

/// Consecutive identical samples before a new button level is accepted.
pub const BUTTON_DEBOUNCE_SAMPLES: u8 = 5;

/// LCD geometry.
pub const LCD_COLUMNS: u8 = 16;
pub const LCD_ROWS: u8 = 2;
