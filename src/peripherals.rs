//! What the game needs from the board.
//!
//! The game only ever talks to hardware through these traits. Writes are
//! infallible: the drivers behind them are plain register/pin pokes with no
//! failure mode worth reporting on a device with no diagnostic channel.

/// Direction of a whole-display shift.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Scroll {
    Left,
    Right,
}

/// 16x2 character LCD with eight loadable glyph slots.
pub trait CharacterDisplay {
    fn clear(&mut self);

    /// Columns past the edge (>= 16) and rows other than 0 or 1 are ignored.
    fn set_cursor(&mut self, col: u8, row: u8);

    fn write_str(&mut self, text: &str);

    /// Draw the custom glyph stored in slot `code` (0..=7).
    fn write_glyph(&mut self, code: u8);

    fn scroll(&mut self, direction: Scroll);

    /// Store an 8-row, 5-bit-wide bitmap in glyph slot `slot`.
    fn load_glyph(&mut self, slot: u8, rows: &[u8; 8]);
}

/// The four-segment hunger bar.
pub trait LedBar {
    /// Bit `n` lights segment `n`; bits above 3 are ignored.
    fn set_mask(&mut self, mask: u8);
}

/// Multiplexed decimal display. Each call refreshes it once.
pub trait DigitDisplay {
    fn show(&mut self, value: u32);
}

/// Raw rotary encoder inputs.
pub trait QuadratureEncoder {
    /// Current 2-bit phase `(A << 1) | B` and the raw button level.
    fn read(&mut self) -> (u8, bool);
}
