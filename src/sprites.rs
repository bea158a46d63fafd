//! Custom LCD glyphs: the menu arrow and the four pets.
//!
//! Each glyph is 8 rows of 5 pixels, least significant bit on the right.

/// Glyph slot the menu arrow lives in.
pub const ARROW_SLOT: u8 = 3;

pub const RIGHT_ARROW: [u8; 8] = [0x00, 0x04, 0x02, 0x1F, 0x02, 0x04, 0x00, 0x00];

const DOG: [[u8; 8]; 8] = [
    [0x03, 0x0C, 0x10, 0x10, 0x10, 0x11, 0x16, 0x1A],
    [0x18, 0x07, 0x00, 0x10, 0x10, 0x00, 0x08, 0x18],
    [0x03, 0x1C, 0x00, 0x01, 0x01, 0x00, 0x02, 0x03],
    [0x18, 0x06, 0x01, 0x01, 0x01, 0x11, 0x0D, 0x0B],
    [0x02, 0x02, 0x02, 0x02, 0x01, 0x00, 0x00, 0x00],
    [0x18, 0x18, 0x03, 0x01, 0x00, 0x11, 0x0E, 0x01],
    [0x03, 0x03, 0x18, 0x10, 0x00, 0x11, 0x0E, 0x10],
    [0x08, 0x08, 0x08, 0x08, 0x10, 0x00, 0x00, 0x00],
];

const TURTLE: [[u8; 8]; 5] = [
    [0x01, 0x02, 0x04, 0x08, 0x1C, 0x13, 0x18, 0x09],
    [0x10, 0x0B, 0x04, 0x05, 0x04, 0x18, 0x03, 0x12],
    [0x00, 0x10, 0x18, 0x08, 0x08, 0x18, 0x10, 0x00],
    [0x0E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x0E, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00],
];

const CROW: [[u8; 8]; 6] = [
    [0x03, 0x07, 0x0A, 0x11, 0x0F, 0x03, 0x07, 0x07],
    [0x18, 0x1C, 0x1C, 0x1E, 0x1F, 0x1F, 0x0F, 0x0F],
    [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10, 0x10],
    [0x07, 0x03, 0x01, 0x00, 0x00, 0x00, 0x00, 0x00],
    [0x17, 0x1B, 0x1D, 0x0F, 0x1B, 0x00, 0x00, 0x00],
    [0x18, 0x1C, 0x1E, 0x10, 0x00, 0x00, 0x00, 0x00],
];

const CAT: [[u8; 8]; 6] = [
    [0x0E, 0x09, 0x08, 0x08, 0x13, 0x17, 0x17, 0x10],
    [0x01, 0x02, 0x1C, 0x00, 0x01, 0x03, 0x03, 0x08],
    [0x18, 0x08, 0x08, 0x08, 0x14, 0x14, 0x14, 0x04],
    [0x0C, 0x02, 0x02, 0x02, 0x04, 0x04, 0x04, 0x03],
    [0x00, 0x01, 0x01, 0x01, 0x00, 0x14, 0x14, 0x1F],
    [0x18, 0x00, 0x02, 0x05, 0x15, 0x19, 0x12, 0x1C],
];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Sprite {
    Dog,
    Turtle,
    Crow,
    Cat,
}

impl Sprite {
    /// Glyph bitmaps, in slot order.
    pub fn glyphs(self) -> &'static [[u8; 8]] {
        match self {
            Sprite::Dog => &DOG,
            Sprite::Turtle => &TURTLE,
            Sprite::Crow => &CROW,
            Sprite::Cat => &CAT,
        }
    }

    /// Width of the sprite in character cells; glyphs fill rows left to right.
    pub fn columns(self) -> u8 {
        match self {
            Sprite::Dog => 4,
            Sprite::Turtle | Sprite::Crow | Sprite::Cat => 3,
        }
    }
}
