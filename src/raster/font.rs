//! Built-in 5x7 bitmap font used for captions and digit labels.

use crate::layout::{FontSpec, TextMeasure};

pub const GLYPH_WIDTH: usize = 5;
pub const GLYPH_HEIGHT: usize = 7;
/// Blank columns between neighbouring glyphs, before scaling.
const GLYPH_SPACING: u32 = 1;

type Glyph = [u8; GLYPH_HEIGHT];

const BLANK: Glyph = [0; GLYPH_HEIGHT];

// Rows top to bottom, bit 4 is the leftmost column.
#[rustfmt::skip]
const GLYPHS: &[(char, Glyph)] = &[
    ('0', [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e]),
    ('1', [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e]),
    ('2', [0x0e, 0x11, 0x01, 0x06, 0x08, 0x10, 0x1f]),
    ('3', [0x1e, 0x01, 0x01, 0x0e, 0x01, 0x01, 0x1e]),
    ('4', [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02]),
    ('5', [0x1f, 0x10, 0x1e, 0x01, 0x01, 0x11, 0x0e]),
    ('6', [0x06, 0x08, 0x10, 0x1e, 0x11, 0x11, 0x0e]),
    ('7', [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08]),
    ('8', [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e]),
    ('9', [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x02, 0x0c]),
    ('A', [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11]),
    ('B', [0x1e, 0x11, 0x11, 0x1e, 0x11, 0x11, 0x1e]),
    ('C', [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e]),
    ('D', [0x1e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1e]),
    ('E', [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x1f]),
    ('F', [0x1f, 0x10, 0x10, 0x1e, 0x10, 0x10, 0x10]),
    ('G', [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0e]),
    ('H', [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11]),
    ('I', [0x0e, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0e]),
    ('J', [0x07, 0x02, 0x02, 0x02, 0x12, 0x12, 0x0c]),
    ('K', [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11]),
    ('L', [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1f]),
    ('M', [0x11, 0x1b, 0x15, 0x15, 0x11, 0x11, 0x11]),
    ('N', [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11]),
    ('O', [0x0e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e]),
    ('P', [0x1e, 0x11, 0x11, 0x1e, 0x10, 0x10, 0x10]),
    ('Q', [0x0e, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0d]),
    ('R', [0x1e, 0x11, 0x11, 0x1e, 0x14, 0x12, 0x11]),
    ('S', [0x0f, 0x10, 0x10, 0x0e, 0x01, 0x01, 0x1e]),
    ('T', [0x1f, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04]),
    ('U', [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0e]),
    ('V', [0x11, 0x11, 0x11, 0x0a, 0x0a, 0x04, 0x04]),
    ('W', [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0a]),
    ('X', [0x11, 0x11, 0x0a, 0x04, 0x0a, 0x11, 0x11]),
    ('Y', [0x11, 0x11, 0x0a, 0x04, 0x04, 0x04, 0x04]),
    ('Z', [0x1f, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1f]),
    ('-', [0x00, 0x00, 0x00, 0x1f, 0x00, 0x00, 0x00]),
    (':', [0x00, 0x04, 0x00, 0x00, 0x04, 0x00, 0x00]),
    ('.', [0x00, 0x00, 0x00, 0x00, 0x00, 0x06, 0x06]),
    (',', [0x00, 0x00, 0x00, 0x00, 0x06, 0x04, 0x08]),
    ('/', [0x01, 0x02, 0x04, 0x08, 0x10, 0x10, 0x00]),
    ('#', [0x0a, 0x1f, 0x0a, 0x0a, 0x1f, 0x0a, 0x0a]),
    ('&', [0x0c, 0x12, 0x14, 0x08, 0x15, 0x12, 0x0d]),
    ('(', [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02]),
    (')', [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08]),
    ('+', [0x04, 0x04, 0x1f, 0x04, 0x04, 0x00, 0x00]),
    ('\'', [0x04, 0x04, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('"', [0x0a, 0x0a, 0x00, 0x00, 0x00, 0x00, 0x00]),
    ('!', [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04]),
    ('?', [0x0e, 0x11, 0x02, 0x04, 0x04, 0x00, 0x04]),
    ('%', [0x19, 0x1a, 0x04, 0x08, 0x16, 0x06, 0x00]),
    ('$', [0x04, 0x0f, 0x14, 0x0e, 0x05, 0x1e, 0x04]),
    ('_', [0x00, 0x00, 0x00, 0x00, 0x00, 0x1f, 0x00]),
    ('=', [0x00, 0x1f, 0x00, 0x00, 0x1f, 0x00, 0x00]),
];

/// Row bitmaps for `ch`; lowercase letters reuse the uppercase shapes and
/// anything unknown renders blank.
pub fn glyph(ch: char) -> &'static Glyph {
    let key = ch.to_ascii_uppercase();
    GLYPHS
        .iter()
        .find(|(c, _)| *c == key)
        .map(|(_, rows)| rows)
        .unwrap_or(&BLANK)
}

/// Horizontal distance between the left edges of neighbouring glyphs.
pub fn advance(font: &FontSpec) -> u32 {
    (GLYPH_WIDTH as u32 + GLYPH_SPACING) * font.scale.max(1)
}

/// Metrics of the built-in font; usable on its own when no raster is needed.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitmapFont;

impl TextMeasure for BitmapFont {
    fn measure_text(&self, text: &str, font: &FontSpec) -> (u32, u32) {
        let count = text.chars().count() as u32;
        if count == 0 {
            return (0, 0);
        }
        let scale = font.scale.max(1);
        (
            count * advance(font) - GLYPH_SPACING * scale,
            GLYPH_HEIGHT as u32 * scale,
        )
    }
}
