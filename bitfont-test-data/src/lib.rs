//! test data shared between various bitfont crates.

mod buffer;
pub mod legacy;

pub use buffer::LeBuffer;

use bitfont_types::GLYPHS_PER_BLOCK;

/// Size of the fixed header at the start of a `+Fnt` file.
///
/// A buffer shorter than this cannot be decoded.
pub const HEADER_LEN: usize = 81;

/// A fixed width 8x16 font with no materialized blocks.
#[rustfmt::skip]
pub static EMPTY_FIXED_8X16: &[u8] = &[
    b'+', b'F', b'n', b't', // magic
    0x08,                   // glyph_width 8
    0x10,                   // glyph_height 16
    0x00, 0x00,             // range_mask_size 0
    0x00,                   // is_variable_width: false
    0x01,                   // glyph_spacing 1
    0x0c,                   // baseline 12
    0x05,                   // mean_line 5
    0x0a,                   // presentation_size 10
    0x90, 0x01,             // weight 400
    // name: "Empty"
    b'E', b'm', b'p', b't', b'y', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    // family: "Test"
    b'T', b'e', b's', b't', 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0,
    0x00, 0x00,             // unused
];

/// Glyph metadata used to build [`variable_5x7`].
pub mod variable_5x7 {
    /// 'A', stored in block 0.
    pub const CAPITAL_A: u32 = 0x41;
    /// Width of 'A'.
    pub const CAPITAL_A_WIDTH: u8 = 5;
    /// Rows of 'A', top to bottom; bit 0 is the leftmost pixel.
    pub const CAPITAL_A_ROWS: [u32; 7] = [
        0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001,
    ];
    /// '?', the replacement glyph.
    pub const QUESTION_MARK: u32 = 0x3f;
    /// Width of '?'.
    pub const QUESTION_MARK_WIDTH: u8 = 4;
    /// Rows of '?'.
    pub const QUESTION_MARK_ROWS: [u32; 7] = [
        0b0110, 0b1001, 0b1000, 0b0100, 0b0010, 0b0000, 0b0010,
    ];
    /// U+0301 COMBINING ACUTE ACCENT, stored in block 3.
    pub const ACUTE: u32 = 0x301;
    /// Width of the combining acute.
    pub const ACUTE_WIDTH: u8 = 2;
    /// Rows of the combining acute.
    pub const ACUTE_ROWS: [u32; 7] = [0b10, 0b01, 0, 0, 0, 0, 0];
    /// The blocks present in the font.
    pub const BLOCKS: [u32; 2] = [0, 3];
    /// Inter-glyph spacing.
    pub const SPACING: u8 = 1;
}

/// A variable width 5x7 font with blocks 0 and 3 materialized.
///
/// See the [`variable_5x7`](mod@variable_5x7) module for the glyphs it contains.
pub fn variable_5x7() -> LeBuffer {
    use variable_5x7::*;
    const HEIGHT: usize = 7;
    let glyphs = [
        (CAPITAL_A, CAPITAL_A_WIDTH, CAPITAL_A_ROWS),
        (QUESTION_MARK, QUESTION_MARK_WIDTH, QUESTION_MARK_ROWS),
        (ACUTE, ACUTE_WIDTH, ACUTE_ROWS),
    ];
    let slot_of = |cp: u32| {
        BLOCKS
            .iter()
            .position(|block| *block == cp / GLYPHS_PER_BLOCK as u32)
            .unwrap()
    };
    let glyph_count = BLOCKS.len() * GLYPHS_PER_BLOCK;
    let mut rows = vec![0u32; glyph_count * HEIGHT];
    let mut widths = vec![0u8; glyph_count];
    for (cp, width, glyph_rows) in glyphs {
        let index = slot_of(cp) * GLYPHS_PER_BLOCK + cp as usize % GLYPHS_PER_BLOCK;
        widths[index] = width;
        rows[index * HEIGHT..(index + 1) * HEIGHT].copy_from_slice(&glyph_rows);
    }

    LeBuffer::new()
        .push_bytes_with_tag(&bitfont_types::FONT_MAGIC.into_bytes(), "magic")
        .push(5u8) // glyph_width
        .push(HEIGHT as u8) // glyph_height
        .push_with_tag(1u16, "range_mask_size")
        .push(1u8) // is_variable_width
        .push(SPACING)
        .push(6u8) // baseline
        .push(2u8) // mean_line
        .push(9u8) // presentation_size
        .push(400u16) // weight
        .push_fixed_str("Variable 5x7", 32)
        .push_fixed_str("Variable", 32)
        .push(0u16)
        .push_with_tag(0b0000_1001u8, "range_mask")
        .extend(rows)
        .extend(widths)
}

/// Return a copy of `font` truncated by `n` bytes.
pub fn truncated_by(font: &[u8], n: usize) -> Vec<u8> {
    font[..font.len().saturating_sub(n)].to_vec()
}
