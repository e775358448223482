//! Fonts in the dense `!Fnt` format that predates sparse range masks.

use crate::LeBuffer;

/// Cell height of [`dense_384`].
pub const HEIGHT: usize = 8;
/// 'A', width 5.
pub const CAPITAL_A: u32 = 0x41;
pub const CAPITAL_A_WIDTH: u8 = 5;
pub const CAPITAL_A_ROWS: [u32; HEIGHT] = [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11, 0];
/// U+0141 LATIN CAPITAL LETTER L WITH STROKE, width 6.
pub const L_STROKE: u32 = 0x141;
pub const L_STROKE_WIDTH: u8 = 6;
pub const L_STROKE_ROWS: [u32; HEIGHT] = [0x02, 0x02, 0x06, 0x03, 0x02, 0x02, 0x3e, 0];

/// A legacy font of type 1 (384 glyphs) holding 'A' and U+0141.
pub fn dense_384() -> LeBuffer {
    dense(1, 384, &[
        (CAPITAL_A, CAPITAL_A_WIDTH, CAPITAL_A_ROWS),
        (L_STROKE, L_STROKE_WIDTH, L_STROKE_ROWS),
    ])
}

/// A legacy font of type 0 (256 glyphs) in which every width is zero.
pub fn dense_empty() -> LeBuffer {
    dense(0, 256, &[])
}

fn dense(ty: u8, count: usize, glyphs: &[(u32, u8, [u32; HEIGHT])]) -> LeBuffer {
    let mut rows = vec![0u32; count * HEIGHT];
    let mut widths = vec![0u8; count];
    for (cp, width, glyph_rows) in glyphs {
        let index = *cp as usize;
        widths[index] = *width;
        rows[index * HEIGHT..(index + 1) * HEIGHT].copy_from_slice(glyph_rows);
    }

    LeBuffer::new()
        .push_bytes_with_tag(&bitfont_types::LEGACY_FONT_MAGIC.into_bytes(), "magic")
        .push(6u8) // glyph_width
        .push(HEIGHT as u8) // glyph_height
        .push_with_tag(ty, "type")
        .push(1u8) // is_variable_width
        .push(1u8) // glyph_spacing
        .push(6u8) // baseline
        .push(2u8) // mean_line
        .push(8u8) // presentation_size
        .push(400u16) // weight
        .push_fixed_str("Legacy 6x8", 32)
        .push_fixed_str("Legacy", 32)
        .push(0u16)
        .extend(rows)
        .extend(widths)
}
