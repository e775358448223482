//! Behaviour that holds for any font, checked over a handful of fonts.

use bitfont::{BitmapFont, FontData, GlyphOrigin};
use bitfont_test_data::variable_5x7 as v57;
use pretty_assertions::assert_eq;
use rstest::rstest;

/// Every materialized glyph as `(code point, width, rows)`.
fn snapshot(font: &BitmapFont) -> Vec<(u32, u8, Vec<u32>)> {
    font.materialized_blocks()
        .flat_map(|block| block * 256..(block + 1) * 256)
        .map(|cp| {
            let bitmap = font.glyph_bitmap(cp).unwrap();
            (cp, bitmap.width(), bitmap.rows().iter().collect())
        })
        .collect()
}

fn sample_font() -> BitmapFont<'static> {
    let mut font = BitmapFont::new(7, 9, false);
    font.set_name("Sample");
    font.set_family("Sample Sans");
    font.set_presentation_size(9);
    font.set_baseline(7);
    font.set_mean_line(3);
    font.set_glyph_spacing(2);
    for (cp, width) in [(0x3f, 5), (0x41, 6), (0x69, 1), (0x416, 7), (0x1f40, 4)] {
        font.set_glyph_width(cp, width);
        font.set_glyph_rows(cp, &[cp, cp >> 1, cp >> 2, 0x7f]);
    }
    font
}

#[test]
fn round_trip() {
    let font = sample_font();
    let bytes = font.to_bytes();
    let decoded = BitmapFont::read(FontData::new(&bytes)).unwrap();
    assert_eq!(decoded.name(), font.name());
    assert_eq!(decoded.qualified_name(), "Sample Sans 9 400");
    assert_eq!(decoded.glyph_spacing(), 2);
    assert_eq!(decoded.x_height(), 4);
    assert_eq!(decoded.is_fixed_width(), font.is_fixed_width());
    assert_eq!(decoded.range_mask(), font.range_mask());
    assert_eq!((decoded.min_glyph_width(), decoded.max_glyph_width()), (1, 7));
    assert_eq!(snapshot(&decoded), snapshot(&font));
}

#[rstest]
#[case::before_all(&[0x0])]
#[case::between(&[0x250])]
#[case::after_all(&[0x10ffff])]
#[case::several(&[0x10ffff, 0x100, 0x2000, 0x1f00])]
fn growth_preserves_glyphs(#[case] code_points: &[u32]) {
    let bytes = sample_font().to_bytes();
    let original = BitmapFont::read(FontData::new(&bytes)).unwrap();
    let mut grown = original.clone();
    for cp in code_points {
        grown.ensure_space_for(*cp);
        assert!(grown.is_materialized(*cp));
    }
    let new_blocks: Vec<u32> = code_points
        .iter()
        .map(|cp| cp / 256)
        .filter(|block| !original.materialized_blocks().any(|b| b == *block))
        .collect();

    let before = snapshot(&original);
    let after = snapshot(&grown);
    for glyph in &before {
        assert!(after.contains(glyph), "lost U+{:04X}", glyph.0);
    }
    for (cp, width, rows) in after {
        if new_blocks.contains(&(cp / 256)) {
            assert_eq!(width, 0);
            assert!(rows.iter().all(|row| *row == 0));
        }
    }
    assert_eq!(
        grown.to_bytes().len(),
        bytes.len() - original.range_mask().len()
            + grown.range_mask().len()
            + new_blocks.len() * 256 * (9 * 4 + 1)
    );
}

#[rstest]
#[case(0x100)]
#[case(0x2ff)]
#[case(0x4e00)]
#[case(0x1f600)]
#[case(0x10ffff)]
fn sparse_lookup(#[case] code_point: u32) {
    let bytes = bitfont_test_data::variable_5x7();
    let font = BitmapFont::read(FontData::new(&bytes)).unwrap();
    assert_eq!(font.glyph_index(code_point), None);
    assert!(!font.contains(code_point));
    assert!(!font.is_materialized(code_point));
}

#[rstest]
#[case::unmaterialized(0x4e00)]
#[case::zero_width(0x42)]
fn variable_width_falls_back_to_question_mark(#[case] code_point: u32) {
    let bytes = bitfont_test_data::variable_5x7();
    let font = BitmapFont::read(FontData::new(&bytes)).unwrap();
    let glyph = font.glyph(code_point);
    assert_eq!(glyph.origin(), GlyphOrigin::Replacement);
    assert_eq!(glyph.width(), font.glyph(v57::QUESTION_MARK).width());
}

#[rstest]
#[case::present(0x41)]
#[case::zero_width(0x42)]
#[case::unmaterialized(0x4e00)]
fn fixed_width_advance_is_constant(#[case] code_point: u32) {
    let mut font = BitmapFont::new(8, 16, true);
    font.set_glyph_width(0x41, 3);
    assert_eq!(font.glyph(code_point).width(), 8);
}

#[rstest]
#[case('A', '?')]
#[case('A', '\u{301}')]
#[case('b', '\u{4e00}')]
#[case('\u{1f600}', 'A')]
fn measure_is_additive(#[case] a: char, #[case] b: char) {
    let bytes = bitfont_test_data::variable_5x7();
    let font = BitmapFont::read(FontData::new(&bytes)).unwrap();
    let pair = font.measure([a as u32, b as u32]);
    let spacing = font.glyph_spacing() as u32;
    assert_eq!(pair, font.measure([a as u32]) + spacing + font.measure([b as u32]));
}

#[test]
fn new_font_scenario() {
    let mut font = BitmapFont::new(8, 16, true);
    assert_eq!(font.glyph_count(), 0);
    font.ensure_space_for('A' as u32);
    font.set_glyph_rows('A' as u32, &[0x18, 0x24, 0x42, 0x7e, 0x42, 0x42]);
    font.set_glyph_width('A' as u32, 8);

    let bytes = font.to_bytes();
    let decoded = BitmapFont::read(FontData::new(&bytes)).unwrap();
    assert_eq!(decoded.glyph(0x41).width(), 8);
    assert!(decoded.contains(0x41));
    assert!(!decoded.contains(0x42));
    assert_eq!(
        decoded.glyph_bitmap(0x41).unwrap().rows().get(3),
        Some(0x7e)
    );
}
