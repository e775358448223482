//! Text rendering of fonts and glyphs

use std::io::Write;

use bitfont::{BitmapFont, Glyph, GlyphOrigin};

use crate::code_point::CodePoint;

const INK: char = '#';
const PAPER: char = '.';

/// Print the header scalars, derived metrics and block coverage of `font`.
pub fn print_info(font: &BitmapFont, out: &mut dyn Write) -> std::io::Result<()> {
    writeln!(out, "name:              {}", font.name())?;
    writeln!(out, "family:            {}", font.family())?;
    writeln!(out, "qualified name:    {}", font.qualified_name())?;
    writeln!(
        out,
        "cell:              {}x{}",
        font.glyph_fixed_width(),
        font.glyph_height()
    )?;
    writeln!(
        out,
        "width:             {}",
        if font.is_fixed_width() {
            "fixed"
        } else {
            "variable"
        }
    )?;
    writeln!(out, "glyph spacing:     {}", font.glyph_spacing())?;
    writeln!(out, "baseline:          {}", font.baseline())?;
    writeln!(out, "mean line:         {}", font.mean_line())?;
    writeln!(out, "x-height:          {}", font.x_height())?;
    writeln!(out, "presentation size: {}", font.presentation_size())?;
    writeln!(out, "weight:            {}", font.weight())?;
    writeln!(
        out,
        "glyph widths:      {}..={}",
        font.min_glyph_width(),
        font.max_glyph_width()
    )?;
    writeln!(
        out,
        "glyphs:            {} present, {} allocated",
        font.code_points().count(),
        font.glyph_count()
    )?;
    writeln!(out, "blocks:")?;
    for block in font.materialized_blocks() {
        let first = CodePoint(block * 256);
        let last = CodePoint(block * 256 + 255);
        let present = font.code_points().filter(|cp| cp / 256 == block).count();
        writeln!(out, "  {first}..{last}  {present:3} glyphs")?;
    }
    Ok(())
}

/// Print one glyph as rows of `#` (ink) and `.` (paper).
pub fn print_glyph(
    font: &BitmapFont,
    code_point: CodePoint,
    out: &mut dyn Write,
) -> std::io::Result<()> {
    let glyph = font.glyph(code_point.0);
    let origin = match glyph.origin() {
        GlyphOrigin::Font => "",
        GlyphOrigin::Emoji => " (emoji)",
        GlyphOrigin::Replacement => " (replacement)",
    };
    writeln!(out, "{code_point}: advance {}{origin}", glyph.width())?;
    for line in render(&glyph, font.glyph_fixed_width()) {
        writeln!(out, "{line}")?;
    }
    Ok(())
}

fn render(glyph: &Glyph, cell_width: u8) -> Vec<String> {
    let Some(bitmap) = glyph.bitmap() else {
        return Vec::new();
    };
    let columns = bitmap.width().max(cell_width) as usize;
    (0..bitmap.height())
        .map(|y| {
            (0..columns)
                .map(|x| if bitmap.bit_at(x, y) { INK } else { PAPER })
                .collect()
        })
        .collect()
}
