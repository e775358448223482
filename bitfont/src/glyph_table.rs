//! Storage for the range mask, glyph rows and glyph widths

use std::ops::Range;

use types::{LittleEndian, GLYPHS_PER_BLOCK};

use crate::{glyph::GlyphRows, source::FontBytes};

/// Where each section of a decoded font lives in its buffer.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct SectionLayout {
    pub(crate) range_mask: Range<usize>,
    pub(crate) rows: Range<usize>,
    pub(crate) widths: Range<usize>,
}

/// Glyph storage owned by the font.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct OwnedGlyphs {
    pub(crate) range_mask: Vec<u8>,
    pub(crate) rows: Vec<u32>,
    pub(crate) widths: Vec<u8>,
}

/// The glyph data of a font: either a view into a decoded buffer, or owned
/// arrays.
///
/// A borrowed table is never modified; it is copied into owned storage the
/// first time it needs to change.
#[derive(Clone, Debug)]
pub(crate) enum GlyphTable<'a> {
    Borrowed {
        data: FontBytes<'a>,
        layout: SectionLayout,
    },
    Owned(OwnedGlyphs),
}

impl<'a> GlyphTable<'a> {
    pub(crate) fn range_mask(&self) -> &[u8] {
        match self {
            GlyphTable::Borrowed { data, layout } => section(data, &layout.range_mask),
            GlyphTable::Owned(glyphs) => &glyphs.range_mask,
        }
    }

    pub(crate) fn rows(&self) -> GlyphRows<'_> {
        match self {
            GlyphTable::Borrowed { data, layout } => {
                // the layout was checked when the font was decoded
                let rows: &[LittleEndian<u32>] =
                    bytemuck::try_cast_slice(section(data, &layout.rows)).unwrap_or_default();
                GlyphRows::raw(rows)
            }
            GlyphTable::Owned(glyphs) => GlyphRows::native(&glyphs.rows),
        }
    }

    pub(crate) fn widths(&self) -> &[u8] {
        match self {
            GlyphTable::Borrowed { data, layout } => section(data, &layout.widths),
            GlyphTable::Owned(glyphs) => &glyphs.widths,
        }
    }

    pub(crate) fn is_borrowed(&self) -> bool {
        matches!(self, GlyphTable::Borrowed { .. })
    }

    /// Copy the table into freshly allocated storage.
    pub(crate) fn to_owned_glyphs(&self) -> OwnedGlyphs {
        match self {
            GlyphTable::Borrowed { .. } => OwnedGlyphs {
                range_mask: self.range_mask().to_vec(),
                rows: self.rows().iter().collect(),
                widths: self.widths().to_vec(),
            },
            GlyphTable::Owned(glyphs) => glyphs.clone(),
        }
    }

    pub(crate) fn into_owned_glyphs(self) -> OwnedGlyphs {
        match self {
            GlyphTable::Owned(glyphs) => glyphs,
            borrowed => borrowed.to_owned_glyphs(),
        }
    }

    /// Return the owned storage, copying it out of the buffer first if needed.
    pub(crate) fn make_owned(&mut self) -> &mut OwnedGlyphs {
        if self.is_borrowed() {
            log::debug!("copying {} borrowed glyphs into owned storage", self.widths().len());
            *self = GlyphTable::Owned(self.to_owned_glyphs());
        }
        match self {
            GlyphTable::Owned(glyphs) => glyphs,
            GlyphTable::Borrowed { .. } => unreachable!("converted above"),
        }
    }
}

fn section<'b>(data: &'b FontBytes<'_>, range: &Range<usize>) -> &'b [u8] {
    data.as_bytes().get(range.clone()).unwrap_or_default()
}

impl OwnedGlyphs {
    /// Insert a block of 256 blank glyphs so that it occupies `slot`.
    ///
    /// Glyphs in `slot` and above move up by one block.
    pub(crate) fn insert_block(&mut self, slot: usize, glyph_height: usize) {
        let block_rows = GLYPHS_PER_BLOCK * glyph_height;
        self.rows = spliced(&self.rows, slot * block_rows, block_rows);
        self.widths = spliced(&self.widths, slot * GLYPHS_PER_BLOCK, GLYPHS_PER_BLOCK);
    }
}

/// Build a copy of `items` with `count` zeros inserted at `at`.
fn spliced<T: Copy + Default>(items: &[T], at: usize, count: usize) -> Vec<T> {
    let at = at.min(items.len());
    let mut result = Vec::with_capacity(items.len() + count);
    result.extend_from_slice(&items[..at]);
    result.resize(at + count, T::default());
    result.extend_from_slice(&items[at..]);
    result
}
