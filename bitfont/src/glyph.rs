//! Views of individual glyphs

use types::LittleEndian;

use crate::provider::EmojiGlyph;

/// A run of glyph row words.
///
/// Rows are either viewed in place in the encoded font, or in owned storage
/// after the font has been edited.
#[derive(Clone, Copy)]
pub struct GlyphRows<'a>(RowsKind<'a>);

#[derive(Clone, Copy)]
enum RowsKind<'a> {
    Raw(&'a [LittleEndian<u32>]),
    Native(&'a [u32]),
}

impl<'a> GlyphRows<'a> {
    pub(crate) fn raw(rows: &'a [LittleEndian<u32>]) -> Self {
        Self(RowsKind::Raw(rows))
    }

    pub(crate) fn native(rows: &'a [u32]) -> Self {
        Self(RowsKind::Native(rows))
    }

    /// The number of rows.
    pub fn len(&self) -> usize {
        match self.0 {
            RowsKind::Raw(rows) => rows.len(),
            RowsKind::Native(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The row at `index`.
    pub fn get(&self, index: usize) -> Option<u32> {
        match self.0 {
            RowsKind::Raw(rows) => rows.get(index).map(|row| row.get()),
            RowsKind::Native(rows) => rows.get(index).copied(),
        }
    }

    /// A sub-range of these rows.
    pub fn slice(&self, range: std::ops::Range<usize>) -> Option<GlyphRows<'a>> {
        match self.0 {
            RowsKind::Raw(rows) => rows.get(range).map(GlyphRows::raw),
            RowsKind::Native(rows) => rows.get(range).map(GlyphRows::native),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + 'a {
        let rows = *self;
        (0..rows.len()).filter_map(move |ix| rows.get(ix))
    }

    /// The rows as encoded little-endian bytes, if they are viewed in place.
    pub(crate) fn encoded_bytes(&self) -> Option<&'a [u8]> {
        match self.0 {
            RowsKind::Raw(rows) => Some(bytemuck::cast_slice(rows)),
            RowsKind::Native(_) => None,
        }
    }
}

impl std::fmt::Debug for GlyphRows<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// The stored bitmap of a single glyph.
///
/// Each row is one scanline; bit `x` of a row is the pixel in column `x`, so
/// the least significant bit is the leftmost pixel.
#[derive(Clone, Copy, Debug)]
pub struct GlyphBitmap<'a> {
    rows: GlyphRows<'a>,
    width: u8,
}

impl<'a> GlyphBitmap<'a> {
    pub(crate) fn new(rows: GlyphRows<'a>, width: u8) -> Self {
        Self { rows, width }
    }

    /// The stored width of the glyph, zero if absent.
    pub fn width(&self) -> u8 {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> GlyphRows<'a> {
        self.rows
    }

    /// Returns `true` if the pixel at (`x`, `y`) is inked.
    pub fn bit_at(&self, x: usize, y: usize) -> bool {
        x < 32 && self.rows.get(y).is_some_and(|row| row & (1 << x) != 0)
    }
}

/// Where the advance and bitmap of a [`Glyph`] came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GlyphOrigin {
    /// The font has a glyph for the code point.
    Font,
    /// The emoji catalog has a bitmap for the code point.
    Emoji,
    /// Neither does; the replacement ('?') glyph stands in.
    Replacement,
}

/// The result of looking up a code point, after fallbacks.
#[derive(Clone, Copy, Debug)]
pub struct Glyph<'a> {
    pub(crate) bitmap: Option<GlyphBitmap<'a>>,
    pub(crate) advance: u32,
    pub(crate) origin: GlyphOrigin,
    pub(crate) emoji: Option<EmojiGlyph>,
}

impl<'a> Glyph<'a> {
    /// The bitmap to draw.
    ///
    /// This is `None` for emoji, which are drawn from the catalog (see
    /// [`emoji`](Self::emoji)), and for replacements in fonts that have no
    /// '?' glyph.
    pub fn bitmap(&self) -> Option<GlyphBitmap<'a>> {
        self.bitmap
    }

    /// The catalog entry, if this glyph came from the emoji catalog.
    pub fn emoji(&self) -> Option<EmojiGlyph> {
        self.emoji
    }

    /// The horizontal advance, not including glyph spacing.
    pub fn width(&self) -> u32 {
        self.advance
    }

    pub fn origin(&self) -> GlyphOrigin {
        self.origin
    }
}
