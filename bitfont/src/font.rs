//! Bitmap fonts

use std::{
    path::Path,
    sync::{Arc, OnceLock},
};

use types::{LittleEndian, Tag, FONT_MAGIC, GLYPHS_PER_BLOCK, MAX_CODE_POINT};

use crate::{
    error::{Error, FormatError},
    font_data::FontData,
    glyph::{Glyph, GlyphBitmap, GlyphOrigin},
    glyph_table::{GlyphTable, OwnedGlyphs, SectionLayout},
    header::{write_fixed_str, FontFileHeader},
    provider::{EmojiCatalog, FontResolver},
    range_index::RangeIndex,
    source::{FontBytes, SharedFontData},
};

/// The code point whose glyph stands in for missing glyphs.
pub const REPLACEMENT_CHAR: u32 = '?' as u32;

/// The weight requested when resolving a bold variant.
pub const BOLD_WEIGHT: u16 = 700;

/// A raster font with sparse Unicode coverage.
///
/// A font decoded with [`BitmapFont::read`] or [`BitmapFont::from_shared`]
/// views its glyph data in place; editing it (for instance with
/// [`ensure_space_for`](Self::ensure_space_for)) first copies that data into
/// storage owned by the font. Fonts made with [`BitmapFont::new`] or
/// [`Clone::clone`] always own their storage.
///
/// None of the methods take a lock: a font that is being edited must not be
/// read from elsewhere at the same time, which `&mut self` already enforces.
pub struct BitmapFont<'a> {
    name: String,
    family: String,
    glyph_width: u8,
    glyph_height: u8,
    glyph_spacing: u8,
    baseline: u8,
    mean_line: u8,
    presentation_size: u8,
    weight: u16,
    fixed_width: bool,
    metrics: Metrics,
    index: RangeIndex,
    glyphs: GlyphTable<'a>,
    emoji: Option<Arc<dyn EmojiCatalog>>,
    bold: OnceLock<BoldVariant>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct Metrics {
    min_glyph_width: u8,
    max_glyph_width: u8,
    x_height: u8,
}

/// The cached result of a bold variant lookup.
#[derive(Clone)]
enum BoldVariant {
    /// There is no distinct bold face; this font is its own bold variant.
    Same,
    Other(Arc<BitmapFont<'static>>),
}

impl<'a> BitmapFont<'a> {
    /// Decode a font from a buffer, without copying its glyph data.
    pub fn read(data: FontData<'a>) -> Result<Self, FormatError> {
        let (header, layout) = parse(data)?;
        let glyphs = GlyphTable::Borrowed {
            data: FontBytes::Borrowed(data.as_bytes()),
            layout,
        };
        Ok(Self::from_parts(&header, glyphs))
    }

    pub(crate) fn from_parts(header: &FontFileHeader, glyphs: GlyphTable<'a>) -> Self {
        let index = RangeIndex::from_mask(glyphs.range_mask());
        let mut font = BitmapFont {
            name: header.name().into_owned(),
            family: header.family().into_owned(),
            glyph_width: header.glyph_width,
            glyph_height: header.glyph_height,
            glyph_spacing: header.glyph_spacing,
            baseline: header.baseline,
            mean_line: header.mean_line,
            presentation_size: header.presentation_size,
            weight: header.weight.get(),
            fixed_width: !header.is_variable_width(),
            metrics: Metrics::default(),
            index,
            glyphs,
            emoji: None,
            bold: OnceLock::new(),
        };
        font.update_metrics();
        font
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    /// The family, presentation size and weight, e.g. "Katica 10 400".
    pub fn qualified_name(&self) -> String {
        format!("{} {} {}", self.family, self.presentation_size, self.weight)
    }

    /// The width of the glyph cell; the advance of every glyph in a fixed
    /// width font.
    pub fn glyph_fixed_width(&self) -> u8 {
        self.glyph_width
    }

    pub fn glyph_height(&self) -> u8 {
        self.glyph_height
    }

    /// Horizontal space inserted between adjacent glyphs.
    pub fn glyph_spacing(&self) -> u8 {
        self.glyph_spacing
    }

    pub fn baseline(&self) -> u8 {
        self.baseline
    }

    pub fn mean_line(&self) -> u8 {
        self.mean_line
    }

    pub fn x_height(&self) -> u8 {
        self.metrics.x_height
    }

    pub fn presentation_size(&self) -> u8 {
        self.presentation_size
    }

    pub fn weight(&self) -> u16 {
        self.weight
    }

    pub fn is_fixed_width(&self) -> bool {
        self.fixed_width
    }

    /// The narrowest glyph present in the font.
    pub fn min_glyph_width(&self) -> u8 {
        self.metrics.min_glyph_width
    }

    /// The widest glyph present in the font, or the cell width if that is
    /// wider.
    pub fn max_glyph_width(&self) -> u8 {
        self.metrics.max_glyph_width
    }

    /// The number of glyphs storage is allocated for.
    pub fn glyph_count(&self) -> usize {
        self.index.materialized_count() * GLYPHS_PER_BLOCK
    }

    /// One bit per 256 code point block; set bits have glyph storage.
    pub fn range_mask(&self) -> &[u8] {
        self.glyphs.range_mask()
    }

    /// The indices of blocks with glyph storage, in ascending order.
    pub fn materialized_blocks(&self) -> impl Iterator<Item = u32> + '_ {
        self.index.iter().map(|(block, _)| block as u32)
    }

    /// Every code point with a non-zero stored width, in ascending order.
    pub fn code_points(&self) -> impl Iterator<Item = u32> + '_ {
        let widths = self.glyphs.widths();
        self.index.iter().flat_map(move |(block, slot)| {
            (0..GLYPHS_PER_BLOCK)
                .filter(move |ix| {
                    widths
                        .get(slot * GLYPHS_PER_BLOCK + ix)
                        .is_some_and(|width| *width > 0)
                })
                .map(move |ix| (block * GLYPHS_PER_BLOCK + ix) as u32)
        })
    }

    /// `false` if glyph data is still viewed in a decoded buffer.
    pub fn owns_storage(&self) -> bool {
        !self.glyphs.is_borrowed()
    }

    /// The position of `code_point` in the dense glyph arrays.
    pub fn glyph_index(&self, code_point: u32) -> Option<usize> {
        self.index.lookup(code_point)
    }

    /// `true` if the block containing `code_point` has glyph storage.
    pub fn is_materialized(&self, code_point: u32) -> bool {
        self.glyph_index(code_point).is_some()
    }

    /// `true` if the font has a glyph with a non-zero width for `code_point`.
    pub fn contains(&self, code_point: u32) -> bool {
        self.glyph_width(code_point) > 0
    }

    /// The stored width of `code_point`, zero if it has none.
    pub fn glyph_width(&self, code_point: u32) -> u8 {
        self.glyph_index(code_point)
            .and_then(|ix| self.glyphs.widths().get(ix).copied())
            .unwrap_or(0)
    }

    /// The stored bitmap for `code_point`, with no fallback.
    ///
    /// Returns `None` if the code point's block has no storage. The bitmap of
    /// a code point in a materialized block is returned even if its width is
    /// zero.
    pub fn glyph_bitmap(&self, code_point: u32) -> Option<GlyphBitmap<'_>> {
        let index = self.glyph_index(code_point)?;
        let height = self.glyph_height as usize;
        let rows = self
            .glyphs
            .rows()
            .slice(index * height..(index + 1) * height)?;
        let width = self.glyphs.widths().get(index).copied()?;
        Some(GlyphBitmap::new(rows, width))
    }

    /// Look up the glyph to draw for `code_point`.
    ///
    /// If the font has no glyph (or a glyph of width zero), a variable width
    /// font asks its emoji catalog, and failing that uses the replacement
    /// character ('?'). Fixed width fonts go straight to the replacement
    /// bitmap, and always advance by the cell width.
    pub fn glyph(&self, code_point: u32) -> Glyph<'_> {
        if let Some(bitmap) = self.glyph_bitmap(code_point).filter(|b| b.width() > 0) {
            let advance = if self.fixed_width {
                self.glyph_width
            } else {
                bitmap.width()
            };
            return Glyph {
                bitmap: Some(bitmap),
                advance: advance as u32,
                origin: GlyphOrigin::Font,
                emoji: None,
            };
        }

        if !self.fixed_width {
            if let Some(emoji) = self
                .emoji
                .as_ref()
                .and_then(|catalog| catalog.lookup(code_point))
            {
                return Glyph {
                    bitmap: None,
                    advance: emoji.advance,
                    origin: GlyphOrigin::Emoji,
                    emoji: Some(emoji),
                };
            }
        }

        let replacement = self
            .glyph_bitmap(REPLACEMENT_CHAR)
            .filter(|b| b.width() > 0);
        let advance = if self.fixed_width {
            self.glyph_width
        } else {
            replacement.map(|b| b.width()).unwrap_or(0)
        };
        Glyph {
            bitmap: replacement,
            advance: advance as u32,
            origin: GlyphOrigin::Replacement,
            emoji: None,
        }
    }

    /// The advance of `code_point`, after fallbacks.
    pub fn glyph_or_emoji_width(&self, code_point: u32) -> u32 {
        self.glyph(code_point).width()
    }

    /// The width of a run of text.
    pub fn width(&self, text: &str) -> u32 {
        self.measure(text.chars().map(u32::from))
    }

    /// The width of a run of UTF-32 code points.
    pub fn width_utf32(&self, code_points: &[u32]) -> u32 {
        self.measure(code_points.iter().copied())
    }

    /// Sum the advances of `code_points`, with glyph spacing between each
    /// adjacent pair.
    pub fn measure(&self, code_points: impl IntoIterator<Item = u32>) -> u32 {
        let mut width = 0u32;
        for (i, code_point) in code_points.into_iter().enumerate() {
            if i > 0 {
                width = width.saturating_add(self.glyph_spacing as u32);
            }
            width = width.saturating_add(self.glyph_or_emoji_width(code_point));
        }
        width
    }

    /// Use `catalog` to size code points the font has no glyph for.
    pub fn with_emoji_catalog(mut self, catalog: Arc<dyn EmojiCatalog>) -> Self {
        self.emoji = Some(catalog);
        self
    }

    pub fn set_emoji_catalog(&mut self, catalog: Option<Arc<dyn EmojiCatalog>>) {
        self.emoji = catalog;
    }

    /// The bold face of this font's family and size.
    ///
    /// The face is looked up once and cached; if `resolver` has no bold face,
    /// this font is returned.
    pub fn bold_variant(&self, resolver: &dyn FontResolver) -> &BitmapFont<'a> {
        let variant = self.bold.get_or_init(|| {
            match resolver.resolve(&self.family, self.presentation_size, BOLD_WEIGHT) {
                Some(font) => BoldVariant::Other(font),
                None => {
                    log::debug!("no bold variant of '{}', using itself", self.qualified_name());
                    BoldVariant::Same
                }
            }
        });
        match variant {
            BoldVariant::Same => self,
            BoldVariant::Other(font) => font.as_ref(),
        }
    }

    /// Give the block containing `code_point` glyph storage.
    ///
    /// The new block's glyphs are blank with a width of zero. Existing glyphs
    /// keep their data and code points. A font viewing a decoded buffer copies
    /// its glyph data first.
    ///
    /// # Panics
    ///
    /// Panics if `code_point` is greater than U+10FFFF.
    pub fn ensure_space_for(&mut self, code_point: u32) {
        assert!(
            code_point <= MAX_CODE_POINT,
            "code point {code_point:#X} is out of range"
        );
        let block = RangeIndex::block_of(code_point);
        if self.index.slot(block).is_some() {
            return;
        }
        let glyphs = self.glyphs.make_owned();
        if let Some(slot) = self.index.materialize(&mut glyphs.range_mask, block) {
            glyphs.insert_block(slot, self.glyph_height as usize);
            log::debug!(
                "materialized block {block} (U+{:04X}) at slot {slot}",
                block * GLYPHS_PER_BLOCK
            );
        }
    }

    /// Set the stored width of `code_point`, materializing its block.
    ///
    /// # Panics
    ///
    /// Panics if `code_point` is greater than U+10FFFF.
    pub fn set_glyph_width(&mut self, code_point: u32, width: u8) {
        self.ensure_space_for(code_point);
        let Some(index) = self.glyph_index(code_point) else {
            return;
        };
        if let Some(slot) = self.glyphs.make_owned().widths.get_mut(index) {
            *slot = width;
        }
        self.update_metrics();
    }

    /// Set the rows of `code_point`, materializing its block.
    ///
    /// Rows past the glyph height are ignored, missing rows are blank, and
    /// bits outside the glyph cell are cleared.
    ///
    /// # Panics
    ///
    /// Panics if `code_point` is greater than U+10FFFF.
    pub fn set_glyph_rows(&mut self, code_point: u32, rows: &[u32]) {
        self.ensure_space_for(code_point);
        let Some(index) = self.glyph_index(code_point) else {
            return;
        };
        let height = self.glyph_height as usize;
        let mask = row_mask(self.glyph_width);
        let glyphs = self.glyphs.make_owned();
        if let Some(dest) = glyphs.rows.get_mut(index * height..(index + 1) * height) {
            for (y, row) in dest.iter_mut().enumerate() {
                *row = rows.get(y).copied().unwrap_or(0) & mask;
            }
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_family(&mut self, family: impl Into<String>) {
        self.family = family.into();
    }

    pub fn set_glyph_spacing(&mut self, spacing: u8) {
        self.glyph_spacing = spacing;
    }

    pub fn set_baseline(&mut self, baseline: u8) {
        self.baseline = baseline;
        self.update_metrics();
    }

    pub fn set_mean_line(&mut self, mean_line: u8) {
        self.mean_line = mean_line;
        self.update_metrics();
    }

    pub fn set_presentation_size(&mut self, size: u8) {
        self.presentation_size = size;
    }

    pub fn set_weight(&mut self, weight: u16) {
        self.weight = weight;
    }

    pub fn set_fixed_width(&mut self, fixed_width: bool) {
        self.fixed_width = fixed_width;
        self.update_metrics();
    }

    /// Recompute the derived font-wide metrics.
    fn update_metrics(&mut self) {
        self.metrics.x_height = self.baseline.saturating_sub(self.mean_line);
        if self.fixed_width {
            self.metrics.min_glyph_width = self.glyph_width;
            self.metrics.max_glyph_width = self.glyph_width;
            return;
        }
        let (min, max) = self
            .glyphs
            .widths()
            .iter()
            .copied()
            .filter(|width| *width > 0)
            .fold((u8::MAX, 0), |(min, max), width| {
                (min.min(width), max.max(width))
            });
        self.metrics.min_glyph_width = if max == 0 { self.glyph_width } else { min };
        self.metrics.max_glyph_width = max.max(self.glyph_width);
    }

    /// Convert into a font that owns all of its data.
    ///
    /// Unlike [`Clone::clone`] this does not copy storage the font already owns.
    pub fn into_owned(self) -> BitmapFont<'static> {
        let BitmapFont {
            name,
            family,
            glyph_width,
            glyph_height,
            glyph_spacing,
            baseline,
            mean_line,
            presentation_size,
            weight,
            fixed_width,
            metrics,
            index,
            glyphs,
            emoji,
            bold,
        } = self;
        BitmapFont {
            name,
            family,
            glyph_width,
            glyph_height,
            glyph_spacing,
            baseline,
            mean_line,
            presentation_size,
            weight,
            fixed_width,
            metrics,
            index,
            glyphs: GlyphTable::Owned(glyphs.into_owned_glyphs()),
            emoji,
            bold,
        }
    }

    /// The header that describes the font's current state.
    pub(crate) fn header(&self) -> FontFileHeader {
        FontFileHeader {
            magic: FONT_MAGIC,
            glyph_width: self.glyph_width,
            glyph_height: self.glyph_height,
            range_mask_size: LittleEndian::from(self.glyphs.range_mask().len() as u16),
            is_variable_width: (!self.fixed_width) as u8,
            glyph_spacing: self.glyph_spacing,
            baseline: self.baseline,
            mean_line: self.mean_line,
            presentation_size: self.presentation_size,
            weight: LittleEndian::from(self.weight),
            name: write_fixed_str(&self.name),
            family: write_fixed_str(&self.family),
            unused: LittleEndian::default(),
        }
    }

    pub(crate) fn glyph_table(&self) -> &GlyphTable<'a> {
        &self.glyphs
    }
}

impl BitmapFont<'static> {
    /// Create an empty font with the given cell size.
    ///
    /// The font has no glyph storage; use [`ensure_space_for`](Self::ensure_space_for)
    /// or the glyph setters to add some.
    pub fn new(glyph_width: u8, glyph_height: u8, fixed_width: bool) -> Self {
        let mut font = BitmapFont {
            name: "Untitled".into(),
            family: "Untitled".into(),
            glyph_width,
            glyph_height,
            glyph_spacing: 1,
            baseline: 0,
            mean_line: 0,
            presentation_size: 0,
            weight: 400,
            fixed_width,
            metrics: Metrics::default(),
            index: RangeIndex::default(),
            glyphs: GlyphTable::Owned(OwnedGlyphs::default()),
            emoji: None,
            bold: OnceLock::new(),
        };
        font.update_metrics();
        font
    }

    /// Decode a font that shares ownership of its buffer.
    ///
    /// The font views the buffer in place and keeps it alive.
    pub fn from_shared(data: SharedFontData) -> Result<Self, FormatError> {
        let (header, layout) = parse(FontData::new(data.as_bytes()))?;
        let glyphs = GlyphTable::Borrowed {
            data: FontBytes::Shared(data),
            layout,
        };
        Ok(Self::from_parts(&header, glyphs))
    }

    /// Map the font file at `path` and decode it.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let data = SharedFontData::map(path)?;
        let font = Self::from_shared(data).inspect_err(|err| {
            log::debug!("failed to decode '{}': {err}", path.display());
        })?;
        Ok(font)
    }
}

/// Validate the header and locate each section of an encoded font.
fn parse(data: FontData<'_>) -> Result<(FontFileHeader, SectionLayout), FormatError> {
    if let Some(magic) = Tag::from_prefix(data.as_bytes()) {
        if magic != FONT_MAGIC {
            log::debug!("header.magic != '{FONT_MAGIC}', instead it's '{magic}'");
            return Err(FormatError::BadMagic(magic));
        }
    }
    let mut cursor = data.cursor();
    let header = *cursor.read_ref::<FontFileHeader>()?;
    header.validate().inspect_err(|err| log::debug!("{err}"))?;

    let range_mask = cursor.read_array_range::<u8>(header.range_mask_size())?;
    let blocks: usize = data
        .read_array::<u8>(range_mask.clone())?
        .iter()
        .map(|byte| byte.count_ones() as usize)
        .sum();
    let glyph_count = blocks * GLYPHS_PER_BLOCK;
    let rows = cursor
        .read_array_range::<LittleEndian<u32>>(glyph_count * header.glyph_height as usize)?;
    let widths = cursor.read_array_range::<u8>(glyph_count)?;
    if cursor.remaining_bytes() > 0 {
        log::debug!("ignoring {} trailing bytes", cursor.remaining_bytes());
    }
    Ok((
        header,
        SectionLayout {
            range_mask,
            rows,
            widths,
        },
    ))
}

/// The bits of a row that fall inside a cell `width` pixels wide.
fn row_mask(width: u8) -> u32 {
    match width {
        32.. => u32::MAX,
        width => (1u32 << width) - 1,
    }
}

impl Clone for BitmapFont<'_> {
    /// Copy the font into freshly allocated storage.
    ///
    /// The copy never views the original's buffer, so it can be edited freely.
    fn clone(&self) -> Self {
        BitmapFont {
            name: self.name.clone(),
            family: self.family.clone(),
            glyph_width: self.glyph_width,
            glyph_height: self.glyph_height,
            glyph_spacing: self.glyph_spacing,
            baseline: self.baseline,
            mean_line: self.mean_line,
            presentation_size: self.presentation_size,
            weight: self.weight,
            fixed_width: self.fixed_width,
            metrics: self.metrics,
            index: self.index.clone(),
            glyphs: GlyphTable::Owned(self.glyphs.to_owned_glyphs()),
            emoji: self.emoji.clone(),
            bold: OnceLock::new(),
        }
    }
}

impl std::fmt::Debug for BitmapFont<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BitmapFont")
            .field("name", &self.name)
            .field("family", &self.family)
            .field("glyph_width", &self.glyph_width)
            .field("glyph_height", &self.glyph_height)
            .field("fixed_width", &self.fixed_width)
            .field("blocks", &self.index.materialized_count())
            .field("owns_storage", &self.owns_storage())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use bitfont_test_data::{variable_5x7 as v57, EMPTY_FIXED_8X16, HEADER_LEN};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::provider::EmojiGlyph;

    const GRINNING: u32 = 0x1f600;

    fn catalog(advance: u32) -> Arc<BTreeMap<u32, EmojiGlyph>> {
        let glyph = EmojiGlyph {
            advance,
            bitmap: Some(7),
        };
        Arc::new(BTreeMap::from([(GRINNING, glyph)]))
    }

    fn rows_of(bitmap: GlyphBitmap) -> Vec<u32> {
        bitmap.rows().iter().collect()
    }

    #[test]
    fn read_empty() {
        let font = BitmapFont::read(EMPTY_FIXED_8X16.into()).unwrap();
        assert_eq!(font.name(), "Empty");
        assert_eq!(font.family(), "Test");
        assert_eq!(font.qualified_name(), "Test 10 400");
        assert_eq!(font.glyph_fixed_width(), 8);
        assert_eq!(font.glyph_height(), 16);
        assert!(font.is_fixed_width());
        assert_eq!(font.x_height(), 7);
        assert_eq!(font.glyph_count(), 0);
        assert!(!font.owns_storage());
        assert!(!font.is_materialized(0x41));
        assert_eq!(font.glyph_bitmap(0x41).map(|_| ()), None);
    }

    #[test]
    fn read_variable() {
        let bytes = bitfont_test_data::variable_5x7();
        let font = BitmapFont::read(FontData::new(&bytes)).unwrap();
        assert_eq!(font.name(), "Variable 5x7");
        assert!(!font.is_fixed_width());
        assert_eq!(font.glyph_count(), 512);
        assert_eq!(font.materialized_blocks().collect::<Vec<_>>(), v57::BLOCKS);
        assert_eq!(font.glyph_width(v57::CAPITAL_A), v57::CAPITAL_A_WIDTH);
        assert_eq!(
            rows_of(font.glyph_bitmap(v57::CAPITAL_A).unwrap()),
            v57::CAPITAL_A_ROWS
        );
        assert_eq!(rows_of(font.glyph_bitmap(v57::ACUTE).unwrap()), v57::ACUTE_ROWS);
        assert_eq!(
            font.code_points().collect::<Vec<_>>(),
            [v57::QUESTION_MARK, v57::CAPITAL_A, v57::ACUTE]
        );
        assert_eq!(font.min_glyph_width(), v57::ACUTE_WIDTH);
        assert_eq!(font.max_glyph_width(), 5);
        assert_eq!(font.x_height(), 4);
    }

    #[test]
    fn sparse_lookup() {
        let bytes = bitfont_test_data::variable_5x7();
        let font = BitmapFont::read(FontData::new(&bytes)).unwrap();
        for code_point in [0x100, 0x1ff, 0x250, 0x400, 0x4e00, 0x1f600, 0x10ffff] {
            assert_eq!(font.glyph_index(code_point), None, "{code_point:#X}");
            assert!(!font.contains(code_point));
        }
        // materialized, but no glyph
        assert!(font.is_materialized(0x42));
        assert!(!font.contains(0x42));
        assert!(font.contains(v57::ACUTE));
    }

    #[test]
    fn glyph_fallbacks_variable_width() {
        let bytes = bitfont_test_data::variable_5x7();
        let font = BitmapFont::read(FontData::new(&bytes))
            .unwrap()
            .with_emoji_catalog(catalog(11));

        let glyph = font.glyph(v57::CAPITAL_A);
        assert_eq!(glyph.origin(), GlyphOrigin::Font);
        assert_eq!(glyph.width(), 5);
        assert_eq!(glyph.emoji(), None);

        let emoji = font.glyph(GRINNING);
        assert_eq!(emoji.origin(), GlyphOrigin::Emoji);
        assert_eq!(emoji.width(), 11);
        assert!(emoji.bitmap().is_none());
        assert_eq!(emoji.emoji().and_then(|e| e.bitmap), Some(7));

        // unmaterialized block, not an emoji
        let missing = font.glyph(0x4e00);
        assert_eq!(missing.origin(), GlyphOrigin::Replacement);
        assert_eq!(missing.width(), v57::QUESTION_MARK_WIDTH as u32);
        assert_eq!(rows_of(missing.bitmap().unwrap()), v57::QUESTION_MARK_ROWS);

        // materialized, but zero width
        let blank = font.glyph(0x42);
        assert_eq!(blank.origin(), GlyphOrigin::Replacement);
        assert_eq!(blank.width(), v57::QUESTION_MARK_WIDTH as u32);
    }

    #[test]
    fn fixed_width_always_advances_by_cell() {
        let mut font = BitmapFont::new(8, 16, true).with_emoji_catalog(catalog(20));
        font.set_glyph_width(0x41, 5);
        assert_eq!(font.glyph(0x41).width(), 8);
        assert_eq!(font.glyph(0x41).bitmap().map(|b| b.width()), Some(5));
        assert_eq!(font.glyph(0x42).width(), 8);
        assert_eq!(font.glyph(GRINNING).width(), 8);
        assert_eq!(font.glyph(GRINNING).origin(), GlyphOrigin::Replacement);
        assert!(font.glyph(GRINNING).bitmap().is_none());
        assert_eq!(font.glyph(GRINNING).emoji(), None);
    }

    #[test]
    fn replace_emoji_catalog() {
        let bytes = bitfont_test_data::variable_5x7();
        let mut font = BitmapFont::read(FontData::new(&bytes)).unwrap();
        assert_eq!(font.glyph(GRINNING).origin(), GlyphOrigin::Replacement);
        font.set_emoji_catalog(Some(catalog(12)));
        assert_eq!(font.glyph(GRINNING).origin(), GlyphOrigin::Emoji);
        assert_eq!(font.width("A\u{1f600}"), 5 + 1 + 12);
        font.set_emoji_catalog(None);
        assert_eq!(font.width("A\u{1f600}"), 5 + 1 + v57::QUESTION_MARK_WIDTH as u32);
    }

    #[test]
    fn replacement_without_question_mark() {
        let mut font = BitmapFont::new(6, 8, false);
        font.set_glyph_width(0x41, 4);
        let glyph = font.glyph(0x42);
        assert_eq!(glyph.origin(), GlyphOrigin::Replacement);
        assert_eq!(glyph.width(), 0);
        assert!(glyph.bitmap().is_none());
    }

    #[test]
    fn measure() {
        let bytes = bitfont_test_data::variable_5x7();
        let font = BitmapFont::read(FontData::new(&bytes)).unwrap();
        assert_eq!(font.width(""), 0);
        assert_eq!(font.width("A"), 5);
        // 5 + 1 + 4 + 1 + 5
        assert_eq!(font.width("A?A"), 16);
        assert_eq!(font.width("A\u{301}"), 5 + 1 + 2);
        let utf32: Vec<u32> = "A\u{301}?".chars().map(u32::from).collect();
        assert_eq!(font.width_utf32(&utf32), font.width("A\u{301}?"));
        // missing glyphs measure as '?'
        assert_eq!(font.width("Ab"), 5 + 1 + 4);
    }

    #[test]
    fn growth_copies_borrowed_data() {
        let _ = env_logger::builder().is_test(true).try_init();
        let bytes = bitfont_test_data::variable_5x7();
        let mut font = BitmapFont::read(FontData::new(&bytes)).unwrap();
        font.ensure_space_for(0x141);
        assert!(font.owns_storage());
        assert_eq!(font.materialized_blocks().collect::<Vec<_>>(), [0, 1, 3]);
        assert!(font.is_materialized(0x141));
        assert_eq!(font.glyph_width(0x141), 0);
        assert!(rows_of(font.glyph_bitmap(0x141).unwrap()).iter().all(|row| *row == 0));
        assert_eq!(font.glyph_width(v57::ACUTE), v57::ACUTE_WIDTH);
        assert_eq!(rows_of(font.glyph_bitmap(v57::ACUTE).unwrap()), v57::ACUTE_ROWS);
        assert_eq!(font.glyph_index(v57::ACUTE), Some(2 * 256 + 1));
        // the source buffer is unchanged
        assert_eq!(bytes.as_slice(), bitfont_test_data::variable_5x7().as_slice());
    }

    #[test]
    fn growth_is_idempotent() {
        let mut font = BitmapFont::new(8, 16, true);
        font.ensure_space_for(0x41);
        font.set_glyph_width(0x41, 8);
        font.ensure_space_for(0x42);
        font.ensure_space_for(0xff);
        assert_eq!(font.glyph_count(), 256);
        assert_eq!(font.glyph_width(0x41), 8);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn growth_past_unicode() {
        BitmapFont::new(8, 16, true).ensure_space_for(0x110000);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_width_past_unicode() {
        BitmapFont::new(8, 16, true).set_glyph_width(0x110000, 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn set_rows_past_unicode() {
        BitmapFont::new(8, 16, true).set_glyph_rows(0x110000, &[1]);
    }

    #[test]
    fn set_glyph_rows_masks_and_pads() {
        let mut font = BitmapFont::new(4, 3, false);
        font.set_glyph_rows(0x41, &[0xff, 0b1001]);
        assert_eq!(rows_of(font.glyph_bitmap(0x41).unwrap()), [0b1111, 0b1001, 0]);
        font.set_glyph_rows(0x41, &[1, 2, 3, 4, 5]);
        assert_eq!(rows_of(font.glyph_bitmap(0x41).unwrap()), [1, 2, 3]);
        assert_eq!(row_mask(0), 0);
        assert_eq!(row_mask(31), 0x7fff_ffff);
        assert_eq!(row_mask(32), u32::MAX);
        assert_eq!(row_mask(200), u32::MAX);
    }

    #[test]
    fn metrics_follow_edits() {
        let mut font = BitmapFont::new(10, 12, false);
        assert_eq!((font.min_glyph_width(), font.max_glyph_width()), (10, 10));
        font.set_glyph_width(0x69, 2);
        font.set_glyph_width(0x6d, 12);
        assert_eq!((font.min_glyph_width(), font.max_glyph_width()), (2, 12));
        font.set_fixed_width(true);
        assert_eq!((font.min_glyph_width(), font.max_glyph_width()), (10, 10));
        font.set_baseline(9);
        font.set_mean_line(4);
        assert_eq!(font.x_height(), 5);
        font.set_mean_line(11);
        assert_eq!(font.x_height(), 0);
    }

    #[test]
    fn clone_is_independent() {
        let bytes = bitfont_test_data::variable_5x7();
        let font = BitmapFont::read(FontData::new(&bytes)).unwrap();
        let mut copy = font.clone();
        assert!(copy.owns_storage());
        assert!(!font.owns_storage());
        copy.set_glyph_width(v57::CAPITAL_A, 1);
        copy.set_glyph_rows(v57::CAPITAL_A, &[]);
        assert_eq!(font.glyph_width(v57::CAPITAL_A), v57::CAPITAL_A_WIDTH);
        assert_eq!(
            rows_of(font.glyph_bitmap(v57::CAPITAL_A).unwrap()),
            v57::CAPITAL_A_ROWS
        );
        assert_eq!(copy.glyph_width(v57::CAPITAL_A), 1);
    }

    #[test]
    fn into_owned_outlives_buffer() {
        let owned = {
            let bytes = bitfont_test_data::variable_5x7().into_vec();
            let font = BitmapFont::read(FontData::new(&bytes)).unwrap();
            font.into_owned()
        };
        assert!(owned.owns_storage());
        assert_eq!(owned.glyph_width(v57::ACUTE), v57::ACUTE_WIDTH);
    }

    #[test]
    fn shared_font_keeps_data_alive() {
        let data = SharedFontData::new(bitfont_test_data::variable_5x7().into_vec());
        let first = BitmapFont::from_shared(data.clone()).unwrap();
        let second = BitmapFont::from_shared(data).unwrap();
        assert!(!first.owns_storage());
        assert_eq!(first.glyph_width(v57::ACUTE), second.glyph_width(v57::ACUTE));
    }

    struct Database {
        bold: Option<Arc<BitmapFont<'static>>>,
        lookups: std::cell::Cell<usize>,
    }

    impl FontResolver for Database {
        fn resolve(&self, family: &str, size: u8, weight: u16) -> Option<Arc<BitmapFont<'static>>> {
            assert_eq!((family, size, weight), ("Test", 10, BOLD_WEIGHT));
            self.lookups.set(self.lookups.get() + 1);
            self.bold.clone()
        }
    }

    #[test]
    fn bold_variant_is_cached() {
        let mut bold = BitmapFont::new(8, 16, true);
        bold.set_name("Test Bold");
        let db = Database {
            bold: Some(Arc::new(bold)),
            lookups: Default::default(),
        };
        let font = BitmapFont::read(EMPTY_FIXED_8X16.into()).unwrap();
        assert_eq!(font.bold_variant(&db).name(), "Test Bold");
        assert_eq!(font.bold_variant(&db).name(), "Test Bold");
        assert_eq!(db.lookups.get(), 1);
    }

    #[test]
    fn bold_variant_defaults_to_self() {
        let db = Database {
            bold: None,
            lookups: Default::default(),
        };
        let font = BitmapFont::read(EMPTY_FIXED_8X16.into()).unwrap();
        assert!(std::ptr::eq(font.bold_variant(&db), &font));
        assert!(std::ptr::eq(font.bold_variant(&db), &font));
        assert_eq!(db.lookups.get(), 1);
    }

    #[test]
    fn decode_errors() {
        assert_eq!(
            BitmapFont::read(b"!Fnt".as_slice().into()).map(|_| ()),
            Err(FormatError::BadMagic(Tag::new(b"!Fnt")))
        );
        assert_eq!(
            BitmapFont::read(b"+Fn".as_slice().into()).map(|_| ()),
            Err(FormatError::Truncated {
                needed: HEADER_LEN,
                available: 3
            })
        );
        let bytes = bitfont_test_data::variable_5x7();
        let short = bitfont_test_data::truncated_by(&bytes, 1);
        assert_eq!(
            BitmapFont::read(FontData::new(&short)).map(|_| ()),
            Err(FormatError::Truncated {
                needed: bytes.len(),
                available: bytes.len() - 1
            })
        );
    }

    #[test]
    fn mask_size_must_match_data() {
        let mut bytes = bitfont_test_data::variable_5x7();
        bytes.write_at("range_mask_size", 2u16);
        assert!(matches!(
            BitmapFont::read(FontData::new(&bytes)),
            Err(FormatError::Truncated { .. })
        ));
    }

    #[test]
    fn slots_follow_the_mask() {
        // blocks 0 and 1 instead of 0 and 3: the second slot now serves U+01xx
        let mut bytes = bitfont_test_data::variable_5x7();
        bytes.write_at("range_mask", 0b0000_0011u8);
        let font = BitmapFont::read(FontData::new(&bytes)).unwrap();
        assert_eq!(font.materialized_blocks().collect::<Vec<_>>(), [0, 1]);
        assert!(!font.is_materialized(v57::ACUTE));
        assert_eq!(font.glyph_width(0x101), v57::ACUTE_WIDTH);
        assert_eq!(rows_of(font.glyph_bitmap(0x101).unwrap()), v57::ACUTE_ROWS);
    }
}
