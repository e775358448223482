//! Converting fonts from the dense `!Fnt` format
//!
//! Legacy fonts store a fixed number of consecutive glyphs starting at U+0000,
//! selected by a type byte in the header. Conversion keeps only the 256 glyph
//! blocks that contain at least one glyph with a non-zero width.

use types::{LittleEndian, Tag, FONT_MAGIC, GLYPHS_PER_BLOCK, LEGACY_FONT_MAGIC};

use crate::{
    error::FormatError,
    font_data::FontData,
    glyph_table::{GlyphTable, OwnedGlyphs},
    header::{FontFileHeader, NAME_FIELD_LEN},
    BitmapFont,
};

/// The on-disk header of a `!Fnt` file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct LegacyFontFileHeader {
    pub magic: Tag,
    pub glyph_width: u8,
    pub glyph_height: u8,
    pub font_type: u8,
    pub is_variable_width: u8,
    pub glyph_spacing: u8,
    pub baseline: u8,
    pub mean_line: u8,
    pub presentation_size: u8,
    pub weight: LittleEndian<u16>,
    pub name: [u8; NAME_FIELD_LEN],
    pub family: [u8; NAME_FIELD_LEN],
    pub unused: LittleEndian<u16>,
}

const _: () = assert!(std::mem::size_of::<LegacyFontFileHeader>() == LegacyFontFileHeader::LEN);

impl LegacyFontFileHeader {
    pub const LEN: usize = 80;

    /// The number of glyphs stored for this font's type.
    pub fn glyph_count(&self) -> Result<usize, FormatError> {
        match self.font_type {
            0 => Ok(256),
            1 => Ok(384),
            2 => Ok(1280),
            3 => Ok(1536),
            other => Err(FormatError::UnknownLegacyType(other)),
        }
    }
}

impl BitmapFont<'static> {
    /// Convert a font in the legacy dense format.
    ///
    /// Blocks whose glyphs all have zero width are dropped; a trailing partial
    /// block is padded with blank glyphs.
    pub fn from_legacy(data: FontData<'_>) -> Result<Self, FormatError> {
        if let Some(magic) = Tag::from_prefix(data.as_bytes()) {
            if magic != LEGACY_FONT_MAGIC {
                log::debug!("header.magic != '{LEGACY_FONT_MAGIC}', instead it's '{magic}'");
                return Err(FormatError::BadMagic(magic));
            }
        }
        let mut cursor = data.cursor();
        let legacy = *cursor.read_ref::<LegacyFontFileHeader>()?;
        let count = legacy.glyph_count()?;
        let height = legacy.glyph_height as usize;
        let rows_range = cursor.read_array_range::<LittleEndian<u32>>(count * height)?;
        let widths_range = cursor.read_array_range::<u8>(count)?;
        let rows: &[LittleEndian<u32>] = data.read_array(rows_range)?;
        let widths: &[u8] = data.read_array(widths_range)?;

        let mut glyphs = OwnedGlyphs::default();
        for (block, block_widths) in widths.chunks(GLYPHS_PER_BLOCK).enumerate() {
            if block_widths.iter().all(|width| *width == 0) {
                log::debug!("skipping empty block {block}");
                continue;
            }
            let byte = block / 8;
            if byte >= glyphs.range_mask.len() {
                glyphs.range_mask.resize(byte + 1, 0);
            }
            glyphs.range_mask[byte] |= 1 << (block % 8);

            let start = block * GLYPHS_PER_BLOCK;
            let end = start + block_widths.len();
            let block_rows = rows.get(start * height..end * height).unwrap_or_default();
            glyphs.rows.extend(block_rows.iter().map(|row| row.get()));
            glyphs
                .rows
                .resize(glyphs.rows.len() + (GLYPHS_PER_BLOCK - block_widths.len()) * height, 0);
            glyphs.widths.extend_from_slice(block_widths);
            glyphs
                .widths
                .resize(glyphs.widths.len() + GLYPHS_PER_BLOCK - block_widths.len(), 0);
        }
        if glyphs.range_mask.is_empty() {
            return Err(FormatError::EmptyFont);
        }

        let header = FontFileHeader {
            magic: FONT_MAGIC,
            glyph_width: legacy.glyph_width,
            glyph_height: legacy.glyph_height,
            range_mask_size: LittleEndian::from(glyphs.range_mask.len() as u16),
            is_variable_width: legacy.is_variable_width,
            glyph_spacing: legacy.glyph_spacing,
            baseline: legacy.baseline,
            mean_line: legacy.mean_line,
            presentation_size: legacy.presentation_size,
            weight: legacy.weight,
            name: legacy.name,
            family: legacy.family,
            unused: LittleEndian::default(),
        };
        header.validate()?;
        Ok(BitmapFont::from_parts(&header, GlyphTable::Owned(glyphs)))
    }
}
