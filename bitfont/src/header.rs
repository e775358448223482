//! The fixed-size record at the start of every font file

use std::borrow::Cow;

use types::{LittleEndian, Tag, FONT_MAGIC};

use crate::error::{FormatError, StringField};

/// Length of the `name` and `family` fields, including the NUL terminator.
pub const NAME_FIELD_LEN: usize = 32;

/// The on-disk header of a `+Fnt` file.
///
/// Every field has an alignment of one, so the struct can be viewed in place
/// at the start of a font buffer. Its size is part of the file format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, bytemuck::Pod, bytemuck::Zeroable)]
#[repr(C)]
pub struct FontFileHeader {
    pub magic: Tag,
    pub glyph_width: u8,
    pub glyph_height: u8,
    pub range_mask_size: LittleEndian<u16>,
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

const _: () = assert!(std::mem::size_of::<FontFileHeader>() == FontFileHeader::LEN);

impl FontFileHeader {
    /// The encoded size of the header, in bytes.
    pub const LEN: usize = 81;

    /// Check the magic number and string terminators.
    pub fn validate(&self) -> Result<(), FormatError> {
        if self.magic != FONT_MAGIC {
            return Err(FormatError::BadMagic(self.magic));
        }
        if self.name[NAME_FIELD_LEN - 1] != 0 {
            return Err(FormatError::UnterminatedString(StringField::Name));
        }
        if self.family[NAME_FIELD_LEN - 1] != 0 {
            return Err(FormatError::UnterminatedString(StringField::Family));
        }
        Ok(())
    }

    pub fn name(&self) -> Cow<'_, str> {
        read_fixed_str(&self.name)
    }

    pub fn family(&self) -> Cow<'_, str> {
        read_fixed_str(&self.family)
    }

    pub fn range_mask_size(&self) -> usize {
        self.range_mask_size.get() as usize
    }

    pub fn is_variable_width(&self) -> bool {
        self.is_variable_width != 0
    }
}

/// Decode a NUL padded string field, stopping at the first NUL.
pub(crate) fn read_fixed_str(field: &[u8]) -> Cow<'_, str> {
    let len = field.iter().position(|b| *b == 0).unwrap_or(field.len());
    String::from_utf8_lossy(&field[..len])
}

/// Encode a string into a NUL padded field.
///
/// Strings that don't fit are cut at the last char boundary that leaves room
/// for the terminator.
pub(crate) fn write_fixed_str(text: &str) -> [u8; NAME_FIELD_LEN] {
    let mut len = text.len().min(NAME_FIELD_LEN - 1);
    while !text.is_char_boundary(len) {
        len -= 1;
    }
    let mut field = [0u8; NAME_FIELD_LEN];
    field[..len].copy_from_slice(&text.as_bytes()[..len]);
    field
}
