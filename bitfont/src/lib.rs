//! Reading, editing and writing bitmap fonts
//!
//! This crate handles raster fonts in the `+Fnt` format: a fixed-size header,
//! a range mask, and dense arrays of glyph rows and widths. Glyphs are grouped
//! into blocks of 256 consecutive code points, and only the blocks whose bit
//! is set in the range mask are stored.
//!
//! A [`BitmapFont`] decoded from a buffer views its glyph data in place. Edits
//! copy that data into storage the font owns, so the buffer is never
//! modified. Fonts can also be loaded from a file, which is memory-mapped for
//! the lifetime of the font.
//!
//! Every row of a glyph is a 32-bit word; bit `x` of the word is the pixel in
//! column `x`, counting from the left.
//!
//! # Example
//!
//! ```
//! use bitfont::{BitmapFont, FontData};
//!
//! let mut font = BitmapFont::new(8, 16, true);
//! font.set_glyph_width('A' as u32, 8);
//! font.set_glyph_rows('A' as u32, &[0b0011_1100, 0b0100_0010]);
//! let bytes = font.to_bytes();
//!
//! let decoded = BitmapFont::read(FontData::new(&bytes)).unwrap();
//! assert_eq!(decoded.glyph('A' as u32).width(), 8);
//! assert!(!decoded.contains('B' as u32));
//! ```
//!
//! Fonts in the dense `!Fnt` format that predates range masks can be
//! converted with [`BitmapFont::from_legacy`].

#![cfg_attr(docsrs, feature(doc_auto_cfg))]
#![deny(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

mod error;
mod font;
mod font_data;
mod glyph;
mod glyph_table;
mod header;
mod legacy;
mod provider;
mod range_index;
mod source;
mod write;

/// Public re-export of the bitfont-types crate.
pub extern crate bitfont_types as types;

pub use error::{Error, FormatError, IoError, StringField};
pub use font::{BitmapFont, BOLD_WEIGHT, REPLACEMENT_CHAR};
pub use font_data::FontData;
pub use glyph::{Glyph, GlyphBitmap, GlyphOrigin, GlyphRows};
pub use header::{FontFileHeader, NAME_FIELD_LEN};
pub use legacy::LegacyFontFileHeader;
pub use provider::{EmojiCatalog, EmojiGlyph, FontResolver};
pub use range_index::RangeIndex;
pub use source::SharedFontData;
pub use write::{dump_font, FontWrite, FontWriter};
