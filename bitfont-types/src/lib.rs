//! Common scalar data types used in bitmap font files
//!
//! Every multi-byte field in the `+Fnt` format is stored little-endian, and no
//! field has an alignment requirement greater than one. The types in this
//! crate are therefore safe to view in place over arbitrary byte buffers.

#![deny(rustdoc::broken_intra_doc_links)]

mod raw;
mod tag;


pub use raw::{LittleEndian, Scalar};
pub use tag::Tag;

/// The magic number at the start of every `+Fnt` file.
pub const FONT_MAGIC: Tag = Tag::new(b"+Fnt");

/// The magic number of the older, dense `!Fnt` format.
pub const LEGACY_FONT_MAGIC: Tag = Tag::new(b"!Fnt");

/// The number of consecutive code points that share one range mask bit.
pub const GLYPHS_PER_BLOCK: usize = 256;

/// The largest valid Unicode code point.
pub const MAX_CODE_POINT: u32 = 0x10FFFF;

/// The number of blocks needed to cover every Unicode code point.
pub const MAX_BLOCKS: usize = (MAX_CODE_POINT as usize + 1) / GLYPHS_PER_BLOCK;
