//! Services a font consults but does not own

use std::{collections::BTreeMap, sync::Arc};

use crate::BitmapFont;

/// A font database that can find a face by family, size and weight.
///
/// This is used to look up bold variants. Implementations decide how fonts
/// are discovered and cached.
pub trait FontResolver {
    /// Return the best face for the request, or `None` if there is none.
    fn resolve(&self, family: &str, size: u8, weight: u16) -> Option<Arc<BitmapFont<'static>>>;
}

/// A color emoji found in an [`EmojiCatalog`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EmojiGlyph {
    /// The horizontal advance of the emoji.
    pub advance: u32,
    /// The catalog's handle for the bitmap to draw, if it has one.
    pub bitmap: Option<u32>,
}

/// A catalog of color emoji bitmaps, keyed by code point.
///
/// Variable width fonts consult the catalog for any code point they have no
/// glyph for. The catalog owns the bitmaps; fonts only carry its handles.
pub trait EmojiCatalog: Send + Sync {
    /// Return the emoji for `code_point`, if there is one.
    fn lookup(&self, code_point: u32) -> Option<EmojiGlyph>;
}

impl EmojiCatalog for BTreeMap<u32, EmojiGlyph> {
    fn lookup(&self, code_point: u32) -> Option<EmojiGlyph> {
        self.get(&code_point).copied()
    }
}
