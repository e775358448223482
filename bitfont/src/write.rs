//! Encoding fonts

use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use crate::{
    error::{Error, IoError},
    glyph::GlyphRows,
    header::FontFileHeader,
    BitmapFont,
};

/// A type that can be written out as part of a font file.
pub trait FontWrite {
    /// Write our data into this [`FontWriter`].
    fn write_into(&self, writer: &mut FontWriter);
}

/// Collects the bytes of an encoded font.
#[derive(Debug, Default)]
pub struct FontWriter {
    bytes: Vec<u8>,
}

impl FontWriter {
    pub fn with_capacity(capacity: usize) -> Self {
        FontWriter {
            bytes: Vec::with_capacity(capacity),
        }
    }

    /// Append raw bytes.
    pub fn write_slice(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Serialize `item` into a new buffer.
pub fn dump_font<T: FontWrite + ?Sized>(item: &T) -> Vec<u8> {
    let mut writer = FontWriter::default();
    item.write_into(&mut writer);
    writer.into_bytes()
}

impl FontWrite for FontFileHeader {
    fn write_into(&self, writer: &mut FontWriter) {
        writer.write_slice(bytemuck::bytes_of(self))
    }
}

impl FontWrite for [u8] {
    fn write_into(&self, writer: &mut FontWriter) {
        writer.write_slice(self)
    }
}

impl FontWrite for GlyphRows<'_> {
    fn write_into(&self, writer: &mut FontWriter) {
        // rows viewed in an encoded buffer are already little-endian
        if let Some(bytes) = self.encoded_bytes() {
            writer.write_slice(bytes);
            return;
        }
        for row in self.iter() {
            writer.write_slice(&row.to_le_bytes());
        }
    }
}

impl FontWrite for BitmapFont<'_> {
    fn write_into(&self, writer: &mut FontWriter) {
        let glyphs = self.glyph_table();
        self.header().write_into(writer);
        glyphs.range_mask().write_into(writer);
        glyphs.rows().write_into(writer);
        glyphs.widths().write_into(writer);
    }
}

impl BitmapFont<'_> {
    /// The number of bytes [`to_bytes`](Self::to_bytes) will produce.
    pub fn encoded_len(&self) -> usize {
        let glyphs = self.glyph_table();
        FontFileHeader::LEN
            + glyphs.range_mask().len()
            + glyphs.rows().len() * std::mem::size_of::<u32>()
            + glyphs.widths().len()
    }

    /// Encode the font in the `+Fnt` format.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut writer = FontWriter::with_capacity(self.encoded_len());
        self.write_into(&mut writer);
        writer.into_bytes()
    }

    /// Encode the font into `sink`.
    pub fn write_to<W: Write>(&self, mut sink: W) -> Result<(), IoError> {
        sink.write_all(&self.to_bytes())
            .and_then(|_| sink.flush())
            .map_err(IoError::SinkFailure)
    }

    /// Encode the font into a new file at `path`, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        let file = File::create(path).map_err(IoError::SinkFailure)?;
        self.write_to(BufWriter::new(file))?;
        log::debug!("wrote {} bytes to '{}'", self.encoded_len(), path.display());
        Ok(())
    }
}
