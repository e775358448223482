//! Errors that occur while reading or writing fonts

use std::path::PathBuf;

use types::Tag;

/// One of the two fixed-size string fields in the font header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StringField {
    Name,
    Family,
}

impl std::fmt::Display for StringField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StringField::Name => f.write_str("name"),
            StringField::Family => f.write_str("family"),
        }
    }
}

/// An error that occurs when interpreting font data.
///
/// These are terminal: no partially decoded font is ever returned.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum FormatError {
    #[error("bad magic '{0}'")]
    BadMagic(Tag),
    #[error("the {0} field is not NUL-terminated")]
    UnterminatedString(StringField),
    #[error("font data truncated: {needed} bytes needed, {available} available")]
    Truncated { needed: usize, available: usize },
    #[error("unknown legacy font type {0}")]
    UnknownLegacyType(u8),
    #[error("font contains no glyphs")]
    EmptyFont,
}

/// An error at the storage edges: opening a source or writing to a sink.
#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("could not read '{}': {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to write font data: {0}")]
    SinkFailure(#[source] std::io::Error),
}

/// Any error produced by the path-level [`load`] and [`save`] operations.
///
/// [`load`]: crate::BitmapFont::load
/// [`save`]: crate::BitmapFont::save
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Io(#[from] IoError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages() {
        assert_eq!(
            FormatError::BadMagic(Tag::new(b"!Fnt")).to_string(),
            "bad magic '!Fnt'"
        );
        assert_eq!(
            FormatError::UnterminatedString(StringField::Family).to_string(),
            "the family field is not NUL-terminated"
        );
        let err = IoError::SourceUnavailable {
            path: PathBuf::from("/fonts/Katica.font"),
            source: std::io::ErrorKind::NotFound.into(),
        };
        assert!(err.to_string().starts_with("could not read '/fonts/Katica.font': "));
        let err: Error = FormatError::EmptyFont.into();
        assert_eq!(err.to_string(), "font contains no glyphs");
    }
}
