use std::fmt::{Debug, Display, Formatter};

/// A four byte file tag, such as the `+Fnt` magic number.
///
/// Tags are compared byte-for-byte. No validation is performed on
/// construction, since a tag read from an unknown file may contain anything;
/// [`Display`] escapes bytes outside the printable ASCII range.
#[derive(
    Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, bytemuck::Pod, bytemuck::Zeroable,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Tag([u8; 4]);

impl Tag {
    /// Construct a `Tag` from raw bytes.
    pub const fn new(src: &[u8; 4]) -> Tag {
        Tag(*src)
    }

    /// Create a tag from the first four bytes of a buffer.
    ///
    /// Returns `None` if the buffer is shorter than four bytes.
    pub fn from_prefix(bytes: &[u8]) -> Option<Tag> {
        bytes
            .get(..4)
            .and_then(|prefix| <[u8; 4]>::try_from(prefix).ok())
            .map(Tag)
    }

    /// Return the raw byte array representing this tag.
    pub const fn into_bytes(self) -> [u8; 4] {
        self.0
    }

    /// `true` if every byte is in the printable ASCII range.
    pub fn is_printable(self) -> bool {
        self.0.iter().all(|b| (0x20..=0x7e).contains(b))
    }
}

impl AsRef<[u8]> for Tag {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl PartialEq<[u8; 4]> for Tag {
    fn eq(&self, other: &[u8; 4]) -> bool {
        &self.0 == other
    }
}

impl PartialEq<&[u8; 4]> for Tag {
    fn eq(&self, other: &&[u8; 4]) -> bool {
        &self.0 == *other
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for byte in self.0 {
            if (0x20..=0x7e).contains(&byte) {
                write!(f, "{}", byte as char)?;
            } else {
                write!(f, "{{0x{byte:02X}}}")?;
            }
        }
        Ok(())
    }
}

impl Debug for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tag({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(Tag::new(b"+Fnt").to_string(), "+Fnt");
        assert_eq!(Tag::new(b"!Fnt").to_string(), "!Fnt");
        assert_eq!(Tag::new(&[0, b'F', b'n', 0xff]).to_string(), "{0x00}Fn{0xFF}");
        assert_eq!(format!("{:?}", Tag::new(b"+Fnt")), "Tag(+Fnt)");
    }

    #[test]
    fn from_prefix() {
        assert_eq!(Tag::from_prefix(b"+Fnt\x08\x10"), Some(Tag::new(b"+Fnt")));
        assert_eq!(Tag::from_prefix(b"+Fn"), None);
        assert_eq!(Tag::from_prefix(b""), None);
    }

    #[test]
    fn compare_with_bytes() {
        let tag = Tag::new(b"+Fnt");
        assert_eq!(tag, b"+Fnt");
        assert_ne!(tag, b"!Fnt");
        assert!(tag.is_printable());
        assert!(!Tag::default().is_printable());
        assert_eq!(tag.into_bytes(), *b"+Fnt");
    }
}
