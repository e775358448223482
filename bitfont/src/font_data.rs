//! raw font bytes

use std::ops::{Range, RangeBounds};

use types::Scalar;

use crate::error::FormatError;

/// A reference to raw binary font data.
///
/// This is a wrapper around a byte slice, that provides convenience methods
/// for parsing and validating that data. Every read is bounds checked and a
/// short buffer is reported as [`FormatError::Truncated`].
#[derive(Debug, Default, Clone, Copy)]
pub struct FontData<'a> {
    bytes: &'a [u8],
}

/// A cursor for validating bytes during parsing.
///
/// Each successful read advances the cursor past the bytes it consumed.
pub(crate) struct Cursor<'a> {
    pos: usize,
    data: FontData<'a>,
}

impl<'a> FontData<'a> {
    /// Create a new `FontData` with these bytes.
    pub const fn new(bytes: &'a [u8]) -> Self {
        FontData { bytes }
    }

    /// The length of the data, in bytes
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// `true` if the data has a length of zero bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn slice(&self, range: impl RangeBounds<usize>) -> Option<FontData<'a>> {
        let bounds = (range.start_bound().cloned(), range.end_bound().cloned());
        self.bytes.get(bounds).map(|bytes| FontData { bytes })
    }

    pub fn read_at<T: Scalar>(&self, offset: usize) -> Result<T, FormatError> {
        let end = offset.saturating_add(T::RAW_BYTE_LEN);
        self.bytes
            .get(offset..end)
            .and_then(T::read)
            .ok_or_else(|| self.truncated(end))
    }

    /// Interpret the bytes at `offset` as a reference to some type `T`.
    ///
    /// `T` must have an alignment of 1; all of the record types in this crate do.
    ///
    /// # Panics
    ///
    /// Panics if `T` has an alignment greater than 1.
    pub fn read_ref_at<T: bytemuck::Pod>(&self, offset: usize) -> Result<&'a T, FormatError> {
        assert_eq!(std::mem::align_of::<T>(), 1);
        let end = offset.saturating_add(std::mem::size_of::<T>());
        self.bytes
            .get(offset..end)
            .and_then(|bytes| bytemuck::try_from_bytes(bytes).ok())
            .ok_or_else(|| self.truncated(end))
    }

    /// Interpret the bytes in `range` as a slice of `T`.
    ///
    /// The length of the range must be a multiple of the size of `T`.
    ///
    /// # Panics
    ///
    /// Panics if `T` has an alignment greater than 1.
    pub fn read_array<T: bytemuck::Pod>(
        &self,
        range: Range<usize>,
    ) -> Result<&'a [T], FormatError> {
        assert_eq!(std::mem::align_of::<T>(), 1);
        let end = range.end;
        self.bytes
            .get(range)
            .and_then(|bytes| bytemuck::try_cast_slice(bytes).ok())
            .ok_or_else(|| self.truncated(end))
    }

    pub(crate) fn cursor(&self) -> Cursor<'a> {
        Cursor {
            pos: 0,
            data: *self,
        }
    }

    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    fn truncated(&self, needed: usize) -> FormatError {
        FormatError::Truncated {
            needed,
            available: self.bytes.len(),
        }
    }
}

impl<'a> Cursor<'a> {
    pub(crate) fn read_ref<T: bytemuck::Pod>(&mut self) -> Result<&'a T, FormatError> {
        let temp = self.data.read_ref_at(self.pos);
        self.pos += std::mem::size_of::<T>();
        temp
    }

    /// Read `len` items, returning the byte range they occupy.
    pub(crate) fn read_array_range<T: bytemuck::Pod>(
        &mut self,
        len: usize,
    ) -> Result<Range<usize>, FormatError> {
        let start = self.pos;
        let end = len
            .saturating_mul(std::mem::size_of::<T>())
            .saturating_add(start);
        self.data.read_array::<T>(start..end)?;
        self.pos = end;
        Ok(start..end)
    }

    // used for logging trailing data after the last section.
    pub(crate) fn remaining_bytes(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }
}

impl<'a> From<&'a [u8]> for FontData<'a> {
    fn from(src: &'a [u8]) -> FontData<'a> {
        FontData::new(src)
    }
}

impl AsRef<[u8]> for FontData<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}
