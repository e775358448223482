//! A buffer for building little-endian test data.

use std::collections::HashMap;

use bitfont_types::Scalar;

/// A convenience type for generating a buffer of little-endian bytes.
#[derive(Debug, Clone, Default)]
pub struct LeBuffer {
    data: Vec<u8>,
    tagged_locations: HashMap<String, usize>,
}

impl LeBuffer {
    pub fn new() -> Self {
        Default::default()
    }

    /// The current length of the buffer in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the buffer contains zero bytes.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Return a reference to the contents of the buffer
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }

    /// Write any scalar to this buffer.
    pub fn push(mut self, item: impl Scalar) -> Self {
        self.data.extend(item.to_raw().as_ref());
        self
    }

    pub fn push_with_tag(mut self, item: impl Scalar, tag: &str) -> Self {
        self.tagged_locations.insert(tag.to_string(), self.data.len());
        self.data.extend(item.to_raw().as_ref());
        self
    }

    /// Write raw bytes, such as a magic number.
    pub fn push_bytes(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    pub fn push_bytes_with_tag(mut self, bytes: &[u8], tag: &str) -> Self {
        self.tagged_locations.insert(tag.to_string(), self.data.len());
        self.data.extend_from_slice(bytes);
        self
    }

    /// Write a string into a fixed-size, NUL padded field.
    ///
    /// Panics if the string does not leave room for a terminator.
    pub fn push_fixed_str(mut self, text: &str, field_len: usize) -> Self {
        assert!(text.len() < field_len, "'{text}' does not fit in {field_len} bytes");
        self.data.extend_from_slice(text.as_bytes());
        self.data
            .extend(std::iter::repeat(0).take(field_len - text.len()));
        self
    }

    /// Write multiple scalars into the buffer
    pub fn extend<T: Scalar>(mut self, iter: impl IntoIterator<Item = T>) -> Self {
        for item in iter {
            self.data.extend(item.to_raw().as_ref());
        }
        self
    }

    pub fn offset_for(&self, tag: &str) -> usize {
        // panic on unrecognized tags
        self.tagged_locations.get(tag).copied().unwrap()
    }

    fn data_for(&mut self, tag: &str) -> &mut [u8] {
        let offset = self.offset_for(tag);
        &mut self.data[offset..]
    }

    /// Overwrite the bytes at a tagged location.
    pub fn write_at(&mut self, tag: &str, item: impl Scalar) {
        let raw = item.to_raw();
        self.write_bytes_at(tag, raw.as_ref());
    }

    pub fn write_bytes_at(&mut self, tag: &str, new_data: &[u8]) {
        let data = self.data_for(tag);

        if data.len() < new_data.len() {
            panic!("not enough room left in buffer for the requested write.");
        }

        for (left, right) in data.iter_mut().zip(new_data) {
            *left = *right
        }
    }
}

impl std::ops::Deref for LeBuffer {
    type Target = [u8];
    fn deref(&self) -> &Self::Target {
        &self.data
    }
}
