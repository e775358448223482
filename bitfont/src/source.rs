//! Backing storage for decoded fonts

use std::{path::Path, sync::Arc};

use crate::error::IoError;

/// Font bytes with shared ownership.
///
/// This is typically a read-only memory mapping of a font file. Any number of
/// fonts may hold the same data; it is released when the last one is dropped.
#[derive(Clone)]
pub struct SharedFontData(Arc<dyn AsRef<[u8]> + Send + Sync>);

impl SharedFontData {
    /// Wrap any owned byte container.
    pub fn new(data: impl AsRef<[u8]> + Send + Sync + 'static) -> Self {
        Self(Arc::new(data))
    }

    /// Map the file at `path` into memory.
    ///
    /// Devices, directories and other non-regular files are refused.
    #[allow(unsafe_code)]
    pub fn map(path: impl AsRef<Path>) -> Result<Self, IoError> {
        let path = path.as_ref();
        let unavailable = |source| IoError::SourceUnavailable {
            path: path.to_owned(),
            source,
        };
        let file = std::fs::File::open(path).map_err(unavailable)?;
        let metadata = file.metadata().map_err(unavailable)?;
        if !metadata.is_file() {
            return Err(unavailable(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "not a regular file",
            )));
        }
        // SAFETY: the mapping is only ever read. Modifying the file while it is
        // mapped is outside of our control, as it is for any mmap based reader.
        let map = unsafe { memmap2::Mmap::map(&file) }.map_err(unavailable)?;
        log::debug!("mapped {} bytes from '{}'", map.len(), path.display());
        Ok(Self::new(map))
    }

    pub fn as_bytes(&self) -> &[u8] {
        (*self.0).as_ref()
    }
}

impl AsRef<[u8]> for SharedFontData {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl std::fmt::Debug for SharedFontData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("SharedFontData")
            .field(&self.as_bytes().len())
            .finish()
    }
}

/// The buffer a decoded font views its glyph data through.
#[derive(Clone, Debug)]
pub(crate) enum FontBytes<'a> {
    Borrowed(&'a [u8]),
    Shared(SharedFontData),
}

impl FontBytes<'_> {
    pub(crate) fn as_bytes(&self) -> &[u8] {
        match self {
            FontBytes::Borrowed(bytes) => bytes,
            FontBytes::Shared(data) => data.as_bytes(),
        }
    }
}
