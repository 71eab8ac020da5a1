//! Raw file blobs and where they come from
//!
//! A [`RawBlob`] is what a file picker or a drop target hands over: some bytes
//! plus whatever metadata the environment attached, none of which is trusted.
//! Content is either already in memory or a file on disk read on demand.

use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::io::AsyncReadExt;

mod folder;

pub use folder::{collect_files, collect_folder};

/// Where the bytes of a blob live
#[derive(Debug, Clone)]
pub enum BlobData {
    /// Already loaded
    Memory(Arc<[u8]>),
    /// Read lazily from the filesystem
    File(PathBuf),
}

/// An immutable byte blob with declared (possibly wrong) metadata
#[derive(Debug, Clone)]
pub struct RawBlob {
    data: BlobData,
    name: String,
    mime: String,
    relative_path: Option<String>,
    size: u64,
}

impl RawBlob {
    /// Create a blob from in-memory bytes
    pub fn from_bytes(
        name: impl Into<String>,
        mime: impl Into<String>,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Self {
        let bytes = bytes.into();
        Self {
            size: bytes.len() as u64,
            data: BlobData::Memory(bytes),
            name: name.into(),
            mime: mime.into(),
            relative_path: None,
        }
    }

    /// Create a blob backed by a file on disk
    ///
    /// The OS attaches no MIME type, so the declared MIME is empty and the
    /// classifier has to rely on the name and the content.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let metadata = std::fs::metadata(path)?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            data: BlobData::File(path.to_path_buf()),
            name,
            mime: String::new(),
            relative_path: None,
            size: metadata.len(),
        })
    }

    /// Attach the path relative to the selected folder
    pub fn with_relative_path(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.relative_path = (!path.is_empty()).then_some(path);
        self
    }

    /// Declared file name (may be empty)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared MIME type (may be empty or wrong)
    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Declared path relative to the selected folder, if any
    pub fn relative_path(&self) -> Option<&str> {
        self.relative_path.as_deref()
    }

    /// Byte length as declared when the blob was created
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn data(&self) -> &BlobData {
        &self.data
    }

    /// Read up to `len` leading bytes
    ///
    /// Blobs shorter than `len` give a short header, not an error.
    pub async fn read_header(&self, len: usize) -> Result<Vec<u8>> {
        match &self.data {
            BlobData::Memory(bytes) => Ok(bytes[..bytes.len().min(len)].to_vec()),
            BlobData::File(path) => {
                let file = tokio::fs::File::open(path).await?;
                let mut header = Vec::with_capacity(len);
                file.take(len as u64).read_to_end(&mut header).await?;
                Ok(header)
            }
        }
    }

    /// Load the whole content
    ///
    /// Files are read in chunks, so dropping the future stops the read.
    pub async fn read_all(&self) -> Result<Arc<[u8]>> {
        match &self.data {
            BlobData::Memory(bytes) => Ok(Arc::clone(bytes)),
            BlobData::File(path) => {
                let mut file = tokio::fs::File::open(path).await?;
                let mut content = Vec::new();
                file.read_to_end(&mut content).await?;
                Ok(Arc::from(content))
            }
        }
    }

    /// Give up the metadata and keep the content
    pub(crate) fn into_data(self) -> BlobData {
        self.data
    }
}
