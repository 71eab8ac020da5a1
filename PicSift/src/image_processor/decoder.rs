//! Image decoding from raw bytes
//!
//! The decode probe is the last step of the classification cascade. It asks
//! the `image` crate decoders whether a blob decodes at all, which catches
//! formats the magic table does not enumerate (TIFF, ICO, PNM, ...).
//!
//! Decoding is CPU-bound, so [`ImageCrateProbe`] runs it on a blocking worker.
//! The classifier bounds every probe with a timeout.

use crate::utils::error::PicSiftError;
use async_trait::async_trait;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::sync::Arc;

type Result<T> = std::result::Result<T, PicSiftError>;

/// Decode image from raw bytes
///
/// This function attempts to automatically detect the image format and decode it.
/// It supports all formats enabled in the `image` crate dependency.
///
/// # Arguments
/// * `data` - Raw image file bytes
///
/// # Returns
/// * `Ok(DynamicImage)` - Successfully decoded image
/// * `Err(PicSiftError::Image)` - Failed to decode (invalid format or corrupt data)
pub fn decode_image(data: &[u8]) -> Result<DynamicImage> {
    if data.is_empty() {
        return Err(PicSiftError::Image("Empty image data".to_string()));
    }

    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| PicSiftError::Image(format!("Format detection failed: {}", e)))?;

    if reader.format().is_none() {
        return Err(PicSiftError::Image(
            "Format detection failed: no decoder recognizes the data".to_string(),
        ));
    }

    reader
        .decode()
        .map_err(|e| PicSiftError::Image(format!("Failed to decode image: {}", e)))
}

/// Fallback oracle answering "does this blob decode as an image?"
///
/// Implementations must complete on both outcomes and release whatever they
/// allocated before returning. The caller applies the timeout, which also
/// covers loading the content.
#[async_trait]
pub trait DecodeProbe: Send + Sync {
    /// Whether the leading bytes are worth loading the whole blob for
    ///
    /// Returning `false` rejects the blob without reading past the header.
    fn accepts_header(&self, _header: &[u8]) -> bool {
        true
    }

    async fn probe(&self, data: Arc<[u8]>) -> Result<bool>;
}

/// Decode probe backed by the `image` crate
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateProbe;

#[async_trait]
impl DecodeProbe for ImageCrateProbe {
    /// Only formats an enabled `image` decoder can recognize from the header
    fn accepts_header(&self, header: &[u8]) -> bool {
        image::guess_format(header)
            .map(|format| format.reading_enabled())
            .unwrap_or(false)
    }

    async fn probe(&self, data: Arc<[u8]>) -> Result<bool> {
        let len = data.len();

        // The decoded pixels are dropped inside the worker on every path
        let decoded = tokio::task::spawn_blocking(move || match decode_image(&data) {
            Ok(img) => {
                tracing::debug!("Decode probe succeeded: {}x{}", img.width(), img.height());
                true
            }
            Err(e) => {
                tracing::debug!("Decode probe failed: {}", e);
                false
            }
        })
        .await
        .map_err(|e| PicSiftError::Image(format!("Decode worker failed: {}", e)))?;

        tracing::debug!("Decode probe finished for {} bytes: {}", len, decoded);
        Ok(decoded)
    }
}
