//! Type classification cascade
//!
//! Orchestrates the checks that decide whether a blob is an image:
//! 1. Declared MIME type (`image/*`)
//! 2. File name extension allow-list
//! 3. Magic header sniffing
//! 4. Decode probe, bounded by [`ClassifierConfig::probe_timeout`]
//!
//! The first positive answer wins. Errors inside a step are logged and count
//! as a negative answer, so classification itself never fails.

use super::decoder::{DecodeProbe, ImageCrateProbe};
use super::magic::detect_image_format;
use super::{file_extension, is_image_file, is_image_mime, mime_to_extension};
use crate::config::ClassifierConfig;
use crate::source::RawBlob;
use crate::utils::error::{PicSiftError, Result};

/// Display name used when the declared name is empty
pub const DEFAULT_DISPLAY_NAME: &str = "unnamed";

/// Download base name used when the declared name is empty
pub const DEFAULT_DOWNLOAD_BASE: &str = "image";

/// Which cascade step accepted the blob
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    DeclaredMime,
    FileExtension,
    MagicBytes,
    DecodeProbe,
}

/// Verdict for one blob
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub is_image: bool,
    /// Suggested extension with leading dot, empty when unknown
    pub extension: String,
    /// Step that accepted the blob, `None` for rejections
    pub method: Option<Method>,
    /// Declared name with the extension corrected where needed
    pub download_name: String,
}

impl Classification {
    fn accepted(method: Method, extension: impl Into<String>, name: &str) -> Self {
        let extension = extension.into();
        Self {
            is_image: true,
            download_name: suggest_download_name(name, &extension),
            extension,
            method: Some(method),
        }
    }

    fn rejected(name: &str) -> Self {
        Self {
            is_image: false,
            extension: String::new(),
            method: None,
            download_name: suggest_download_name(name, ""),
        }
    }
}

/// Runs the cascade with a pluggable decode probe
#[derive(Debug, Clone)]
pub struct Classifier<P = ImageCrateProbe> {
    probe: P,
    config: ClassifierConfig,
}

impl Classifier<ImageCrateProbe> {
    pub fn new(config: ClassifierConfig) -> Self {
        Self::with_probe(ImageCrateProbe, config)
    }
}

impl Default for Classifier<ImageCrateProbe> {
    fn default() -> Self {
        Self::new(ClassifierConfig::default())
    }
}

impl<P: DecodeProbe> Classifier<P> {
    pub fn with_probe(probe: P, config: ClassifierConfig) -> Self {
        Self { probe, config }
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    /// Classify one blob
    ///
    /// A declared MIME of `image/*` wins over everything else, so a PNG
    /// declared as `image/jpeg` is suggested `.jpg`.
    pub async fn classify(&self, blob: &RawBlob) -> Classification {
        let name = blob.name();

        if is_image_mime(blob.mime()) {
            tracing::debug!("{}: accepted by declared MIME {}", name, blob.mime());
            return Classification::accepted(
                Method::DeclaredMime,
                mime_to_extension(blob.mime()),
                name,
            );
        }

        if is_image_file(name) {
            let declared = file_extension(name).unwrap_or_default();
            tracing::debug!("{}: accepted by file extension", name);
            return Classification::accepted(
                Method::FileExtension,
                format!(".{}", declared),
                name,
            );
        }

        let header = match blob.read_header(self.config.header_len).await {
            Ok(header) => header,
            Err(e) => {
                tracing::debug!("{}: header read failed: {}", name, e);
                return Classification::rejected(name);
            }
        };

        let format = detect_image_format(&header);
        if format.is_known() {
            tracing::debug!("{}: accepted by magic header ({})", name, format.as_str());
            return Classification::accepted(Method::MagicBytes, format.extension(), name);
        }

        if !self.probe.accepts_header(&header) {
            tracing::debug!("{}: no decoder recognizes the header", name);
            return Classification::rejected(name);
        }

        match self.run_probe(blob).await {
            Ok(true) => {
                tracing::debug!("{}: accepted by decode probe", name);
                return Classification::accepted(
                    Method::DecodeProbe,
                    self.config.fallback_extension.as_str(),
                    name,
                );
            }
            Ok(false) => {}
            Err(e) => tracing::debug!("{}: decode probe gave up: {}", name, e),
        }

        tracing::debug!("{}: not an image", name);
        Classification::rejected(name)
    }

    /// Load the content and decode it, both within the probe timeout
    async fn run_probe(&self, blob: &RawBlob) -> Result<bool> {
        let timeout = self.config.probe_timeout;
        let attempt = async {
            let data = blob.read_all().await?;
            self.probe.probe(data).await
        };

        tokio::time::timeout(timeout, attempt)
            .await
            .map_err(|_| PicSiftError::Timeout(timeout.as_millis()))?
    }
}

/// Name shown in the gallery for a declared name
pub fn display_name(name: &str) -> &str {
    if name.trim().is_empty() {
        DEFAULT_DISPLAY_NAME
    } else {
        name
    }
}

/// Suggest a download name carrying `extension`
///
/// Names that already end in an allow-listed extension are returned as is,
/// even when the content says otherwise. Other names get their extension
/// replaced, or appended when they have none. An empty `extension` leaves the
/// name untouched.
///
/// # Examples
/// ```
/// use picsift::suggest_download_name;
///
/// assert_eq!(suggest_download_name("photo.JPG", ".png"), "photo.JPG");
/// assert_eq!(suggest_download_name("weird_file", ".gif"), "weird_file.gif");
/// assert_eq!(suggest_download_name("scan.dat", ".bmp"), "scan.bmp");
/// assert_eq!(suggest_download_name("", ".webp"), "image.webp");
/// ```
pub fn suggest_download_name(name: &str, extension: &str) -> String {
    let name = if name.trim().is_empty() {
        DEFAULT_DOWNLOAD_BASE
    } else {
        name
    };

    let extension = extension.trim_start_matches('.');
    if extension.is_empty() || is_image_file(name) {
        return name.to_string();
    }

    let stem = match file_extension(name) {
        Some(old) => &name[..name.len() - old.len() - 1],
        None => name,
    };

    format!("{}.{}", stem, extension)
}
