//! Image format detection using magic headers (file signatures)
//!
//! This module identifies image formats by examining the first few bytes
//! (magic bytes/file signature) of a blob, independent of any declared MIME
//! type or file name.
//!
//! ## Signature Table
//!
//! Checked in this order, first match wins:
//!
//! - **PNG**: `89 50 4E 47` at offset 0
//! - **JPEG**: `FF D8` at offset 0
//! - **GIF**: `47 49 46 38` at offset 0 (GIF87a/GIF89a)
//! - **WebP**: `52 49 46 46` at offset 0 and `57 45 42 50` at offset 8 (RIFF....WEBP)
//! - **BMP**: `42 4D` at offset 0 (BM header)
//! - **AVIF**: `66 74 79 70` at offset 4 (ftyp box marker)
//!
//! ## AVIF Caveat
//!
//! The AVIF rule only looks for the `ftyp` marker and ignores the brand that
//! follows it, so any ISO-BMFF file (HEIC, MP4, ...) is reported as AVIF.
//!
//! All checks are structural. Nothing here validates the content beyond the
//! signature bytes, and short input never panics: a rule that needs bytes past
//! the end of the header simply does not match.

/// Number of leading bytes the sniffer looks at
pub const HEADER_LEN: usize = 16;

/// Represents a detected image format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    /// PNG image (89 50 4E 47)
    Png,
    /// JPEG image (FF D8)
    Jpeg,
    /// GIF image (47 49 46 38)
    Gif,
    /// WebP image (52 49 46 46 ... 57 45 42 50)
    WebP,
    /// BMP image (42 4D)
    Bmp,
    /// AVIF image (ftyp box at offset 4)
    Avif,
    /// No signature matched
    Unknown,
}

impl ImageFormat {
    /// Get format name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Png => "PNG",
            Self::Jpeg => "JPEG",
            Self::Gif => "GIF",
            Self::WebP => "WebP",
            Self::Bmp => "BMP",
            Self::Avif => "AVIF",
            Self::Unknown => "Unknown",
        }
    }

    /// Canonical file extension, including the leading dot
    ///
    /// `Unknown` has no extension and returns an empty string.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => ".png",
            Self::Jpeg => ".jpg",
            Self::Gif => ".gif",
            Self::WebP => ".webp",
            Self::Bmp => ".bmp",
            Self::Avif => ".avif",
            Self::Unknown => "",
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

/// A byte pattern expected at a fixed offset
type Part = (usize, &'static [u8]);

/// One row of the signature table: every part must match
struct Signature {
    format: ImageFormat,
    parts: &'static [Part],
}

impl Signature {
    fn matches(&self, header: &[u8]) -> bool {
        self.parts.iter().all(|&(offset, expected)| {
            header
                .get(offset..offset + expected.len())
                .is_some_and(|actual| actual == expected)
        })
    }
}

/// Signature table in priority order
const SIGNATURES: &[Signature] = &[
    Signature {
        format: ImageFormat::Png,
        parts: &[(0, &[0x89, 0x50, 0x4E, 0x47])],
    },
    Signature {
        format: ImageFormat::Jpeg,
        parts: &[(0, &[0xFF, 0xD8])],
    },
    Signature {
        format: ImageFormat::Gif,
        parts: &[(0, b"GIF8")],
    },
    Signature {
        format: ImageFormat::WebP,
        parts: &[(0, b"RIFF"), (8, b"WEBP")],
    },
    Signature {
        format: ImageFormat::Bmp,
        parts: &[(0, b"BM")],
    },
    Signature {
        format: ImageFormat::Avif,
        parts: &[(4, b"ftyp")],
    },
];

/// Detect image format from magic bytes
///
/// Only the first [`HEADER_LEN`] bytes are considered; anything after that is
/// ignored so callers can pass either a header slice or the whole blob.
///
/// # Arguments
/// * `data` - Leading bytes of the blob (may be shorter than 16 bytes)
///
/// # Returns
/// * The first matching [`ImageFormat`], or `ImageFormat::Unknown`
///
/// # Examples
/// ```
/// use picsift::magic::{detect_image_format, ImageFormat};
///
/// assert_eq!(detect_image_format(b"GIF89a"), ImageFormat::Gif);
/// assert_eq!(detect_image_format(b"hello"), ImageFormat::Unknown);
/// ```
pub fn detect_image_format(data: &[u8]) -> ImageFormat {
    let header = &data[..data.len().min(HEADER_LEN)];

    SIGNATURES
        .iter()
        .find(|sig| sig.matches(header))
        .map(|sig| sig.format)
        .unwrap_or(ImageFormat::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// PNG signature plus the start of the IHDR chunk
    const PNG_HEADER: &[u8] = &[
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, // PNG signature
        0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52, // IHDR chunk
    ];

    /// JFIF header
    const JPEG_HEADER: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01,
    ];

    const GIF_HEADER: &[u8] = b"GIF89a\x01\x00\x01\x00\x80\x00\x00";

    const WEBP_HEADER: &[u8] = b"RIFF\x40\x00\x00\x00WEBPVP8 ";

    const BMP_HEADER: &[u8] = &[0x42, 0x4D, 0x46, 0x00, 0x00, 0x00];

    const AVIF_HEADER: &[u8] = b"\x00\x00\x00\x18ftypavif";

    #[test]
    fn test_detect_png() {
        let format = detect_image_format(PNG_HEADER);
        assert_eq!(format, ImageFormat::Png);
        assert_eq!(format.extension(), ".png");
    }

    #[test]
    fn test_detect_jpeg() {
        let format = detect_image_format(JPEG_HEADER);
        assert_eq!(format, ImageFormat::Jpeg);
        assert_eq!(format.extension(), ".jpg");
    }

    #[test]
    fn test_detect_jpeg_two_byte_marker() {
        // SOI alone is enough, the following marker is not checked
        assert_eq!(detect_image_format(&[0xFF, 0xD8]), ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_gif() {
        assert_eq!(detect_image_format(GIF_HEADER), ImageFormat::Gif);
        assert_eq!(detect_image_format(b"GIF87a"), ImageFormat::Gif);
    }

    #[test]
    fn test_detect_webp() {
        let format = detect_image_format(WEBP_HEADER);
        assert_eq!(format, ImageFormat::WebP);
        assert_eq!(format.extension(), ".webp");
    }

    #[test]
    fn test_riff_without_webp_is_unknown() {
        // WAV files share the RIFF container
        assert_eq!(
            detect_image_format(b"RIFF\x24\x00\x00\x00WAVEfmt "),
            ImageFormat::Unknown
        );
    }

    #[test]
    fn test_truncated_riff_is_unknown() {
        assert_eq!(detect_image_format(b"RIFF\x00\x00\x00\x00WE"), ImageFormat::Unknown);
    }

    #[test]
    fn test_detect_bmp() {
        assert_eq!(detect_image_format(BMP_HEADER), ImageFormat::Bmp);
    }

    #[test]
    fn test_detect_avif() {
        let format = detect_image_format(AVIF_HEADER);
        assert_eq!(format, ImageFormat::Avif);
        assert_eq!(format.extension(), ".avif");
    }

    #[test]
    fn test_heic_reported_as_avif() {
        // Brand is not inspected
        assert_eq!(
            detect_image_format(b"\x00\x00\x00\x18ftypheic"),
            ImageFormat::Avif
        );
    }

    #[test]
    fn test_empty_and_short_data() {
        assert_eq!(detect_image_format(&[]), ImageFormat::Unknown);
        assert_eq!(detect_image_format(&[0x89]), ImageFormat::Unknown);
        assert_eq!(detect_image_format(&[0x89, 0x50, 0x4E]), ImageFormat::Unknown);
        assert_eq!(detect_image_format(b"\x00\x00\x00\x18fty"), ImageFormat::Unknown);
    }

    #[test]
    fn test_unrecognized_format() {
        let format = detect_image_format(b"This is not an image file");
        assert_eq!(format, ImageFormat::Unknown);
        assert!(!format.is_known());
        assert_eq!(format.extension(), "");
    }

    #[test]
    fn test_bytes_past_header_ignored() {
        // "ftyp" at offset 20 is outside the sniffed window
        let mut data = vec![0u8; 20];
        data.extend_from_slice(b"ftyp");
        assert_eq!(detect_image_format(&data), ImageFormat::Unknown);
    }

    #[test]
    fn test_priority_order() {
        // PNG magic wins even when "ftyp" also appears at offset 4
        let data = b"\x89PNGftyp";
        assert_eq!(detect_image_format(data), ImageFormat::Png);
    }

    proptest! {
        #[test]
        fn test_never_panics(data in proptest::collection::vec(any::<u8>(), 0..64)) {
            let _ = detect_image_format(&data);
        }

        #[test]
        fn test_only_first_sixteen_bytes_matter(
            head in proptest::collection::vec(any::<u8>(), 16),
            tail in proptest::collection::vec(any::<u8>(), 0..32),
        ) {
            let mut full = head.clone();
            full.extend_from_slice(&tail);
            prop_assert_eq!(detect_image_format(&head), detect_image_format(&full));
        }
    }
}
