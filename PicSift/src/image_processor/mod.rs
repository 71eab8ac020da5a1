//! Image type identification
//!
//! Decides whether a blob with unreliable metadata is a displayable image and
//! which extension it should carry.
//!
//! # Architecture
//!
//! - **magic**: Header Sniffer, matches the first bytes against a signature table
//! - **decoder**: Decode Probe, asks the `image` crate whether the blob decodes
//! - **classifier**: runs the cascade and suggests a download name
//!
//! # Cascade
//!
//! 1. Declared MIME type starting with `image/`
//! 2. File name extension in [`SUPPORTED_EXTENSIONS`]
//! 3. Magic header signature
//! 4. Decode probe (bounded by a timeout)
//!
//! Each step short-circuits on a positive answer. Failures inside a step count
//! as a negative answer and the cascade moves on.

pub mod classifier;
pub mod decoder;
pub mod magic;

/// File name extensions accepted without looking at the content
///
/// A name ending in one of these is never rewritten by the download-name
/// suggestion either.
pub const SUPPORTED_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "avif", "tif", "tiff", "svg",
];

/// Map of image MIME subtypes to canonical extensions
const MIME_EXTENSIONS: &[(&str, &str)] = &[
    ("png", ".png"),
    ("jpeg", ".jpg"),
    ("gif", ".gif"),
    ("webp", ".webp"),
    ("bmp", ".bmp"),
    ("avif", ".avif"),
    ("svg+xml", ".svg"),
];

/// Return the extension of a file name without the dot
///
/// Leading-dot names such as `.jpg` count as having no extension, matching
/// `std::path::Path` semantics.
pub fn file_extension(filename: &str) -> Option<&str> {
    std::path::Path::new(filename)
        .extension()
        .and_then(|s| s.to_str())
}

/// Check if a file name carries an extension from [`SUPPORTED_EXTENSIONS`]
///
/// Case-insensitive.
///
/// # Examples
/// ```
/// use picsift::is_image_file;
///
/// assert!(is_image_file("cover.PNG"));
/// assert!(is_image_file("photo.webp"));
/// assert!(!is_image_file("readme.txt"));
/// ```
pub fn is_image_file(filename: &str) -> bool {
    file_extension(filename)
        .map(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Whether a declared MIME type names the image top-level type
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim()
        .get(..6)
        .is_some_and(|top| top.eq_ignore_ascii_case("image/"))
}

/// Canonical extension for an image MIME type
///
/// Parameters after `;` are ignored. Unknown subtypes and non-image types
/// return an empty string.
pub fn mime_to_extension(mime: &str) -> &'static str {
    if !is_image_mime(mime) {
        return "";
    }

    let essence = mime.split(';').next().unwrap_or_default().trim();
    let subtype = essence[6..].to_ascii_lowercase();

    MIME_EXTENSIONS
        .iter()
        .find(|(known, _)| *known == subtype)
        .map(|(_, ext)| *ext)
        .unwrap_or("")
}
