//! PicSift - image detection for file batches with unreliable metadata
//!
//! Takes the files a user picked or dropped, works out which of them are
//! images even when the declared MIME type or extension is missing or wrong,
//! and keeps the accepted ones in a sorted, searchable gallery with a
//! corrected download name for each.
//!
//! # Pipeline
//!
//! 1. [`source`] turns picker selections into [`RawBlob`]s
//! 2. [`Classifier`] runs MIME, extension, magic-byte and decode checks
//! 3. [`GalleryStore`] keeps the accepted items and answers queries
//!
//! ```no_run
//! use picsift::{collect_folder, GalleryStore};
//!
//! # async fn run() -> picsift::Result<()> {
//! let mut gallery = GalleryStore::from_env();
//! gallery.add_batch(collect_folder("/home/me/Pictures")?).await;
//!
//! for item in gallery.filtered_view("beach") {
//!     println!("{} -> {}", item.caption(), item.download_name());
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod gallery;
mod image_processor;
pub mod source;
mod utils;

pub use config::{ClassifierConfig, GalleryConfig, SortOrder};
pub use gallery::{BatchOutcome, DisplayHandle, GalleryItem, GalleryStore, HandleRegistry, ItemId};
pub use image_processor::classifier::{
    display_name, suggest_download_name, Classification, Classifier, Method,
};
pub use image_processor::decoder::{decode_image, DecodeProbe, ImageCrateProbe};
pub use image_processor::magic;
pub use image_processor::{is_image_file, is_image_mime, mime_to_extension, SUPPORTED_EXTENSIONS};
pub use source::{collect_files, collect_folder, BlobData, RawBlob};
pub use utils::error::{PicSiftError, Result};
pub use utils::format::{format_bytes, format_count};

/// Install a `tracing` subscriber filtered by `RUST_LOG`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
    tracing::debug!("PicSift tracing initialized");
}
