//! Gallery store
//!
//! Holds the accepted files in path order and answers search queries.
//!
//! Mutations go through [`GalleryStore::add_batch`], [`GalleryStore::set_query`]
//! and [`GalleryStore::clear`]; each one bumps [`GalleryStore::revision`], which
//! is the signal for the presentation layer to re-render. Reads through
//! [`GalleryStore::filtered_view`] never touch handles or state.
//!
//! Items sharing a path are kept side by side; nothing deduplicates them.

use std::sync::Arc;

use futures::future::join_all;

use crate::config::{ClassifierConfig, GalleryConfig};
use crate::image_processor::classifier::{display_name, Classification, Classifier};
use crate::image_processor::decoder::{DecodeProbe, ImageCrateProbe};
use crate::source::RawBlob;
use crate::utils::debug_log::log_rejection;
use crate::utils::format::format_bytes;

pub mod handle;
mod sort;

pub use handle::{DisplayHandle, HandleRegistry};
pub use sort::{compare_paths, locale_cmp, natural_sort_cmp};

/// Stable identity of a gallery item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(u64);

impl ItemId {
    pub fn get(&self) -> u64 {
        self.0
    }
}

/// An accepted file
#[derive(Debug)]
pub struct GalleryItem {
    id: ItemId,
    handle: DisplayHandle,
    name: String,
    path: String,
    size: u64,
    extension: String,
    download_name: String,
}

impl GalleryItem {
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Display handle keeping the bytes alive
    pub fn handle(&self) -> &DisplayHandle {
        &self.handle
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path relative to the selected folder, or the name for loose files
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    /// Extension suggested by the classifier (leading dot, may be empty)
    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn download_name(&self) -> &str {
        &self.download_name
    }

    /// Card subtitle, e.g. `holiday/beach.jpg • 2.0 KB`
    pub fn caption(&self) -> String {
        format!("{} \u{2022} {}", self.path, format_bytes(self.size))
    }

    fn matches(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.path.to_lowercase().contains(needle)
    }
}

/// Counts from one [`GalleryStore::add_batch`] call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub accepted: usize,
    pub rejected: usize,
}

/// Ordered collection of accepted files plus the current search query
pub struct GalleryStore<P = ImageCrateProbe> {
    classifier: Classifier<P>,
    config: GalleryConfig,
    registry: Arc<HandleRegistry>,
    items: Vec<GalleryItem>,
    query: String,
    next_id: u64,
    revision: u64,
}

impl GalleryStore<ImageCrateProbe> {
    pub fn new() -> Self {
        Self::with_classifier(Classifier::default(), GalleryConfig::default())
    }

    /// Store configured from `PICSIFT_*` environment variables
    pub fn from_env() -> Self {
        Self::with_classifier(
            Classifier::new(ClassifierConfig::from_env()),
            GalleryConfig::from_env(),
        )
    }
}

impl Default for GalleryStore<ImageCrateProbe> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: DecodeProbe> GalleryStore<P> {
    pub fn with_classifier(classifier: Classifier<P>, config: GalleryConfig) -> Self {
        Self {
            classifier,
            config,
            registry: HandleRegistry::new(),
            items: Vec::new(),
            query: String::new(),
            next_id: 0,
            revision: 0,
        }
    }

    /// Classify a batch and merge the images into the gallery
    ///
    /// All blobs are classified concurrently and the accepted ones are merged
    /// in a single step once the whole batch is done. A batch with no images
    /// leaves the store untouched, revision included.
    pub async fn add_batch(&mut self, blobs: Vec<RawBlob>) -> BatchOutcome {
        if blobs.is_empty() {
            return BatchOutcome::default();
        }

        let classifier = &self.classifier;
        let verdicts = join_all(blobs.iter().map(|blob| classifier.classify(blob))).await;

        let mut outcome = BatchOutcome::default();
        let mut accepted = Vec::new();
        for (blob, verdict) in blobs.into_iter().zip(verdicts) {
            if verdict.is_image {
                accepted.push(self.make_item(blob, verdict));
            } else {
                log_rejection(blob.relative_path().unwrap_or(blob.name()), blob.size());
                outcome.rejected += 1;
            }
        }
        outcome.accepted = accepted.len();

        if accepted.is_empty() {
            tracing::debug!("Batch of {} files had no images", outcome.rejected);
            return outcome;
        }

        let order = self.config.sort_order;
        self.items.extend(accepted);
        self.items
            .sort_by(|a, b| compare_paths(order, &a.path, &b.path));
        self.revision += 1;

        tracing::info!(
            "Added {} images ({} rejected), gallery holds {}",
            outcome.accepted,
            outcome.rejected,
            self.items.len()
        );
        outcome
    }

    fn make_item(&mut self, blob: RawBlob, verdict: Classification) -> GalleryItem {
        self.next_id += 1;

        let name = display_name(blob.name()).to_string();
        let path = blob
            .relative_path()
            .map(str::to_string)
            .unwrap_or_else(|| name.clone());
        let size = blob.size();

        GalleryItem {
            id: ItemId(self.next_id),
            handle: self.registry.acquire(blob.into_data()),
            name,
            path,
            size,
            extension: verdict.extension,
            download_name: verdict.download_name,
        }
    }

    /// Items whose name or path contains `query`, case-insensitively
    ///
    /// The query is trimmed; an empty query returns every item. Order is the
    /// stored path order.
    pub fn filtered_view(&self, query: &str) -> Vec<&GalleryItem> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.items.iter().collect();
        }

        self.items.iter().filter(|item| item.matches(&needle)).collect()
    }

    /// Items matching the stored query
    pub fn visible(&self) -> Vec<&GalleryItem> {
        self.filtered_view(&self.query)
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.revision += 1;
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Release every handle, drop every item and reset the query
    pub fn clear(&mut self) {
        let released = self.items.len();
        self.items.clear();
        self.query.clear();
        self.revision += 1;
        tracing::info!("Cleared gallery, released {} handles", released);
    }

    /// All items in path order
    pub fn items(&self) -> &[GalleryItem] {
        &self.items
    }

    pub fn get(&self, id: ItemId) -> Option<&GalleryItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Changes whenever the visible state may have changed
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registry tracking this store's display handles
    pub fn registry(&self) -> Arc<HandleRegistry> {
        Arc::clone(&self.registry)
    }
}
