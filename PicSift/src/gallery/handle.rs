//! Revocable display handles
//!
//! Every accepted file keeps its bytes alive through a [`DisplayHandle`], the
//! counterpart of a browser object URL. The [`HandleRegistry`] tracks which
//! handles are live; dropping a handle revokes it. Because a handle cannot be
//! cloned, each one is released exactly once.

use crate::source::BlobData;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

const URL_PREFIX: &str = "blob:picsift/";

/// Bookkeeping for issued handles
#[derive(Debug, Default)]
pub struct HandleRegistry {
    next_id: AtomicU64,
    released: AtomicU64,
    live: Mutex<HashSet<u64>>,
}

impl HandleRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Issue a handle that owns `data`
    pub fn acquire(self: &Arc<Self>, data: BlobData) -> DisplayHandle {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.live().insert(id);

        DisplayHandle {
            id,
            data,
            registry: Arc::clone(self),
        }
    }

    /// Handles issued and not yet released
    pub fn live_count(&self) -> usize {
        self.live().len()
    }

    /// Total number of releases since the registry was created
    pub fn released_count(&self) -> u64 {
        self.released.load(Ordering::SeqCst)
    }

    /// Whether a handle id is still live
    pub fn is_live(&self, id: u64) -> bool {
        self.live().contains(&id)
    }

    /// Live set, recovered if a holder panicked
    ///
    /// Every critical section is a single set operation.
    fn live(&self) -> MutexGuard<'_, HashSet<u64>> {
        self.live.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("Display handle registry lock was poisoned, recovering");
            PoisonError::into_inner(poisoned)
        })
    }

    fn release(&self, id: u64) {
        let removed = self.live().remove(&id);

        if removed {
            self.released.fetch_add(1, Ordering::SeqCst);
            tracing::trace!("Released display handle {}", id);
        } else {
            tracing::warn!("Display handle {} was not live at release", id);
        }
    }
}

/// An open reference to the display bytes of one gallery item
pub struct DisplayHandle {
    id: u64,
    data: BlobData,
    registry: Arc<HandleRegistry>,
}

impl DisplayHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    /// URL-style name for the presentation layer
    pub fn url(&self) -> String {
        format!("{}{}", URL_PREFIX, self.id)
    }

    /// Bytes (or file location) the handle keeps alive
    pub fn data(&self) -> &BlobData {
        &self.data
    }
}

impl fmt::Debug for DisplayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DisplayHandle")
            .field("id", &self.id)
            .field("url", &self.url())
            .finish()
    }
}

impl Drop for DisplayHandle {
    fn drop(&mut self) {
        self.registry.release(self.id);
    }
}
