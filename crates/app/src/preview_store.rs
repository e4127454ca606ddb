//! In-memory holding area for images picked in the create form.
//!
//! A preview lives from the upload until the file is replaced, the create
//! succeeds, it sits unused for [`IDLE_TIMEOUT`], or the store runs out of
//! room.

use std::sync::Arc;
use std::time::Duration;

use moka::notification::RemovalCause;
use moka::sync::Cache;

use karmandia_domain::experience::ImageUpload;
use karmandia_domain::id::PreviewId;

/// How long a preview nobody reads is kept.
pub const IDLE_TIMEOUT: Duration = Duration::from_secs(30 * 60);

/// Bounded store of uploaded images, addressed by [`PreviewId`].
pub struct PreviewStore {
    images: Cache<PreviewId, Arc<ImageUpload>>,
}

impl PreviewStore {
    /// A store holding at most `capacity` images (at least one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = u64::try_from(capacity.max(1)).unwrap_or(u64::MAX);
        Self {
            images: Cache::builder()
                .max_capacity(capacity)
                .time_to_idle(IDLE_TIMEOUT)
                .eviction_listener(|id: Arc<PreviewId>, _, cause| {
                    if cause != RemovalCause::Explicit {
                        tracing::debug!(preview = %id, ?cause, "evicted image preview");
                    }
                })
                .build(),
        }
    }

    /// Keep `image` and return its id.
    pub fn insert(&self, image: ImageUpload) -> PreviewId {
        let id = PreviewId::new();
        self.images.insert(id, Arc::new(image));
        id
    }

    /// Release `previous` (if any) and keep `image` in its place.
    pub fn replace(&self, previous: Option<PreviewId>, image: ImageUpload) -> PreviewId {
        if let Some(previous) = previous {
            self.release(previous);
        }
        self.insert(image)
    }

    #[must_use]
    pub fn get(&self, id: PreviewId) -> Option<Arc<ImageUpload>> {
        self.images.get(&id)
    }

    /// Drop the preview. Returns whether it was still held.
    pub fn release(&self, id: PreviewId) -> bool {
        self.images.remove(&id).is_some()
    }

    /// Number of held previews, after pending evictions have run.
    #[must_use]
    pub fn len(&self) -> u64 {
        self.images.run_pending_tasks();
        self.images.entry_count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
