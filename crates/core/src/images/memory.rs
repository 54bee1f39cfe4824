//! In-process image store used by tests and local runs.

use dashmap::DashMap;
use image::DynamicImage;

use super::error::StorageError;
use super::store::ImageStore;

/// Base of the placeholder URLs returned by [`InMemoryImageStore::put`].
/// Nothing is served there.
pub const LOCAL_URL_BASE: &str = "http://127.0.0.1";

/// Image store backed by a map in process memory. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct InMemoryImageStore {
    images: DashMap<String, DynamicImage>,
}

impl InMemoryImageStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether the store holds no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}

impl ImageStore for InMemoryImageStore {
    async fn put(&self, key: &str, image: DynamicImage) -> Result<String, StorageError> {
        self.images.insert(key.to_string(), image);
        Ok(format!("{LOCAL_URL_BASE}/{key}"))
    }

    async fn get(&self, key: &str) -> Option<DynamicImage> {
        self.images.get(key).map(|entry| entry.value().clone())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.images.clear();
        Ok(())
    }
}
