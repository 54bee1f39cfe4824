//! The storage contract shared by every image backend.

use std::future::Future;

use image::DynamicImage;

use super::error::StorageError;

/// Persists and retrieves preview images by key.
///
/// Implemented by [`InMemoryImageStore`](super::InMemoryImageStore) and
/// [`S3ImageStore`](super::S3ImageStore). A backend is chosen once at startup
/// and handed to whatever needs it; callers stay generic over this trait.
pub trait ImageStore: Send + Sync {
    /// Store `image` under `key`, replacing anything already there.
    ///
    /// Returns the URL browsers can load the image from. That URL is not
    /// necessarily served by this process.
    ///
    /// # Errors
    ///
    /// Returns an error if the image cannot be encoded or the backend rejects
    /// the write.
    fn put(
        &self,
        key: &str,
        image: DynamicImage,
    ) -> impl Future<Output = Result<String, StorageError>> + Send;

    /// Fetch the image stored under `key`.
    ///
    /// `None` covers both an unknown key and a failed retrieval; the two are
    /// indistinguishable through this method.
    fn get(&self, key: &str) -> impl Future<Output = Option<DynamicImage>> + Send;

    /// Remove every stored image.
    ///
    /// Maintenance and test use only. Callers treat a failure as fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be listed or emptied.
    fn clear(&self) -> impl Future<Output = Result<(), StorageError>> + Send;
}
