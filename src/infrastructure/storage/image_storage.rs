//! Object storage interface for hosted images.

use crate::error::AppError;
use async_trait::async_trait;
use bytes::Bytes;

/// Result of a successful image upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Public URL served to clients.
    pub url: String,
    /// Opaque identifier accepted by [`ImageStorage::delete`].
    pub storage_id: String,
}

/// External object storage holding club and event images.
///
/// The store accepts an image buffer and returns a public URL plus a
/// deletable identifier. Image replacement follows a strict two-phase order
/// in the services: upload the new object, persist the record, and only then
/// delete the old object.
///
/// # Implementations
///
/// - [`crate::infrastructure::storage::HttpImageStorage`] - HTTP image host client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStorage: Send + Sync {
    /// Uploads an image buffer into the given folder.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the storage provider rejects the
    /// upload or is unreachable.
    async fn upload(&self, data: Bytes, folder: &str) -> Result<StoredImage, AppError>;

    /// Deletes a previously uploaded object by its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on provider failure.
    async fn delete(&self, storage_id: &str) -> Result<(), AppError>;
}
