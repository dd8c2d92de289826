//! Driven port for raw byte storage.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::StorageKey;

use super::define_port_error;

define_port_error! {
    /// Errors raised by blob stores.
    pub enum BlobStoreError {
        /// No blob is stored under the key.
        NotFound { key: String } => "blob {key} not found",
        /// The store rejected a key it did not issue.
        InvalidKey { key: String } => "blob key {key} is not valid",
        /// Underlying I/O failed.
        Io { message: String } => "blob storage i/o failed: {message}",
    }
}

/// Port for writing, reading and deleting byte blobs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Persist `content` under a freshly generated key.
    async fn put(&self, content: Bytes) -> Result<StorageKey, BlobStoreError>;

    /// Load the blob stored under `key`.
    async fn get(&self, key: &StorageKey) -> Result<Bytes, BlobStoreError>;

    /// Remove the blob stored under `key`. Deleting a missing blob succeeds.
    async fn delete(&self, key: &StorageKey) -> Result<(), BlobStoreError>;
}
