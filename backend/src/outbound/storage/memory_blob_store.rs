//! Process-local blob store.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::StorageKey;
use crate::domain::ports::{BlobStore, BlobStoreError};

use super::{issue_key, split_key};

/// Blob store keeping every blob in memory. Contents vanish on restart.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: Mutex<HashMap<StorageKey, Bytes>>,
}

impl MemoryBlobStore {
    /// Number of blobs currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.blobs().map(|blobs| blobs.len()).unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn blobs(&self) -> Result<MutexGuard<'_, HashMap<StorageKey, Bytes>>, BlobStoreError> {
        self.blobs
            .lock()
            .map_err(|_| BlobStoreError::io("memory blob store lock poisoned"))
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(&self, content: Bytes) -> Result<StorageKey, BlobStoreError> {
        let key = issue_key();
        self.blobs()?.insert(key.clone(), content);
        Ok(key)
    }

    async fn get(&self, key: &StorageKey) -> Result<Bytes, BlobStoreError> {
        if split_key(key).is_none() {
            return Err(BlobStoreError::invalid_key(key.as_str()));
        }
        self.blobs()?
            .get(key)
            .cloned()
            .ok_or_else(|| BlobStoreError::not_found(key.as_str()))
    }

    async fn delete(&self, key: &StorageKey) -> Result<(), BlobStoreError> {
        if split_key(key).is_none() {
            return Err(BlobStoreError::invalid_key(key.as_str()));
        }
        self.blobs()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[tokio::test]
    async fn stored_blobs_can_be_read_and_deleted() {
        let store = MemoryBlobStore::default();
        let key = store.put(Bytes::from_static(b"logo")).await.expect("put");

        assert_eq!(store.get(&key).await.expect("get"), Bytes::from_static(b"logo"));
        assert_eq!(store.len(), 1);

        store.delete(&key).await.expect("delete");
        store.delete(&key).await.expect("second delete is a no-op");
        let err = store.get(&key).await.expect_err("blob gone");
        assert!(matches!(err, BlobStoreError::NotFound { .. }));
        assert!(store.is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn foreign_keys_are_invalid() {
        let store = MemoryBlobStore::default();
        let err = store
            .get(&StorageKey::new("../../secret"))
            .await
            .expect_err("invalid key");
        assert!(matches!(err, BlobStoreError::InvalidKey { .. }));
    }
}
