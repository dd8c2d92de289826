//! Read-side service for committed bitstreams.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::ports::{
    BitstreamQuery, BitstreamRepository, BitstreamRepositoryError, BlobStore, BlobStoreError,
};
use crate::domain::{Bitstream, BitstreamId, Error};

fn not_found(id: &BitstreamId) -> Error {
    Error::not_found(format!(
        "The given uuid did not resolve to a bitstream on the server: {id}"
    ))
}

fn map_repository_error(error: BitstreamRepositoryError) -> Error {
    match error {
        BitstreamRepositoryError::Query { message } => {
            Error::internal(format!("bitstream repository error: {message}"))
        }
    }
}

/// Service implementing [`BitstreamQuery`] over metadata and blob adapters.
/// `B` may be `dyn BlobStore`.
pub struct BitstreamContentService<R, B: ?Sized> {
    bitstreams: Arc<R>,
    blobs: Arc<B>,
}

impl<R, B: ?Sized> Clone for BitstreamContentService<R, B> {
    fn clone(&self) -> Self {
        Self {
            bitstreams: Arc::clone(&self.bitstreams),
            blobs: Arc::clone(&self.blobs),
        }
    }
}

impl<R, B: ?Sized> BitstreamContentService<R, B> {
    #[must_use]
    pub fn new(bitstreams: Arc<R>, blobs: Arc<B>) -> Self {
        Self { bitstreams, blobs }
    }
}

#[async_trait]
impl<R, B> BitstreamQuery for BitstreamContentService<R, B>
where
    R: BitstreamRepository,
    B: BlobStore + ?Sized,
{
    async fn find(&self, id: &BitstreamId) -> Result<Bitstream, Error> {
        self.bitstreams
            .find(id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| not_found(id))
    }

    async fn content(&self, id: &BitstreamId) -> Result<(Bitstream, Bytes), Error> {
        let bitstream = self.find(id).await?;
        let bytes = match self.blobs.get(bitstream.storage_key()).await {
            Ok(bytes) => bytes,
            // Metadata without bytes means the blob was swept after a replace.
            Err(BlobStoreError::NotFound { .. }) => return Err(not_found(id)),
            Err(err) => return Err(Error::internal(format!("bitstream read failed: {err}"))),
        };
        Ok((bitstream, bytes))
    }
}
