//! Driving port for reading stored bitstreams.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{Bitstream, BitstreamId, Error};

/// Domain use-case port for bitstream reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BitstreamQuery: Send + Sync {
    /// Metadata of a committed bitstream; `not_found` when unknown.
    async fn find(&self, id: &BitstreamId) -> Result<Bitstream, Error>;

    /// Metadata and bytes of a committed bitstream.
    async fn content(&self, id: &BitstreamId) -> Result<(Bitstream, Bytes), Error>;
}
