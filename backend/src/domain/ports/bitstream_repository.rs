//! Read-side port for committed bitstreams.

use async_trait::async_trait;

use crate::domain::{Bitstream, BitstreamId};

use super::define_port_error;

define_port_error! {
    /// Errors raised when reading bitstream metadata.
    pub enum BitstreamRepositoryError {
        /// Query failed during execution or row conversion.
        Query { message: String } =>
            "bitstream read query failed: {message}",
    }
}

/// Port for looking bitstreams up by identifier.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BitstreamRepository: Send + Sync {
    /// Return the committed bitstream, or `Ok(None)` when unknown.
    async fn find(&self, id: &BitstreamId) -> Result<Option<Bitstream>, BitstreamRepositoryError>;
}
