//! Write-side port attaching a logo bitstream to a community.

use async_trait::async_trait;

use crate::domain::{Bitstream, Community, Context, LogoUpload};

use super::define_port_error;

define_port_error! {
    /// Errors raised while storing a logo.
    pub enum LogoStoreError {
        /// The payload cannot become a logo.
        Rejected { message: String } => "{message}",
        /// The community disappeared between lookup and write.
        CommunityMissing { id: String } =>
            "community {id} no longer exists",
        /// Bytes could not be written to the blob store.
        Storage { message: String } =>
            "logo storage failed: {message}",
    }
}

/// Port for creating a logo bitstream.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LogoStore: Send + Sync {
    /// Validate and store `upload`, then stage it in `ctx` as the logo of
    /// `community`, replacing any prior logo once `ctx` completes.
    async fn set_logo(
        &self,
        ctx: &mut Context,
        community: &Community,
        upload: &LogoUpload,
    ) -> Result<Bitstream, LogoStoreError>;
}
