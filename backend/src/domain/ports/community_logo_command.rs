//! Driving port for the logo upload use-case.

use async_trait::async_trait;

use crate::domain::{Bitstream, CommunityId, Error, LogoUpload, Subject};

/// Domain use-case port for attaching a logo to a community.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommunityLogoCommand: Send + Sync {
    /// Store `upload` as the logo of the community `id` on behalf of
    /// `subject`, replacing any prior logo.
    ///
    /// Permission is checked by the caller before this runs.
    async fn create_or_replace_logo(
        &self,
        subject: &Subject,
        id: &CommunityId,
        upload: LogoUpload,
    ) -> Result<Bitstream, Error>;
}
