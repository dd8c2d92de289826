//! Logo upload use-case.
//!
//! Opens a [`Context`], resolves the community, hands the payload to the
//! [`LogoStore`] and then completes or aborts the context. Every exit path
//! releases the context exactly once.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    CommunityLogoCommand, CommunityRepository, CommunityRepositoryError, LogoStore, LogoStoreError,
};
use crate::domain::{Bitstream, CommunityId, Context, Error, LogoUpload, Subject};

/// Message returned when a community identifier does not resolve.
#[must_use]
pub fn community_not_found(id: impl std::fmt::Display) -> Error {
    Error::not_found(format!(
        "The given uuid did not resolve to a community on the server: {id}"
    ))
}

fn map_repository_error(error: CommunityRepositoryError) -> Error {
    match error {
        CommunityRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("community repository unavailable: {message}"))
        }
        CommunityRepositoryError::Query { message } => {
            Error::internal(format!("community repository error: {message}"))
        }
    }
}

fn map_logo_store_error(error: LogoStoreError) -> Error {
    match error {
        LogoStoreError::Rejected { message } => Error::unprocessable_entity(message),
        LogoStoreError::CommunityMissing { id } => community_not_found(id),
        LogoStoreError::Storage { message } => {
            Error::internal(format!("logo storage error: {message}"))
        }
    }
}

/// Community logo service implementing [`CommunityLogoCommand`].
#[derive(Clone)]
pub struct CommunityLogoService<C, L> {
    communities: Arc<C>,
    logos: Arc<L>,
}

impl<C, L> CommunityLogoService<C, L> {
    /// Create a service over the lookup and logo-store adapters.
    #[must_use]
    pub fn new(communities: Arc<C>, logos: Arc<L>) -> Self {
        Self { communities, logos }
    }
}

impl<C, L> CommunityLogoService<C, L>
where
    C: CommunityRepository,
    L: LogoStore,
{
    async fn attach(
        &self,
        ctx: &mut Context,
        id: &CommunityId,
        upload: &LogoUpload,
    ) -> Result<Bitstream, Error> {
        let community = self
            .communities
            .find(ctx, id)
            .await
            .map_err(map_repository_error)?
            .ok_or_else(|| community_not_found(id))?;

        self.logos
            .set_logo(ctx, &community, upload)
            .await
            .map_err(map_logo_store_error)
    }
}

#[async_trait]
impl<C, L> CommunityLogoCommand for CommunityLogoService<C, L>
where
    C: CommunityRepository,
    L: LogoStore,
{
    async fn create_or_replace_logo(
        &self,
        subject: &Subject,
        id: &CommunityId,
        upload: LogoUpload,
    ) -> Result<Bitstream, Error> {
        let mut ctx = Context::open(*subject);
        match self.attach(&mut ctx, id, &upload).await {
            Ok(bitstream) => {
                let context_id = ctx.id();
                ctx.complete().await?;
                info!(
                    %context_id,
                    community_id = %id,
                    bitstream_id = %bitstream.id(),
                    size_bytes = bitstream.size_bytes(),
                    "community logo stored"
                );
                Ok(bitstream)
            }
            Err(err) => {
                ctx.abort().await;
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "community_logo_service_tests.rs"]
mod tests;
