//! In-memory catalogue of communities and their logo bitstreams.
//!
//! Setting a logo writes the bytes to the [`BlobStore`] straight away and
//! stages a catalogue update in the request [`Context`]. Nothing becomes
//! visible to readers until the context completes; aborting or dropping the
//! context deletes the freshly written blob again.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::domain::ports::{
    BitstreamRepository, BitstreamRepositoryError, BlobStore, CommunityRepository,
    CommunityRepositoryError, LogoStore, LogoStoreError,
};
use crate::domain::{
    Bitstream, BitstreamDraft, BitstreamId, Checksum, Community, CommunityId, Context, Error,
    LogoUpload, PendingChange, community_not_found,
};

/// Identifier of the community every fresh catalogue is seeded with.
pub const SAMPLE_COMMUNITY_ID: Uuid = Uuid::from_u128(0x1c11f3f1_ba1f_4f36_908a_3f1ea9a557eb);

/// Name of the seeded community.
pub const SAMPLE_COMMUNITY_NAME: &str = "Sample Community";

/// Logos are the only bitstream in their bundle.
const LOGO_SEQUENCE_ID: u32 = 1;

#[derive(Debug, Default)]
struct CatalogueState {
    communities: HashMap<CommunityId, Community>,
    bitstreams: HashMap<BitstreamId, Bitstream>,
}

type SharedState = Arc<Mutex<CatalogueState>>;

fn lock(state: &SharedState) -> Result<MutexGuard<'_, CatalogueState>, String> {
    state
        .lock()
        .map_err(|_| "catalogue lock poisoned".to_owned())
}

/// Catalogue adapter implementing the community, logo and bitstream ports.
#[derive(Clone)]
pub struct InMemoryCatalogue {
    state: SharedState,
    blobs: Arc<dyn BlobStore>,
    clock: Arc<dyn Clock>,
}

impl InMemoryCatalogue {
    /// Empty catalogue writing bytes to `blobs`.
    #[must_use]
    pub fn new(blobs: Arc<dyn BlobStore>) -> Self {
        Self {
            state: SharedState::default(),
            blobs,
            clock: Arc::new(DefaultClock),
        }
    }

    /// Catalogue holding the sample community.
    #[must_use]
    pub fn seeded(blobs: Arc<dyn BlobStore>) -> Self {
        Self::new(blobs).with_community(Community::new(
            CommunityId::from_uuid(SAMPLE_COMMUNITY_ID),
            SAMPLE_COMMUNITY_NAME,
        ))
    }

    /// Replace the clock used to stamp new bitstreams.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Add `community`, replacing any entry with the same id.
    #[must_use]
    pub fn with_community(self, community: Community) -> Self {
        self.insert_community(community);
        self
    }

    /// Add `community`, replacing any entry with the same id.
    pub fn insert_community(&self, community: Community) {
        match lock(&self.state) {
            Ok(mut state) => {
                state.communities.insert(*community.id(), community);
            }
            Err(message) => warn!(%message, "community not inserted"),
        }
    }

    /// Current logo of the community, if any.
    #[must_use]
    pub fn logo_of(&self, id: &CommunityId) -> Option<BitstreamId> {
        let state = lock(&self.state).ok()?;
        state.communities.get(id)?.logo().copied()
    }
}

#[async_trait]
impl CommunityRepository for InMemoryCatalogue {
    async fn find(
        &self,
        ctx: &Context,
        id: &CommunityId,
    ) -> Result<Option<Community>, CommunityRepositoryError> {
        let state = lock(&self.state).map_err(CommunityRepositoryError::query)?;
        let found = state.communities.get(id).cloned();
        debug!(context_id = %ctx.id(), community_id = %id, found = found.is_some(), "community lookup");
        Ok(found)
    }
}

#[async_trait]
impl BitstreamRepository for InMemoryCatalogue {
    async fn find(&self, id: &BitstreamId) -> Result<Option<Bitstream>, BitstreamRepositoryError> {
        let state = lock(&self.state).map_err(BitstreamRepositoryError::query)?;
        Ok(state.bitstreams.get(id).cloned())
    }
}

#[async_trait]
impl LogoStore for InMemoryCatalogue {
    async fn set_logo(
        &self,
        ctx: &mut Context,
        community: &Community,
        upload: &LogoUpload,
    ) -> Result<Bitstream, LogoStoreError> {
        let format = upload
            .format()
            .map_err(|err| LogoStoreError::rejected(err.message()))?;
        {
            let state = lock(&self.state).map_err(LogoStoreError::storage)?;
            if !state.communities.contains_key(community.id()) {
                return Err(LogoStoreError::community_missing(community.id().to_string()));
            }
        }

        let content = upload.content().clone();
        let checksum = Checksum::sha256(&content);
        let size_bytes = content.len() as u64;
        let storage_key = self
            .blobs
            .put(content)
            .await
            .map_err(|err| LogoStoreError::storage(err.to_string()))?;

        let bitstream = Bitstream::from(BitstreamDraft {
            id: BitstreamId::random(),
            name: upload.file_name().to_owned(),
            format,
            size_bytes,
            checksum,
            storage_key,
            sequence_id: LOGO_SEQUENCE_ID,
            created_at: self.clock.utc(),
        });
        ctx.stage(Box::new(AttachLogo {
            state: Arc::clone(&self.state),
            blobs: Arc::clone(&self.blobs),
            community: *community.id(),
            bitstream: bitstream.clone(),
        }));
        Ok(bitstream)
    }
}

/// Staged swap of a community's logo.
struct AttachLogo {
    state: SharedState,
    blobs: Arc<dyn BlobStore>,
    community: CommunityId,
    bitstream: Bitstream,
}

impl AttachLogo {
    async fn discard(&self, bitstream: &Bitstream) {
        if let Err(err) = self.blobs.delete(bitstream.storage_key()).await {
            warn!(
                bitstream_id = %bitstream.id(),
                storage_key = %bitstream.storage_key(),
                error = %err,
                "failed to delete logo blob"
            );
        }
    }
}

#[async_trait]
impl PendingChange for AttachLogo {
    fn describe(&self) -> String {
        format!("attach logo {} to community {}", self.bitstream.id(), self.community)
    }

    async fn commit(&mut self) -> Result<(), Error> {
        let replaced = {
            let mut state = lock(&self.state).map_err(Error::internal)?;
            let Some(community) = state.communities.get_mut(&self.community) else {
                return Err(community_not_found(self.community));
            };
            let previous = community.replace_logo(*self.bitstream.id());
            state
                .bitstreams
                .insert(*self.bitstream.id(), self.bitstream.clone());
            previous.and_then(|id| state.bitstreams.remove(&id))
        };
        if let Some(old) = replaced {
            debug!(bitstream_id = %old.id(), community_id = %self.community, "previous logo removed");
            self.discard(&old).await;
        }
        Ok(())
    }

    async fn rollback(&mut self) {
        self.discard(&self.bitstream).await;
    }
}

#[cfg(test)]
#[path = "in_memory_catalogue_tests.rs"]
mod tests;
