//! Builders wiring outbound adapters into the HTTP state.

use std::sync::Arc;

use actix_web::web;
use tracing::info;

use backend::domain::ports::{BlobStore, FixtureLoginService};
use backend::domain::{BitstreamContentService, CommunityLogoService};
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::persistence::{InMemoryAuthorizationPolicy, InMemoryCatalogue};
use backend::outbound::storage::{FilesystemBlobStore, MemoryBlobStore};

use super::ServerConfig;

/// Pick the blob store: the filesystem when an asset store directory is
/// configured, memory otherwise.
fn build_blob_store(config: &ServerConfig) -> std::io::Result<Arc<dyn BlobStore>> {
    match &config.assetstore_dir {
        Some(dir) => {
            let store = FilesystemBlobStore::open(dir)?;
            info!(assetstore = %dir.display(), "using filesystem asset store");
            Ok(Arc::new(store))
        }
        None => {
            info!("using in-memory asset store");
            Ok(Arc::new(MemoryBlobStore::default()))
        }
    }
}

/// Construct the shared HTTP state from configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when the asset store cannot be opened.
pub(super) fn build_http_state(config: &ServerConfig) -> std::io::Result<web::Data<HttpState>> {
    let blobs = build_blob_store(config)?;
    let catalogue = Arc::new(InMemoryCatalogue::seeded(Arc::clone(&blobs)));
    let ports = HttpStatePorts {
        login: Arc::new(FixtureLoginService),
        authorization: Arc::new(InMemoryAuthorizationPolicy::default()),
        community_logos: Arc::new(CommunityLogoService::new(
            Arc::clone(&catalogue),
            Arc::clone(&catalogue),
        )),
        bitstreams: Arc::new(BitstreamContentService::new(catalogue, blobs)),
    };
    let state = HttpState::new(ports, config.links.clone())
        .with_upload_limit(config.upload_limit);
    Ok(web::Data::new(state))
}
