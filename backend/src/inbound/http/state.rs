//! Shared HTTP adapter state.
//!
//! HTTP handlers and the permission guard accept this state via
//! `actix_web::web::Data` so they only depend on domain ports and remain
//! testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{AuthorizationPolicy, BitstreamQuery, CommunityLogoCommand, LoginService};
use crate::inbound::http::hal::ResourceLinks;

/// Upload ceiling applied when none is configured: 16 MiB.
pub const DEFAULT_UPLOAD_LIMIT: usize = 16 * 1024 * 1024;

/// Parameter object bundling the port implementations handlers need.
#[derive(Clone)]
pub struct HttpStatePorts {
    pub login: Arc<dyn LoginService>,
    pub authorization: Arc<dyn AuthorizationPolicy>,
    pub community_logos: Arc<dyn CommunityLogoCommand>,
    pub bitstreams: Arc<dyn BitstreamQuery>,
}

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub login: Arc<dyn LoginService>,
    pub authorization: Arc<dyn AuthorizationPolicy>,
    pub community_logos: Arc<dyn CommunityLogoCommand>,
    pub bitstreams: Arc<dyn BitstreamQuery>,
    pub links: ResourceLinks,
    /// Largest request body accepted by upload handlers, in bytes.
    pub upload_limit: usize,
}

impl HttpState {
    /// Construct state from a ports bundle and the public link base.
    ///
    /// # Examples
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use backend::inbound::http::hal::ResourceLinks;
    /// use backend::inbound::http::state::{HttpState, HttpStatePorts};
    /// use backend::outbound::persistence::{InMemoryAuthorizationPolicy, InMemoryCatalogue};
    /// use backend::outbound::storage::MemoryBlobStore;
    /// use backend::domain::ports::FixtureLoginService;
    /// use backend::domain::{BitstreamContentService, CommunityLogoService};
    ///
    /// let blobs = Arc::new(MemoryBlobStore::default());
    /// let catalogue = Arc::new(InMemoryCatalogue::seeded(blobs.clone()));
    /// let ports = HttpStatePorts {
    ///     login: Arc::new(FixtureLoginService),
    ///     authorization: Arc::new(InMemoryAuthorizationPolicy::default()),
    ///     community_logos: Arc::new(CommunityLogoService::new(catalogue.clone(), catalogue.clone())),
    ///     bitstreams: Arc::new(BitstreamContentService::new(catalogue, blobs)),
    /// };
    /// let links = ResourceLinks::new("http://localhost:8080".parse().unwrap()).unwrap();
    /// let state = HttpState::new(ports, links);
    /// let _login = state.login.clone();
    /// ```
    #[must_use]
    pub fn new(ports: HttpStatePorts, links: ResourceLinks) -> Self {
        let HttpStatePorts {
            login,
            authorization,
            community_logos,
            bitstreams,
        } = ports;
        Self {
            login,
            authorization,
            community_logos,
            bitstreams,
            links,
            upload_limit: DEFAULT_UPLOAD_LIMIT,
        }
    }

    /// Override the upload ceiling.
    #[must_use]
    pub fn with_upload_limit(mut self, limit: usize) -> Self {
        self.upload_limit = limit;
        self
    }
}
