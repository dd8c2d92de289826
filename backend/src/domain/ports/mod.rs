//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod authorization_policy;
mod bitstream_query;
mod bitstream_repository;
mod blob_store;
mod community_logo_command;
mod community_repository;
mod login_service;
mod logo_store;

#[cfg(test)]
pub use authorization_policy::MockAuthorizationPolicy;
pub use authorization_policy::{
    AuthorizationPolicy, AuthorizationPolicyError, FixtureAuthorizationPolicy,
};
#[cfg(test)]
pub use bitstream_query::MockBitstreamQuery;
pub use bitstream_query::BitstreamQuery;
#[cfg(test)]
pub use bitstream_repository::MockBitstreamRepository;
pub use bitstream_repository::{BitstreamRepository, BitstreamRepositoryError};
#[cfg(test)]
pub use blob_store::MockBlobStore;
pub use blob_store::{BlobStore, BlobStoreError};
#[cfg(test)]
pub use community_logo_command::MockCommunityLogoCommand;
pub use community_logo_command::CommunityLogoCommand;
#[cfg(test)]
pub use community_repository::MockCommunityRepository;
pub use community_repository::{CommunityRepository, CommunityRepositoryError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{FIXTURE_ADMIN_ID, FIXTURE_READER_ID, FixtureLoginService, LoginService};
#[cfg(test)]
pub use logo_store::MockLogoStore;
pub use logo_store::{LogoStore, LogoStoreError};
