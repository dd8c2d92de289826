//! Domain primitives, use-case services and ports.
//!
//! Purpose: define the strongly typed entities the logo workflow moves around
//! and the services that drive it. Transport and storage concerns stay behind
//! the traits in [`ports`].
//!
//! Public surface:
//! - Error / ErrorCode: transport-agnostic failure payload.
//! - Community / CommunityId: the entity a logo is attached to.
//! - Bitstream and its metadata types: stored files.
//! - LogoUpload: validated upload payload.
//! - Context / PendingChange: per-request unit of work.
//! - CommunityLogoService / BitstreamContentService: driving-port services.

pub mod auth;
pub mod authorization;
pub mod bitstream;
pub mod bitstream_content_service;
pub mod community;
pub mod community_logo_service;
pub mod context;
pub mod error;
pub mod logo_upload;
pub mod ports;
pub mod trace_id;

pub use self::auth::{LoginCredentials, LoginValidationError, Subject, UserId};
pub use self::authorization::{Capability, CapabilityDomain, PermissionTarget};
pub use self::bitstream::{
    Bitstream, BitstreamDraft, BitstreamFormat, BitstreamId, Checksum, OCTET_STREAM, StorageKey,
};
pub use self::bitstream_content_service::BitstreamContentService;
pub use self::community::{Community, CommunityId, CommunityIdError};
pub use self::community_logo_service::{CommunityLogoService, community_not_found};
pub use self::context::{Context, ContextId, PendingChange};
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::logo_upload::{DEFAULT_LOGO_NAME, LogoUpload};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
