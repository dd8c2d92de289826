//! Community logo endpoint.
//!
//! ```text
//! POST /api/core/communities/{uuid}/logo   multipart/form-data, field `file`
//! ```
//!
//! The resource is wrapped in [`RequirePermission`] (WRITE on
//! `COMMUNITY/{uuid}`), so every handler below runs only for permitted
//! callers. The body is decoded first and its shape picks the handler:
//! a `file` field goes to [`create_or_replace_logo`], anything else to
//! [`reject_missing_file`].

use actix_web::{HttpRequest, HttpResponse, web};
use tracing::debug;

use crate::domain::{Capability, CapabilityDomain, CommunityId, Error, LogoUpload, community_not_found};
use crate::inbound::http::ApiResult;
use crate::inbound::http::hal::BitstreamResource;
use crate::inbound::http::logo_form::{self, LogoBody};
use crate::inbound::http::permission::RequirePermission;
use crate::inbound::http::schemas::{ErrorSchema, LogoUploadForm};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Canonical 8-4-4-4-12 UUID route pattern, case-insensitive hex.
pub const UUID_PATTERN: &str =
    "[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{4}-[0-9a-fA-F]{12}";

/// Message returned when the multipart body has no `file` field.
pub const NO_FILE_MESSAGE: &str = "No file was given";

/// Register the community routes below the `/api/core` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource(format!("/communities/{{uuid:{UUID_PATTERN}}}/logo"))
            .wrap(RequirePermission::new(
                CapabilityDomain::Community,
                Capability::Write,
            ))
            .route(web::post().to(upload_logo)),
    );
}

/// Attach a logo bitstream to a community.
#[utoipa::path(
    post,
    path = "/api/core/communities/{uuid}/logo",
    params(("uuid" = String, Path, description = "Community identifier")),
    request_body(content = LogoUploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Logo stored", body = BitstreamResource),
        (status = 400, description = "Malformed multipart body", body = ErrorSchema),
        (status = 401, description = "Authentication required", body = ErrorSchema),
        (status = 403, description = "WRITE permission missing", body = ErrorSchema),
        (status = 404, description = "Unknown community", body = ErrorSchema),
        (status = 413, description = "Upload too large", body = ErrorSchema),
        (status = 422, description = "No file given or file not usable as a logo", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["communities"],
    operation_id = "createCommunityLogo"
)]
pub async fn upload_logo(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
    req: HttpRequest,
    payload: web::Payload,
) -> ApiResult<HttpResponse> {
    let raw = path.into_inner();
    let id: CommunityId = raw.parse().map_err(|_| community_not_found(&raw))?;
    let body = logo_form::read_limited(payload, state.upload_limit).await?;
    match logo_form::decode(req.headers(), body).await? {
        LogoBody::File(upload) => create_or_replace_logo(&state, &session, &id, upload).await,
        LogoBody::MissingFile => Err(reject_missing_file(&id)),
    }
}

/// Store `upload` as the community logo and answer `201 Created`.
pub async fn create_or_replace_logo(
    state: &HttpState,
    session: &SessionContext,
    id: &CommunityId,
    upload: LogoUpload,
) -> ApiResult<HttpResponse> {
    let subject = session.subject()?;
    let bitstream = state
        .community_logos
        .create_or_replace_logo(&subject, id, upload)
        .await?;
    let resource = BitstreamResource::wrap(&bitstream, &state.links);
    Ok(HttpResponse::Created().json(resource))
}

/// Fail an upload that carried no file.
#[must_use]
pub fn reject_missing_file(id: &CommunityId) -> Error {
    debug!(community_id = %id, "logo upload without a file field");
    Error::unprocessable_entity(NO_FILE_MESSAGE)
}

#[cfg(test)]
#[path = "communities_tests.rs"]
mod tests;
