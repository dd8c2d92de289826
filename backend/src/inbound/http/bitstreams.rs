//! Bitstream read endpoints.
//!
//! ```text
//! GET /api/core/bitstreams/{uuid}
//! GET /api/core/bitstreams/{uuid}/content
//! GET /api/core/bitstreams/{uuid}/format
//! ```
//!
//! These make the links of a freshly uploaded logo resolvable. Logos are
//! public, so no permission guard wraps them.

use actix_web::http::header::{
    CacheControl, CacheDirective, ContentDisposition, DispositionParam, DispositionType, ETag,
    EntityTag,
};
use actix_web::{HttpResponse, get, web};

use crate::domain::{BitstreamId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::hal::{BitstreamFormatResource, BitstreamResource};
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

fn parse_id(raw: &str) -> Result<BitstreamId, Error> {
    raw.parse().map_err(|_| {
        Error::not_found(format!(
            "The given uuid did not resolve to a bitstream on the server: {raw}"
        ))
    })
}

/// Register the bitstream routes below the `/api/core` scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_bitstream)
        .service(get_bitstream_content)
        .service(get_bitstream_format);
}

/// Fetch a bitstream resource.
#[utoipa::path(
    get,
    path = "/api/core/bitstreams/{uuid}",
    params(("uuid" = String, Path, description = "Bitstream identifier")),
    responses(
        (status = 200, description = "Bitstream", body = BitstreamResource),
        (status = 404, description = "Unknown bitstream", body = ErrorSchema)
    ),
    tags = ["bitstreams"],
    operation_id = "getBitstream",
    security([])
)]
#[get("/bitstreams/{uuid}")]
pub async fn get_bitstream(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BitstreamResource>> {
    let id = parse_id(&path)?;
    let bitstream = state.bitstreams.find(&id).await?;
    Ok(web::Json(BitstreamResource::wrap(&bitstream, &state.links)))
}

/// Stream the stored bytes of a bitstream.
#[utoipa::path(
    get,
    path = "/api/core/bitstreams/{uuid}/content",
    params(("uuid" = String, Path, description = "Bitstream identifier")),
    responses(
        (status = 200, description = "Raw bytes", body = Vec<u8>, content_type = "application/octet-stream"),
        (status = 404, description = "Unknown bitstream", body = ErrorSchema)
    ),
    tags = ["bitstreams"],
    operation_id = "getBitstreamContent",
    security([])
)]
#[get("/bitstreams/{uuid}/content")]
pub async fn get_bitstream_content(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(&path)?;
    let (bitstream, bytes) = state.bitstreams.content(&id).await?;
    let disposition = ContentDisposition {
        disposition: DispositionType::Inline,
        parameters: vec![DispositionParam::Filename(bitstream.name().to_owned())],
    };
    Ok(HttpResponse::Ok()
        .content_type(bitstream.format().mimetype())
        .insert_header(disposition)
        .insert_header(ETag(EntityTag::new_strong(
            bitstream.checksum().value().to_owned(),
        )))
        .insert_header(CacheControl(vec![CacheDirective::NoCache]))
        .body(bytes))
}

/// Fetch the format registry entry of a bitstream.
#[utoipa::path(
    get,
    path = "/api/core/bitstreams/{uuid}/format",
    params(("uuid" = String, Path, description = "Bitstream identifier")),
    responses(
        (status = 200, description = "Bitstream format", body = BitstreamFormatResource),
        (status = 404, description = "Unknown bitstream", body = ErrorSchema)
    ),
    tags = ["bitstreams"],
    operation_id = "getBitstreamFormat",
    security([])
)]
#[get("/bitstreams/{uuid}/format")]
pub async fn get_bitstream_format(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BitstreamFormatResource>> {
    let id = parse_id(&path)?;
    let bitstream = state.bitstreams.find(&id).await?;
    Ok(web::Json(bitstream.format().into()))
}
