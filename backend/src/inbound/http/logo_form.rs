//! Decoding of the logo upload request body.
//!
//! The body is read in full (bounded by the configured limit) and parsed with
//! `multer` into a [`LogoBody`] before any use-case is chosen. A request
//! whose multipart body carries no `file` field, or that is not multipart at
//! all, decodes to [`LogoBody::MissingFile`].

use std::convert::Infallible;

use actix_web::http::header::{self, HeaderMap};
use actix_web::web;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use futures_util::stream;

use crate::domain::{Error, LogoUpload};

/// Multipart field carrying the logo bytes.
pub const FILE_FIELD: &str = "file";

/// Shape of a decoded logo request.
#[derive(Debug)]
pub enum LogoBody {
    /// A `file` field was present.
    File(LogoUpload),
    /// No `file` field was sent.
    MissingFile,
}

/// Drain `payload` into memory, failing once `limit` bytes are exceeded.
pub async fn read_limited(mut payload: web::Payload, limit: usize) -> Result<Bytes, Error> {
    let mut body = BytesMut::new();
    while let Some(chunk) = payload.next().await {
        let chunk = chunk
            .map_err(|err| Error::invalid_request(format!("failed to read request body: {err}")))?;
        if body.len() + chunk.len() > limit {
            return Err(Error::payload_too_large(format!(
                "The request body exceeds the upload limit of {limit} bytes"
            )));
        }
        body.extend_from_slice(&chunk);
    }
    Ok(body.freeze())
}

fn multipart_boundary(headers: &HeaderMap) -> Result<Option<String>, Error> {
    let Some(raw) = headers.get(header::CONTENT_TYPE) else {
        return Ok(None);
    };
    let content_type = raw
        .to_str()
        .map_err(|_| Error::invalid_request("Content-Type header is not valid ASCII"))?;
    let is_multipart = content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("multipart/form-data"));
    if !is_multipart {
        return Ok(None);
    }
    multer::parse_boundary(content_type)
        .map(Some)
        .map_err(|err| Error::invalid_request(format!("malformed multipart body: {err}")))
}

fn malformed(err: multer::Error) -> Error {
    Error::invalid_request(format!("malformed multipart body: {err}"))
}

/// Decode `body` into the logo request shape.
///
/// Only the first `file` field is used; other fields are skipped.
pub async fn decode(headers: &HeaderMap, body: Bytes) -> Result<LogoBody, Error> {
    let Some(boundary) = multipart_boundary(headers)? else {
        return Ok(LogoBody::MissingFile);
    };
    let source = stream::once(async move { Ok::<_, Infallible>(body) });
    let mut multipart = multer::Multipart::new(source, boundary);

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field.file_name().map(str::to_owned);
        let content_type = field.content_type().map(ToString::to_string);
        let content = field.bytes().await.map_err(malformed)?;
        return LogoUpload::try_new(file_name, content_type, content).map(LogoBody::File);
    }
    Ok(LogoBody::MissingFile)
}
