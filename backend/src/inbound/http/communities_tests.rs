//! Tests for the community logo endpoint.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test};
use bytes::Bytes;
use chrono::Utc;
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::MockCommunityLogoCommand;
use crate::domain::{Bitstream, BitstreamDraft, BitstreamFormat, BitstreamId, Checksum, StorageKey};
use crate::inbound::http::test_utils::{
    TestPart, TestPorts, login_as, multipart_body, session_cookie, test_session_middleware,
};

const COMMUNITY: &str = "1c11f3f1-ba1f-4f36-908a-3f1ea9a557eb";

fn stored(upload: &LogoUpload) -> Bitstream {
    Bitstream::from(BitstreamDraft {
        id: BitstreamId::random(),
        name: upload.file_name().to_owned(),
        format: BitstreamFormat::Png,
        size_bytes: upload.content().len() as u64,
        checksum: Checksum::sha256(upload.content()),
        storage_key: StorageKey::new("00/11/0011"),
        sequence_id: 1,
        created_at: Utc::now(),
    })
}

async fn post_logo(
    command: MockCommunityLogoCommand,
    uri: &str,
    content_type: Option<String>,
    body: Vec<u8>,
    authenticated: bool,
) -> actix_web::dev::ServiceResponse {
    let state = TestPorts {
        community_logos: Arc::new(command),
        ..TestPorts::default()
    }
    .into_state();
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .route("/login", web::get().to(login_as))
            .service(web::scope("/api/core").configure(configure)),
    )
    .await;

    let mut request = test::TestRequest::post().uri(uri).set_payload(Bytes::from(body));
    if let Some(value) = content_type {
        request = request.insert_header((header::CONTENT_TYPE, value));
    }
    if authenticated {
        let res =
            test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;
        request = request.cookie(session_cookie(&res));
    }
    test::call_service(&app, request.to_request()).await
}

fn png_form() -> (String, Vec<u8>) {
    multipart_body(&[TestPart {
        name: "file",
        file_name: Some("test.png"),
        content_type: Some("image/png"),
        data: b"\x89PNG\r\n\x1a\nfixture",
    }])
}

fn logo_uri() -> String {
    format!("/api/core/communities/{COMMUNITY}/logo")
}

#[rstest]
#[actix_web::test]
async fn file_upload_returns_created_bitstream_resource() {
    let mut command = MockCommunityLogoCommand::new();
    command
        .expect_create_or_replace_logo()
        .withf(|subject, id, upload| {
            subject.is_authenticated()
                && id.to_string() == COMMUNITY
                && upload.file_name() == "test.png"
                && upload.content_type() == Some("image/png")
        })
        .times(1)
        .returning(|_, _, upload| Ok(stored(&upload)));

    let (content_type, body) = png_form();
    let res = post_logo(command, &logo_uri(), Some(content_type), body, true).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    assert!(res.headers().get(header::LOCATION).is_none());
    let json: Value = test::read_body_json(res).await;
    assert_eq!(json["type"], "bitstream");
    assert_eq!(json["name"], "test.png");
    assert_eq!(json["_embedded"]["format"]["mimetype"], "image/png");
    let id = json["id"].as_str().expect("id");
    assert_eq!(
        json["_links"]["self"]["href"],
        format!("http://localhost:8080/api/core/bitstreams/{id}")
    );
}

#[rstest]
#[case(None, Vec::new())]
#[case(Some("application/json".to_owned()), b"{}".to_vec())]
#[actix_web::test]
async fn missing_file_is_rejected_without_calling_the_use_case(
    #[case] content_type: Option<String>,
    #[case] body: Vec<u8>,
) {
    let mut command = MockCommunityLogoCommand::new();
    command.expect_create_or_replace_logo().never();

    let res = post_logo(command, &logo_uri(), content_type, body, true).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json: Value = test::read_body_json(res).await;
    assert_eq!(json["message"], NO_FILE_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn multipart_without_file_field_is_rejected() {
    let mut command = MockCommunityLogoCommand::new();
    command.expect_create_or_replace_logo().never();
    let (content_type, body) = multipart_body(&[TestPart {
        name: "properties",
        file_name: None,
        content_type: None,
        data: b"{}",
    }]);

    let res = post_logo(command, &logo_uri(), Some(content_type), body, true).await;

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[rstest]
#[actix_web::test]
async fn unresolved_community_is_not_found() {
    let mut command = MockCommunityLogoCommand::new();
    command
        .expect_create_or_replace_logo()
        .times(1)
        .returning(|_, id, _| Err(community_not_found(id)));

    let (content_type, body) = png_form();
    let res = post_logo(command, &logo_uri(), Some(content_type), body, true).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let json: Value = test::read_body_json(res).await;
    let message = json["message"].as_str().expect("message");
    assert!(message.contains(COMMUNITY), "message should name the uuid: {message}");
}

#[rstest]
#[actix_web::test]
async fn anonymous_upload_is_unauthorised_before_decoding() {
    let mut command = MockCommunityLogoCommand::new();
    command.expect_create_or_replace_logo().never();

    let (content_type, body) = png_form();
    let res = post_logo(command, &logo_uri(), Some(content_type), body, false).await;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case("/api/core/communities/not-a-uuid/logo")]
#[case("/api/core/communities/1c11f3f1ba1f4f36908a3f1ea9a557eb/logo")]
#[actix_web::test]
async fn non_canonical_identifiers_do_not_match(#[case] uri: &str) {
    let mut command = MockCommunityLogoCommand::new();
    command.expect_create_or_replace_logo().never();

    let (content_type, body) = png_form();
    let res = post_logo(command, uri, Some(content_type), body, true).await;

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case("/api/core/communities/1c11f3f1-ba1f-4f36-908a-3f1ea9a557eb/logo")]
#[case("/api/core/communities/1C11F3F1-BA1F-4F36-908A-3F1EA9A557EB/logo")]
#[case("/api/core/communities/1c11F3F1-ba1f-4F36-908a-3f1EA9A557eb/logo")]
#[actix_web::test]
async fn canonical_identifiers_of_any_case_route_to_the_upload(#[case] uri: &str) {
    let mut command = MockCommunityLogoCommand::new();
    command
        .expect_create_or_replace_logo()
        .withf(|_, id, _| id.to_string() == COMMUNITY)
        .times(1)
        .returning(|_, _, upload| Ok(stored(&upload)));

    let (content_type, body) = png_form();
    let res = post_logo(command, uri, Some(content_type), body, true).await;

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[rstest]
#[actix_web::test]
async fn oversized_upload_is_rejected() {
    let mut command = MockCommunityLogoCommand::new();
    command.expect_create_or_replace_logo().never();
    let state = TestPorts {
        community_logos: Arc::new(command),
        ..TestPorts::default()
    }
    .into_state()
    .with_upload_limit(16);
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(test_session_middleware())
            .route("/login", web::get().to(login_as))
            .service(web::scope("/api/core").configure(configure)),
    )
    .await;
    let login = test::call_service(&app, test::TestRequest::get().uri("/login").to_request()).await;

    let (content_type, body) = png_form();
    let res = test::call_service(
        &app,
        test::TestRequest::post()
            .uri(&logo_uri())
            .insert_header((header::CONTENT_TYPE, content_type))
            .cookie(session_cookie(&login))
            .set_payload(body)
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::PAYLOAD_TOO_LARGE);
}
