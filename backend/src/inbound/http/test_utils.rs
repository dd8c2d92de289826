//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, storage::CookieSessionStore};
use actix_web::HttpResponse;
use actix_web::cookie::{Cookie, Key};
use actix_web::dev::ServiceResponse;
use url::Url;

use crate::domain::ports::{
    AuthorizationPolicy, BitstreamQuery, CommunityLogoCommand, FIXTURE_ADMIN_ID,
    FixtureAuthorizationPolicy, FixtureLoginService, LoginService, MockBitstreamQuery,
    MockCommunityLogoCommand,
};
use crate::domain::{Error, UserId};
use crate::inbound::http::hal::ResourceLinks;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::{HttpState, HttpStatePorts};

/// Build a session middleware configured for tests.
///
/// - Generates a fresh signing/encryption key per invocation.
/// - Sets the cookie name to `session` and disables the `Secure` flag for
///   local HTTP tests.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .build()
}

/// Extract the `session` cookie set by a response.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Cookie<'static> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == "session")
        .map(Cookie::into_owned)
        .expect("session cookie set")
}

/// Port bundle for handler tests.
///
/// Defaults to the fixture login service and policy plus mocks without
/// expectations, so any unexpected use-case call fails the test.
pub struct TestPorts {
    pub login: Arc<dyn LoginService>,
    pub authorization: Arc<dyn AuthorizationPolicy>,
    pub community_logos: Arc<dyn CommunityLogoCommand>,
    pub bitstreams: Arc<dyn BitstreamQuery>,
}

impl Default for TestPorts {
    fn default() -> Self {
        Self {
            login: Arc::new(FixtureLoginService),
            authorization: Arc::new(FixtureAuthorizationPolicy),
            community_logos: Arc::new(MockCommunityLogoCommand::new()),
            bitstreams: Arc::new(MockBitstreamQuery::new()),
        }
    }
}

impl TestPorts {
    /// Assemble handler state rooted at `http://localhost:8080`.
    pub fn into_state(self) -> HttpState {
        let base: Url = "http://localhost:8080".parse().expect("static base url");
        HttpState::new(
            HttpStatePorts {
                login: self.login,
                authorization: self.authorization,
                community_logos: self.community_logos,
                bitstreams: self.bitstreams,
            },
            ResourceLinks::new(base).expect("static base url"),
        )
    }
}

/// Handler that signs the fixture administrator in.
pub async fn login_as(session: SessionContext) -> Result<HttpResponse, Error> {
    let id = UserId::from_uuid(FIXTURE_ADMIN_ID);
    session.persist_user(&id)?;
    Ok(HttpResponse::Ok().finish())
}

/// Boundary used by [`multipart_body`].
pub const TEST_BOUNDARY: &str = "----repository-test-boundary";

/// One part of a multipart test body.
pub struct TestPart<'a> {
    pub name: &'a str,
    pub file_name: Option<&'a str>,
    pub content_type: Option<&'a str>,
    pub data: &'a [u8],
}

/// Encode `parts` as `multipart/form-data`, returning the content type
/// header value and the body.
pub fn multipart_body(parts: &[TestPart<'_>]) -> (String, Vec<u8>) {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{TEST_BOUNDARY}\r\n").as_bytes());
        let disposition = match part.file_name {
            Some(file) => format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{file}\"\r\n",
                part.name
            ),
            None => format!("Content-Disposition: form-data; name=\"{}\"\r\n", part.name),
        };
        body.extend_from_slice(disposition.as_bytes());
        if let Some(kind) = part.content_type {
            body.extend_from_slice(format!("Content-Type: {kind}\r\n").as_bytes());
        }
        body.extend_from_slice(b"\r\n");
        body.extend_from_slice(part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{TEST_BOUNDARY}--\r\n").as_bytes());
    (
        format!("multipart/form-data; boundary={TEST_BOUNDARY}"),
        body,
    )
}
