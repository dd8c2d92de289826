//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Provides a thin wrapper around Actix sessions so handlers and middleware
//! only deal with domain-friendly operations such as persisting a user id or
//! resolving the request [`Subject`].

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Error, Subject, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    #[must_use]
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    ///
    /// A tampered or malformed id is treated as no session.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(user) => Ok(Some(user)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// The caller this request runs on behalf of.
    pub fn subject(&self) -> Result<Subject, Error> {
        Ok(self.user_id()?.map_or(Subject::Anonymous, Subject::User))
    }

    /// Drop all session state and expire the cookie.
    pub fn purge(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, HttpResponse, test, web};

    use crate::inbound::http::test_utils::{session_cookie, test_session_middleware};

    const USER: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";

    async fn set_user(session: SessionContext) -> Result<HttpResponse, Error> {
        let id = UserId::new(USER).expect("fixture id");
        session.persist_user(&id)?;
        Ok(HttpResponse::Ok().finish())
    }

    async fn show_subject(session: SessionContext) -> Result<HttpResponse, Error> {
        Ok(HttpResponse::Ok().body(session.subject()?.to_string()))
    }

    #[actix_web::test]
    async fn subject_reflects_persisted_user() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/set", web::get().to(set_user))
                .route("/who", web::get().to(show_subject)),
        )
        .await;

        let set_res =
            test::call_service(&app, test::TestRequest::get().uri("/set").to_request()).await;
        assert_eq!(set_res.status(), StatusCode::OK);
        let cookie = session_cookie(&set_res);

        let who = test::call_service(
            &app,
            test::TestRequest::get().uri("/who").cookie(cookie).to_request(),
        )
        .await;
        let body = test::read_body(who).await;
        assert_eq!(body, format!("user:{USER}"));
    }

    #[actix_web::test]
    async fn missing_session_is_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route("/who", web::get().to(show_subject)),
        )
        .await;

        let res = test::call_service(&app, test::TestRequest::get().uri("/who").to_request()).await;
        let body = test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }

    #[actix_web::test]
    async fn tampered_user_id_is_anonymous() {
        let app = test::init_service(
            App::new()
                .wrap(test_session_middleware())
                .route(
                    "/set-invalid",
                    web::get().to(|session: Session| async move {
                        session
                            .insert(USER_ID_KEY, "not-a-uuid")
                            .expect("set invalid user id");
                        HttpResponse::Ok()
                    }),
                )
                .route("/who", web::get().to(show_subject)),
        )
        .await;

        let set_res = test::call_service(
            &app,
            test::TestRequest::get().uri("/set-invalid").to_request(),
        )
        .await;
        let cookie = session_cookie(&set_res);

        let res = test::call_service(
            &app,
            test::TestRequest::get().uri("/who").cookie(cookie).to_request(),
        )
        .await;
        let body = test::read_body(res).await;
        assert_eq!(body, "anonymous");
    }
}
