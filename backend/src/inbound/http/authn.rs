//! Session authentication endpoints.
//!
//! ```text
//! POST /api/authn/login {"username":"admin","password":"password"}
//! POST /api/authn/logout
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginValidationError};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/authn/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "admin")]
    pub username: String,
    #[schema(example = "password")]
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.username, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::EmptyUsername => Error::invalid_request("username must not be empty")
            .with_details(json!({ "field": "username", "code": "empty_username" })),
        LoginValidationError::EmptyPassword => Error::invalid_request("password must not be empty")
            .with_details(json!({ "field": "password", "code": "empty_password" })),
        LoginValidationError::InvalidUserId => Error::invalid_request(err.to_string()),
    }
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/authn/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 401, description = "Invalid credentials", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["authn"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(user_id = %user_id, "session established");
    Ok(HttpResponse::Ok().finish())
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/api/authn/logout",
    responses((status = 204, description = "Session ended")),
    tags = ["authn"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::NoContent().finish()
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use rstest::rstest;
    use serde_json::Value;

    use crate::inbound::http::test_utils::{TestPorts, test_session_middleware};

    macro_rules! authn_app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(TestPorts::default().into_state()))
                    .wrap(test_session_middleware())
                    .service(web::scope("/api/authn").service(login).service(logout)),
            )
        };
    }

    #[rstest]
    #[case("admin", "password", StatusCode::OK)]
    #[case("reader", "password", StatusCode::OK)]
    #[case("admin", "wrong", StatusCode::UNAUTHORIZED)]
    #[actix_web::test]
    async fn login_checks_credentials(
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: StatusCode,
    ) {
        let app = authn_app!().await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/authn/login")
                .set_json(json!({ "username": username, "password": password }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), expected);
        let sets_cookie = res.response().cookies().any(|c| c.name() == "session");
        assert_eq!(sets_cookie, expected == StatusCode::OK);
    }

    #[rstest]
    #[case("   ", "password", "username", "empty_username")]
    #[case("admin", "", "password", "empty_password")]
    #[actix_web::test]
    async fn login_rejects_blank_fields(
        #[case] username: &str,
        #[case] password: &str,
        #[case] field: &str,
        #[case] code: &str,
    ) {
        let app = authn_app!().await;
        let res = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/authn/login")
                .set_json(json!({ "username": username, "password": password }))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "invalid_request");
        assert_eq!(body["details"]["field"], field);
        assert_eq!(body["details"]["code"], code);
    }

    #[rstest]
    #[actix_web::test]
    async fn logout_returns_no_content() {
        let app = authn_app!().await;
        let res = test::call_service(
            &app,
            test::TestRequest::post().uri("/api/authn/logout").to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
