//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{ServerConfig, ServerSettings};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::info;

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::session_config::SessionSettings;
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    session: SessionSettings,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        session,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .service(ready)
        .service(live)
        .configure(http::configure)
        .wrap(session.middleware())
        .wrap(Trace);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server from resolved configuration.
///
/// Readiness is signalled once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when the asset store cannot be opened or the
/// socket cannot be bound.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)?;
    let session = config.session.clone();
    let bind_addr = config.bind_addr;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
            session: session.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    info!(%bind_addr, "server listening");
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Tests for server bootstrap and readiness signalling.

    use super::*;
    use actix_web::cookie::{Key, SameSite};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use rstest::{fixture, rstest};

    #[fixture]
    fn health_state() -> web::Data<HealthState> {
        web::Data::new(HealthState::new())
    }

    #[fixture]
    fn config() -> ServerConfig {
        ServerConfig {
            session: SessionSettings {
                key: Key::generate(),
                cookie_secure: false,
                same_site: SameSite::Lax,
            },
            bind_addr: "127.0.0.1:0".parse().expect("addr"),
            links: backend::inbound::http::hal::ResourceLinks::new(
                "http://localhost:8080".parse().expect("url"),
            )
            .expect("links"),
            assetstore_dir: None,
            upload_limit: 1024,
        }
    }

    #[rstest]
    #[actix_rt::test]
    async fn create_server_marks_ready(health_state: web::Data<HealthState>, config: ServerConfig) {
        assert!(!health_state.is_ready(), "state should start unready");

        let _server = create_server(health_state.clone(), config).expect("server should build");

        assert!(
            health_state.is_ready(),
            "server creation should mark readiness"
        );
    }

    #[rstest]
    #[actix_web::test]
    async fn app_serves_probes_and_api(health_state: web::Data<HealthState>, config: ServerConfig) {
        health_state.mark_ready();
        let http_state = build_http_state(&config).expect("state");
        let app = test::init_service(build_app(AppDependencies {
            health_state,
            http_state,
            session: config.session.clone(),
        }))
        .await;

        let ready_response = test::call_service(&app, test::TestRequest::get().uri("/health/ready").to_request())
            .await;
        assert_eq!(ready_response.status(), StatusCode::OK);
        assert!(ready_response.headers().contains_key(backend::domain::TRACE_ID_HEADER));

        let anonymous = test::call_service(
            &app,
            test::TestRequest::post()
                .uri("/api/core/communities/1c11f3f1-ba1f-4f36-908a-3f1ea9a557eb/logo")
                .to_request(),
        )
        .await;
        assert_eq!(anonymous.status(), StatusCode::UNAUTHORIZED);
    }
}
