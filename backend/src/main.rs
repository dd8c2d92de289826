//! Backend entry-point: loads settings, wires adapters and serves the REST API.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, fmt};

use backend::inbound::http::health::HealthState;
use backend::inbound::http::session_config::{BuildMode, ProcessEnv, session_settings_from_env};
use server::{ServerConfig, ServerSettings, create_server};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os()).map_err(|err| {
        error!(error = %err, "failed to load server settings");
        std::io::Error::other(err.to_string())
    })?;
    let session = session_settings_from_env(&ProcessEnv, BuildMode::from_debug_assertions())
        .map_err(|err| {
            error!(error = %err, "invalid session configuration");
            std::io::Error::other(err)
        })?;
    let config = ServerConfig::resolve(&settings, session)?;

    let health_state = web::Data::new(HealthState::new());
    create_server(health_state, config)?.await
}
