//! HTTP inbound adapter exposing REST endpoints.
//!
//! ```text
//! POST /api/authn/login
//! POST /api/authn/logout
//! POST /api/core/communities/{uuid}/logo
//! GET  /api/core/bitstreams/{uuid}[/content|/format]
//! ```

pub mod authn;
pub mod bitstreams;
pub mod communities;
pub mod error;
pub mod hal;
pub mod health;
pub mod logo_form;
pub mod permission;
pub mod schemas;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

use actix_web::web;

pub use error::ApiResult;

/// Mount the REST API below `/api`.
///
/// Handlers expect [`state::HttpState`] as app data and a session
/// middleware wrapping the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/authn")
            .service(authn::login)
            .service(authn::logout),
    )
    .service(
        web::scope("/api/core")
            .configure(communities::configure)
            .configure(bitstreams::configure),
    );
}
