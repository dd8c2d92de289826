//! Backend library modules.
//!
//! Layout follows ports and adapters: [`domain`] holds entities, services and
//! port traits; [`inbound`] adapts HTTP onto the domain; [`outbound`]
//! implements the ports; [`middleware`] carries request lifecycle concerns.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
