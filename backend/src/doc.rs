//! OpenAPI documentation.
//!
//! [`ApiDoc`] collects the REST paths, the schema wrappers from
//! [`crate::inbound::http::schemas`] and the session cookie security scheme.
//! Swagger UI serves it in debug builds; `openapi-dump` prints it.

use crate::inbound::http::authn::LoginRequest;
use crate::inbound::http::hal::{
    BitstreamEmbedded, BitstreamFormatResource, BitstreamLinks, BitstreamResource,
    CheckSumResource, Link, MetadataValue,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, LogoUploadForm};
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Registers the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Session cookie issued by POST /api/authn/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Repository backend API",
        description = "Community logo uploads, bitstream retrieval, session login and health probes.",
        license(
            name = "Apache-2.0",
            url = "https://www.apache.org/licenses/LICENSE-2.0.html"
        )
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::authn::login,
        crate::inbound::http::authn::logout,
        crate::inbound::http::communities::upload_logo,
        crate::inbound::http::bitstreams::get_bitstream,
        crate::inbound::http::bitstreams::get_bitstream_content,
        crate::inbound::http::bitstreams::get_bitstream_format,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        LoginRequest,
        LogoUploadForm,
        BitstreamResource,
        BitstreamLinks,
        BitstreamEmbedded,
        BitstreamFormatResource,
        CheckSumResource,
        MetadataValue,
        Link,
    )),
    tags(
        (name = "authn", description = "Session login and logout"),
        (name = "communities", description = "Community logo management"),
        (name = "bitstreams", description = "Stored files and their formats"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    // utoipa replaces :: with . in schema names
    const ERROR_SCHEMA_NAME: &str = "crate.domain.Error";

    fn object_has_field(schema: &RefOr<Schema>, field: &str) -> bool {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj.properties.contains_key(field),
            _ => panic!("expected Object schema"),
        }
    }

    #[rstest]
    #[case(ERROR_SCHEMA_NAME, "code")]
    #[case(ERROR_SCHEMA_NAME, "message")]
    #[case(ERROR_SCHEMA_NAME, "traceId")]
    #[case("BitstreamResource", "sizeBytes")]
    #[case("BitstreamResource", "_links")]
    #[case("BitstreamFormatResource", "mimetype")]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        let found = schemas.get(schema).expect("schema registered");
        assert!(object_has_field(found, field), "{schema} lacks {field}");
    }

    #[rstest]
    #[case("/api/core/communities/{uuid}/logo")]
    #[case("/api/core/bitstreams/{uuid}/content")]
    #[case("/api/authn/login")]
    #[case("/health/ready")]
    fn paths_are_registered(#[case] path: &str) {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key(path), "missing {path}");
    }

    #[rstest]
    fn session_cookie_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("SessionCookie"));
    }
}
