use axum_helpers::{API_ROOT, ErrorResponse};
use domain_accounts::oauth::OAuthApiDoc;
use domain_events::IndexResource;
use utoipa::openapi::security::{Http, HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::api::index::INDEX_TAG;

/// Registers the token endpoint and the two security schemes it and the
/// event routes refer to.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.merge(OAuthApiDoc::openapi());

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        components.add_security_scheme(
            "client_basic",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Basic)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(crate::api::index::index),
    components(schemas(IndexResource, ErrorResponse)),
    info(
        title = "Events API",
        version = "0.1.0",
        description = "Event management with HAL links. Obtain a token from /oauth/token (password grant) and send it as a bearer token to create or update events."
    ),
    nest(
        (path = API_ROOT, api = domain_events::ApiDoc)
    ),
    modifiers(&SecurityAddon),
    tags((name = INDEX_TAG, description = "API entry point"))
)]
pub struct ApiDoc;
