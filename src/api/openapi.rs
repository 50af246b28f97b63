//! OpenAPI document for the AuthGate HTTP surface.

use axum::Router;
use utoipa::{
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    Modify, OpenApi,
};

use crate::types::{Claims, LoginRequest, ValidateRequest};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "AuthGate API",
        description = "Username/password login, HS256 bearer tokens and role-gated resources.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "auth", description = "Login and token validation"),
        (name = "protected", description = "Resources behind the bearer-token layer")
    ),
    components(schemas(LoginRequest, ValidateRequest, Claims)),
    paths(
        crate::api::handlers::auth::login,
        crate::api::handlers::auth::validate,
        crate::api::handlers::protected::hello,
        crate::api::handlers::protected::admin,
        crate::api::handlers::protected::me,
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Serves the document at `/api-docs/openapi.json` and the interactive UI at `/swagger-ui`.
#[cfg(feature = "swagger-ui")]
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
        .into()
}

/// Serves the document at `/api-docs/openapi.json`.
#[cfg(not(feature = "swagger-ui"))]
pub fn swagger_ui_router<S>() -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    Router::new().route(
        "/api-docs/openapi.json",
        axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
    )
}
