use crate::{
    auth::{require_role, AuthUser, ROLE_ADMIN},
    types::Result,
};

/// Greeting for any authenticated caller
#[utoipa::path(
    get,
    path = "/api/hello",
    responses(
        (status = 200, description = "Caller is authenticated", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "protected"
)]
pub async fn hello(AuthUser(_claims): AuthUser) -> &'static str {
    "Hello! You have successfully accessed a protected endpoint!"
}

/// Administrator-only resource
#[utoipa::path(
    get,
    path = "/api/admin",
    responses(
        (status = 200, description = "Caller holds the ADMIN role", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller lacks the ADMIN role")
    ),
    security(("bearer_auth" = [])),
    tag = "protected"
)]
pub async fn admin(AuthUser(claims): AuthUser) -> Result<&'static str> {
    require_role(&claims, &[ROLE_ADMIN])?;

    Ok("Welcome, Administrator! This is a restricted resource.")
}

/// Who the bearer token belongs to
#[utoipa::path(
    get,
    path = "/api/me",
    responses(
        (status = 200, description = "Caller's username", body = String, content_type = "text/plain"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "protected"
)]
pub async fn me(AuthUser(claims): AuthUser) -> String {
    format!("You are logged in as: {}", claims.sub)
}
