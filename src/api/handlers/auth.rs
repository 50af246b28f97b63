use crate::{
    api::extract::FormOrQuery,
    types::{AppError, LoginRequest, Result, ValidateRequest},
    AppState,
};
use axum::{extract::State, http::StatusCode};
use tracing::info;

/// Login with username and password
///
/// Returns the signed token as the plain-text response body.
#[utoipa::path(
    post,
    path = "/auth/login",
    params(LoginRequest),
    responses(
        (status = 200, description = "Login successful, body is the JWT", body = String, content_type = "text/plain"),
        (status = 400, description = "Missing username or password"),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal error")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    FormOrQuery(payload): FormOrQuery<LoginRequest>,
) -> Result<String> {
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(AppError::InvalidInput(
            "Both 'username' and 'password' are required".to_string(),
        ));
    }

    let identity = state
        .credentials
        .verify(&payload.username, &payload.password)
        .await?;

    let token = state.tokens.issue(&identity)?;

    info!("Issued token for '{}' ({})", identity.username, identity.role);

    Ok(token)
}

/// Check whether a token is valid
///
/// Always answers with plain text, never with an error body.
#[utoipa::path(
    post,
    path = "/auth/validate",
    params(ValidateRequest),
    responses(
        (status = 200, description = "Token is valid", body = String, content_type = "text/plain"),
        (status = 401, description = "Token is invalid or expired", body = String, content_type = "text/plain")
    ),
    tag = "auth"
)]
pub async fn validate(
    State(state): State<AppState>,
    FormOrQuery(payload): FormOrQuery<ValidateRequest>,
) -> (StatusCode, String) {
    if state.tokens.validate(&payload.token) {
        match state.tokens.decode_subject(&payload.token) {
            Ok(username) => return (StatusCode::OK, format!("Token valid! Username: {}", username)),
            Err(e) => tracing::warn!("Validated token has no readable subject: {}", e),
        }
    }

    (
        StatusCode::UNAUTHORIZED,
        "Invalid or expired token.".to_string(),
    )
}
