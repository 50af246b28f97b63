use crate::auth::jwt::TokenCodec;
use crate::types::{AppError, Claims};
use axum::{
    extract::{FromRequestParts, Request},
    http::{header, request::Parts},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::debug;

/// Pulls the token out of an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header_value: &str) -> Option<&str> {
    let (scheme, token) = header_value.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

/// Rejects requests without a valid bearer token and stores the verified
/// claims in the request extensions.
pub async fn auth_middleware(
    token_codec: Arc<TokenCodec>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(bearer_token)
        .ok_or(AppError::MissingToken)?;

    let claims = token_codec.verify(token).map_err(|e| {
        debug!("Rejected bearer token on {}: {}", req.uri().path(), e);
        e
    })?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

/// Extractor for claims placed by [`auth_middleware`].
pub struct AuthUser(pub Claims);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthUser)
            .ok_or(AppError::MissingToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("bearer abc.def.ghi", Some("abc.def.ghi"))]
    #[case("Bearer   abc.def.ghi  ", Some("abc.def.ghi"))]
    #[case("Bearer ", None)]
    #[case("Bearer", None)]
    #[case("Basic dXNlcjpwYXNz", None)]
    #[case("abc.def.ghi", None)]
    fn test_bearer_token_parsing(#[case] header_value: &str, #[case] expected: Option<&str>) {
        assert_eq!(bearer_token(header_value), expected);
    }
}
