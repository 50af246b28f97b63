use crate::types::AppError;
use axum::{
    extract::{FromRequest, Query, Request},
    http::{header::CONTENT_TYPE, StatusCode},
    Form,
};
use serde::de::DeserializeOwned;

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Reads request parameters from a url-encoded form body, falling back to
/// the query string when the request carries no form body.
pub struct FormOrQuery<T>(pub T);

fn has_form_body(req: &Request) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with(FORM_CONTENT_TYPE))
}

impl<T, S> FromRequest<S> for FormOrQuery<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if has_form_body(&req) {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|e| match e.status() {
                    StatusCode::PAYLOAD_TOO_LARGE => AppError::PayloadTooLarge,
                    _ => AppError::InvalidInput(e.body_text()),
                })?;
            return Ok(Self(value));
        }

        let Query(value) = Query::<T>::try_from_uri(req.uri())
            .map_err(|e| AppError::InvalidInput(e.body_text()))?;
        Ok(Self(value))
    }
}
