use crate::auth::jwt::TokenCodec;
use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

pub fn create_auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(crate::api::handlers::auth::login))
        .route("/validate", post(crate::api::handlers::auth::validate))
}

pub fn create_protected_router(token_codec: Arc<TokenCodec>) -> Router<AppState> {
    Router::new()
        .route("/hello", get(crate::api::handlers::protected::hello))
        .route("/admin", get(crate::api::handlers::protected::admin))
        .route("/me", get(crate::api::handlers::protected::me))
        .layer(middleware::from_fn(move |req, next| {
            crate::auth::middleware::auth_middleware(token_codec.clone(), req, next)
        }))
}
