//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for AuthGate, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//! - [`api::extract`](crate::api::extract) - Form-or-query parameter extractor
//! - [`api::openapi`](crate::api::openapi) - OpenAPI document
//!
//! # API Endpoints
//!
//! ## Authentication (`/auth`)
//! - `POST /auth/login` - Exchange username/password for a JWT (plain-text body)
//! - `POST /auth/validate` - Check a token and report its subject
//!
//! ## Protected (`/api`)
//! - `GET /api/hello` - Any authenticated caller
//! - `GET /api/admin` - Callers holding the `ADMIN` role
//! - `GET /api/me` - Echo the caller's username
//!
//! ## Health
//! - `GET /health` - Liveness check
//!
//! # Authentication
//!
//! Protected endpoints require a valid JWT token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! The document is always served at `/api-docs/openapi.json`. When the
//! `swagger-ui` feature is enabled, interactive documentation is available
//! at `/swagger-ui/`.

/// Form-or-query request parameter extraction.
pub mod extract;
/// Request and response handlers for all API endpoints.
pub mod handlers;
/// OpenAPI document and docs router.
pub mod openapi;
/// Router configuration and route definitions.
pub mod routes;

use crate::AppState;
use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Request bodies carry at most a username, password or token.
const MAX_BODY_BYTES: usize = 16 * 1024;

/// Builds the complete application router.
pub fn app(state: AppState) -> Router {
    let protected = routes::create_protected_router(state.tokens.clone());

    Router::new()
        .route("/health", get(health))
        .nest("/auth", routes::create_auth_router())
        .nest("/api", protected)
        .merge(openapi::swagger_ui_router::<AppState>())
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

async fn health() -> &'static str {
    "OK"
}
