//! # AuthGate
//!
//! A small authentication gateway: callers log in with a username and
//! password, receive an HS256-signed JWT, and present it as a bearer token
//! to reach protected resources. Some resources additionally require a role.
//!
//! ## Overview
//!
//! AuthGate can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `authgate-server` binary
//! 2. **As a library** - Mount [`api::app`] or use the auth components directly
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use authgate::{AppState, TokenCodec, TursoClient, db::seed_users};
//! use authgate::utils::toml_config::BootstrapConfig;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = TursoClient::new_memory().await?;
//!     seed_users(&store, &BootstrapConfig::default().users).await?;
//!
//!     let codec = TokenCodec::new("a-long-random-secret", 3_600_000)?;
//!     let app = authgate::api::app(AppState::new(Arc::new(store), codec));
//!
//!     let listener = tokio::net::TcpListener::bind("127.0.0.1:8080").await?;
//!     axum::serve(listener, app).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `swagger-ui` | Interactive API docs at `/swagger-ui/` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - Credential checks, JWT codec, roles and middleware
//! - [`cli`] - Command-line interface for the server binary
//! - [`db`] - User store abstraction (SQLite via libsql)
//! - [`types`] - Common types and error handling
//! - [`utils`] - Configuration and logging

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Authentication, token handling and authorization.
pub mod auth;
/// Command-line interface.
pub mod cli;
/// User store clients.
pub mod db;
/// Core types (requests, claims, errors).
pub mod types;
/// Configuration and logging utilities.
pub mod utils;

// Re-export commonly used types
pub use auth::{CredentialVerifier, TokenCodec};
pub use db::{DatabaseProvider, TursoClient, UserStore};
pub use types::{AppError, Claims, Result, VerifiedIdentity};
pub use utils::toml_config::AuthGateConfig;

use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Username/password verification against the user store
    pub credentials: Arc<CredentialVerifier>,
    /// Token issuance and validation
    pub tokens: Arc<TokenCodec>,
}

impl AppState {
    /// Wires a user store and token codec into handler state.
    pub fn new(store: Arc<dyn UserStore>, tokens: TokenCodec) -> Self {
        Self {
            credentials: Arc::new(CredentialVerifier::new(store)),
            tokens: Arc::new(tokens),
        }
    }
}
