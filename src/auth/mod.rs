//! Credential checks, token issuance and authorization
//!
//! This module holds the authentication core of AuthGate and the Axum glue
//! that puts it in front of protected routes.
//!
//! # Module Structure
//!
//! - [`auth::credentials`](crate::auth::credentials) - username/password verification against the user store
//! - [`auth::jwt`](crate::auth::jwt) - HS256 token issuance, validation and decoding
//! - [`auth::password`](crate::auth::password) - Argon2id hashing
//! - [`auth::roles`](crate::auth::roles) - exact-match role checks
//! - [`auth::middleware`](crate::auth::middleware) - bearer-token layer and claims extractor
//!
//! # Security Features
//!
//! - **Password Hashing**: Argon2id (memory-hard), PHC strings with per-hash salt
//! - **JWT Tokens**: HS256 compact tokens carrying `sub`, `role`, `iat`, `exp`
//! - **Stateless**: validity is decided by signature and expiry alone
//!
//! # Usage
//!
//! ```ignore
//! use authgate::auth::{CredentialVerifier, TokenCodec};
//!
//! let identity = verifier.verify("admin", "123456").await?;
//! let token = codec.issue(&identity)?;
//! assert!(codec.validate(&token));
//! ```
//!
//! ## Extracting Claims in Handlers
//!
//! ```ignore
//! async fn protected_handler(AuthUser(claims): AuthUser) -> impl IntoResponse {
//!     format!("Hello, {}!", claims.sub)
//! }
//! ```

/// Username/password verification.
pub mod credentials;
/// JWT token generation, validation and decoding.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Argon2id password hashing.
pub mod password;
/// Role labels and access checks.
pub mod roles;

pub use credentials::CredentialVerifier;
pub use jwt::TokenCodec;
pub use middleware::AuthUser;
pub use roles::{require_role, ROLE_ADMIN, ROLE_USER};
