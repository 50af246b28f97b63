//! API request handlers.

/// Authentication handlers (login, validate).
pub mod auth;
/// Handlers behind the bearer-token layer.
pub mod protected;
