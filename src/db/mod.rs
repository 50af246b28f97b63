//! User storage.
//!
//! This module provides the user store the credential check reads from:
//! - **Traits**: `UserStore`, the lookup the core depends on
//! - **Turso/SQLite**: libsql-backed implementation (file or in-memory)
//! - **Bootstrap**: first-run seeding of the administrator and standard accounts

#![allow(missing_docs)]

pub mod bootstrap;
pub mod traits;
pub mod turso;

// Re-exports
pub use bootstrap::seed_users;
pub use traits::{DatabaseProvider, UserStore};
pub use turso::TursoClient;
