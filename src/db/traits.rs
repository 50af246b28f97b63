//! User store abstraction
//!
//! This module provides the `UserStore` trait that the credential check reads
//! from, and `DatabaseProvider` for choosing a backend at startup.
//!
//! # Example
//!
//! ```rust,ignore
//! use authgate::db::DatabaseProvider;
//!
//! // Ephemeral store (tests, demos)
//! let store = DatabaseProvider::Memory.create_client().await?;
//!
//! // File-backed SQLite
//! let store = DatabaseProvider::SQLite { path: "data/authgate.db".into() }
//!     .create_client()
//!     .await?;
//! ```

use crate::types::{Result, UserRecord};
use async_trait::async_trait;
use std::sync::Arc;

/// Database provider configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DatabaseProvider {
    /// In-memory SQLite database (ephemeral, lost on restart)
    #[default]
    Memory,
    /// File-based SQLite database
    SQLite {
        /// Path to the SQLite database file
        path: String,
    },
}

impl DatabaseProvider {
    /// Picks a provider from a configured database URL.
    ///
    /// `":memory:"` and the empty string select the in-memory store; anything
    /// else is treated as a file path.
    pub fn from_url(url: &str) -> Self {
        let url = url.trim();
        if url.is_empty() || url == ":memory:" {
            DatabaseProvider::Memory
        } else {
            DatabaseProvider::SQLite {
                path: url.to_string(),
            }
        }
    }

    /// Create a user store from this provider configuration
    pub async fn create_client(&self) -> Result<Arc<dyn UserStore>> {
        match self {
            DatabaseProvider::Memory => {
                let client = super::turso::TursoClient::new_memory().await?;
                Ok(Arc::new(client))
            }
            DatabaseProvider::SQLite { path } => {
                let client = super::turso::TursoClient::new_local(path).await?;
                Ok(Arc::new(client))
            }
        }
    }
}

/// Lookup from username to stored credentials.
///
/// Implementations must be safe to share between request handlers; the
/// credential check does no locking of its own. Backend failures are
/// reported as `AppError::StoreUnavailable`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch a user by username. `Ok(None)` when no such user exists.
    async fn get_user(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Insert a new user. Fails with `InvalidInput` if the username is taken.
    async fn create_user(&self, user: &UserRecord) -> Result<()>;

    /// Whether a user with this username exists.
    async fn user_exists(&self, username: &str) -> Result<bool> {
        Ok(self.get_user(username).await?.is_some())
    }
}
