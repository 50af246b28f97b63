use crate::db::traits::UserStore;
use crate::types::{AppError, Result, UserRecord};
use async_trait::async_trait;
use chrono::Utc;
use libsql::{Builder, Connection, Database};
use std::path::Path;
use tracing::debug;

/// libsql-backed user store.
///
/// Keeps one connection open for the lifetime of the client. For `:memory:`
/// databases this is required, since every new connection would open a
/// separate, empty database.
pub struct TursoClient {
    _db: Database,
    conn: Connection,
}

impl TursoClient {
    /// Opens an ephemeral in-memory database.
    pub async fn new_memory() -> Result<Self> {
        Self::new_local(":memory:").await
    }

    /// Opens (or creates) a SQLite database file at `path`.
    pub async fn new_local(path: &str) -> Result<Self> {
        if path != ":memory:" {
            if let Some(parent) = Path::new(path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).map_err(|e| {
                        AppError::StoreUnavailable(format!(
                            "Failed to create database directory {:?}: {}",
                            parent, e
                        ))
                    })?;
                }
            }
        }

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| AppError::StoreUnavailable(format!("Failed to open database: {}", e)))?;
        let conn = db
            .connect()
            .map_err(|e| AppError::StoreUnavailable(format!("Failed to get connection: {}", e)))?;

        let client = Self { _db: db, conn };
        client.initialize_schema().await?;

        debug!("Opened user store at {}", path);
        Ok(client)
    }

    pub fn connection(&self) -> Result<Connection> {
        Ok(self.conn.clone())
    }

    async fn initialize_schema(&self) -> Result<()> {
        let conn = self.connection()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                username TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                role TEXT NOT NULL,
                created_at INTEGER NOT NULL
            )",
            (),
        )
        .await
        .map_err(|e| AppError::StoreUnavailable(format!("Failed to create users table: {}", e)))?;

        Ok(())
    }

    /// Number of stored users.
    pub async fn count_users(&self) -> Result<i64> {
        let conn = self.connection()?;

        let mut rows = conn
            .query("SELECT COUNT(*) FROM users", ())
            .await
            .map_err(|e| AppError::StoreUnavailable(format!("Failed to count users: {}", e)))?;

        match rows
            .next()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?
        {
            Some(row) => row
                .get::<i64>(0)
                .map_err(|e| AppError::StoreUnavailable(e.to_string())),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl UserStore for TursoClient {
    async fn get_user(&self, username: &str) -> Result<Option<UserRecord>> {
        let conn = self.connection()?;

        let mut rows = conn
            .query(
                "SELECT username, password_hash, role FROM users WHERE username = ?",
                [username],
            )
            .await
            .map_err(|e| AppError::StoreUnavailable(format!("Failed to query user: {}", e)))?;

        if let Some(row) = rows
            .next()
            .await
            .map_err(|e| AppError::StoreUnavailable(e.to_string()))?
        {
            Ok(Some(UserRecord {
                username: row
                    .get(0)
                    .map_err(|e| AppError::StoreUnavailable(e.to_string()))?,
                password_hash: row
                    .get(1)
                    .map_err(|e| AppError::StoreUnavailable(e.to_string()))?,
                role: row
                    .get(2)
                    .map_err(|e| AppError::StoreUnavailable(e.to_string()))?,
            }))
        } else {
            Ok(None)
        }
    }

    async fn create_user(&self, user: &UserRecord) -> Result<()> {
        let conn = self.connection()?;
        let now = Utc::now().timestamp();

        conn.execute(
            "INSERT INTO users (username, password_hash, role, created_at)
             VALUES (?, ?, ?, ?)",
            (
                user.username.as_str(),
                user.password_hash.as_str(),
                user.role.as_str(),
                now,
            ),
        )
        .await
        .map_err(|e| {
            if e.to_string().contains("UNIQUE") {
                AppError::InvalidInput(format!("User '{}' already exists", user.username))
            } else {
                AppError::StoreUnavailable(format!("Failed to create user: {}", e))
            }
        })?;

        Ok(())
    }
}
