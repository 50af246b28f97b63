use crate::auth::password::verify_password;
use crate::db::UserStore;
use crate::types::{AppError, Result, VerifiedIdentity};
use std::sync::Arc;
use tracing::debug;

/// Checks a username/password pair against the user store.
///
/// Unknown users and wrong passwords produce the same
/// `AppError::InvalidCredentials`, so callers cannot tell which one it was.
/// The distinction is only written to the debug log.
pub struct CredentialVerifier {
    store: Arc<dyn UserStore>,
}

impl CredentialVerifier {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self { store }
    }

    /// The backing user store.
    pub fn store(&self) -> &Arc<dyn UserStore> {
        &self.store
    }

    /// Verifies credentials, returning the stored identity on success.
    ///
    /// Store failures surface as `StoreUnavailable` and are not retried.
    /// The Argon2 comparison runs on the blocking pool.
    pub async fn verify(&self, username: &str, password: &str) -> Result<VerifiedIdentity> {
        if username.is_empty() || password.is_empty() {
            debug!("Login rejected: empty username or password");
            return Err(AppError::InvalidCredentials);
        }

        let Some(user) = self.store.get_user(username).await? else {
            debug!("Login rejected for '{}': user not found", username);
            return Err(AppError::InvalidCredentials);
        };

        let candidate = password.to_owned();
        let stored_hash = user.password_hash.clone();
        let matches =
            tokio::task::spawn_blocking(move || verify_password(&candidate, &stored_hash))
                .await
                .map_err(|e| AppError::Internal(format!("Password check task failed: {}", e)))??;

        if !matches {
            debug!("Login rejected for '{}': wrong password", username);
            return Err(AppError::InvalidCredentials);
        }

        Ok(VerifiedIdentity::from(&user))
    }
}
