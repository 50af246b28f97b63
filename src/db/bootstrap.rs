//! First-run seeding of the user store.

use crate::auth::password::hash_password;
use crate::db::traits::UserStore;
use crate::types::{Result, UserRecord};
use crate::utils::toml_config::BootstrapUser;
use tracing::{debug, info};

/// Creates each configured user that does not exist yet.
///
/// Existing accounts are left untouched, so running this on every start is
/// safe. Returns the number of users created.
pub async fn seed_users(store: &dyn UserStore, users: &[BootstrapUser]) -> Result<usize> {
    let mut created = 0;

    for seed in users {
        if store.user_exists(&seed.username).await? {
            debug!("Bootstrap user '{}' already exists, skipping", seed.username);
            continue;
        }

        let password_hash = hash_password(&seed.password)?;
        store
            .create_user(&UserRecord::new(&seed.username, password_hash, &seed.role))
            .await?;

        info!("Created bootstrap user '{}' with role {}", seed.username, seed.role);
        created += 1;
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password;
    use crate::db::traits::MockUserStore;
    use crate::db::TursoClient;
    use crate::types::AppError;
    use crate::utils::toml_config::BootstrapConfig;

    #[tokio::test]
    async fn test_seeds_default_users() {
        let store = TursoClient::new_memory().await.expect("memory store");
        let users = BootstrapConfig::default().users;

        let created = seed_users(&store, &users).await.expect("should seed");

        assert_eq!(created, 2);
        let admin = store
            .get_user("admin")
            .await
            .expect("lookup")
            .expect("admin should exist");
        assert_eq!(admin.role, "ADMIN");
        assert!(verify_password("123456", &admin.password_hash).expect("verify"));

        let user = store
            .get_user("user")
            .await
            .expect("lookup")
            .expect("user should exist");
        assert_eq!(user.role, "USER");
        assert!(verify_password("password", &user.password_hash).expect("verify"));
    }

    #[tokio::test]
    async fn test_seeding_is_idempotent() {
        let store = TursoClient::new_memory().await.expect("memory store");
        let users = BootstrapConfig::default().users;

        seed_users(&store, &users).await.expect("first seed");
        let created = seed_users(&store, &users).await.expect("second seed");

        assert_eq!(created, 0);
        assert_eq!(store.count_users().await.expect("count"), 2);
    }

    #[tokio::test]
    async fn test_existing_account_is_not_overwritten() {
        let store = TursoClient::new_memory().await.expect("memory store");
        let custom_hash = hash_password("changed-by-operator").expect("hash");
        store
            .create_user(&UserRecord::new("admin", custom_hash.clone(), "ADMIN"))
            .await
            .expect("create");

        let created = seed_users(&store, &BootstrapConfig::default().users)
            .await
            .expect("should seed");

        assert_eq!(created, 1, "only the missing account is created");
        let admin = store.get_user("admin").await.expect("lookup").expect("exists");
        assert_eq!(admin.password_hash, custom_hash);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut store = MockUserStore::new();
        store
            .expect_user_exists()
            .returning(|_| Err(AppError::StoreUnavailable("connection refused".into())));

        let result = seed_users(&store, &BootstrapConfig::default().users).await;

        assert!(matches!(result, Err(AppError::StoreUnavailable(_))));
    }
}
