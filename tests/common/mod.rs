//! Shared helpers for integration tests.

#![allow(dead_code)]

use authgate::{
    db::seed_users, utils::toml_config::BootstrapConfig, AppState, TokenCodec, TursoClient,
};
use axum_test::TestServer;
use std::sync::Arc;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-characters";
pub const TEST_EXPIRATION_MS: i64 = 3_600_000;

/// Token codec sharing the secret of the test server.
pub fn test_codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET, TEST_EXPIRATION_MS).expect("valid codec")
}

/// In-memory user store seeded with the default bootstrap accounts.
pub async fn seeded_store() -> TursoClient {
    let store = TursoClient::new_memory()
        .await
        .expect("Failed to create in-memory database");
    seed_users(&store, &BootstrapConfig::default().users)
        .await
        .expect("Failed to seed users");
    store
}

/// Full application router over a seeded in-memory store.
pub async fn create_test_server() -> TestServer {
    let state = AppState::new(Arc::new(seeded_store().await), test_codec());
    TestServer::new(authgate::api::app(state)).expect("Failed to create test server")
}

/// Logs in through the form endpoint and returns the token body.
pub async fn login(server: &TestServer, username: &str, password: &str) -> String {
    let response = server
        .post("/auth/login")
        .form(&[("username", username), ("password", password)])
        .await;
    response.assert_status_ok();
    response.text()
}
