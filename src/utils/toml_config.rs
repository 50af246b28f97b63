//! TOML-based configuration for AuthGate
//!
//! Infrastructure settings (listen address, logging, token lifetime, user
//! store location, first-run accounts) are read once from `authgate.toml`
//! at startup. The signing secret itself never lives in the file: the file
//! names an environment variable and the secret is read from there.
//!
//! The loaded configuration is immutable; restart the server to change it.

use crate::auth::jwt::MAX_EXPIRATION_MS;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure loaded from authgate.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthGateConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub database: DatabaseConfig,

    #[serde(default)]
    pub bootstrap: BootstrapConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub log_format: LogFormat,
}

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable, one event per line
    #[default]
    Pretty,
    /// Newline-delimited JSON
    Json,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    /// Token lifetime in milliseconds
    #[serde(default = "default_jwt_expiration_ms")]
    pub jwt_expiration_ms: i64,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

fn default_jwt_expiration_ms() -> i64 {
    3_600_000
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            jwt_expiration_ms: default_jwt_expiration_ms(),
        }
    }
}

// ============= Database Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file path, or `:memory:` for an ephemeral store
    #[serde(default = "default_database_url")]
    pub url: String,
}

fn default_database_url() -> String {
    "./data/authgate.db".to_string()
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
        }
    }
}

// ============= Bootstrap Configuration =============

/// Accounts created on startup when missing from the user store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BootstrapConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_bootstrap_users")]
    pub users: Vec<BootstrapUser>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapUser {
    pub username: String,
    pub password: String,
    pub role: String,
}

fn default_true() -> bool {
    true
}

fn default_bootstrap_users() -> Vec<BootstrapUser> {
    vec![
        BootstrapUser {
            username: "admin".to_string(),
            password: "123456".to_string(),
            role: crate::auth::ROLE_ADMIN.to_string(),
        },
        BootstrapUser {
            username: "user".to_string(),
            password: "password".to_string(),
            role: crate::auth::ROLE_USER.to_string(),
        },
    ]
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            users: default_bootstrap_users(),
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),

    #[error("Environment variable '{0}' holds an empty JWT secret")]
    EmptySecret(String),
}

impl From<ConfigError> for crate::types::AppError {
    fn from(err: ConfigError) -> Self {
        crate::types::AppError::Configuration(err.to_string())
    }
}

impl AuthGateConfig {
    /// Load and validate configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Parse configuration without validating it
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Checks everything the server needs before it can start.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_EXPIRATION_MS).contains(&self.auth.jwt_expiration_ms) {
            return Err(ConfigError::ValidationError(format!(
                "auth.jwt_expiration_ms must be between 1 and {} (got {})",
                MAX_EXPIRATION_MS, self.auth.jwt_expiration_ms
            )));
        }

        self.jwt_secret()?;

        if self.bootstrap.enabled {
            let mut seen = HashSet::new();
            for user in &self.bootstrap.users {
                if user.username.trim().is_empty()
                    || user.password.is_empty()
                    || user.role.trim().is_empty()
                {
                    return Err(ConfigError::ValidationError(
                        "bootstrap users need a username, password and role".to_string(),
                    ));
                }
                if !seen.insert(user.username.as_str()) {
                    return Err(ConfigError::ValidationError(format!(
                        "bootstrap user '{}' is listed more than once",
                        user.username
                    )));
                }
            }
        }

        Ok(())
    }

    /// Get a resolved value from an env var reference
    pub fn resolve_env(&self, env_name: &str) -> Option<String> {
        std::env::var(env_name).ok()
    }

    /// Get the JWT secret from the environment
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        let name = &self.auth.jwt_secret_env;
        let secret = self
            .resolve_env(name)
            .ok_or_else(|| ConfigError::MissingEnvVar(name.clone()))?;

        if secret.trim().is_empty() {
            return Err(ConfigError::EmptySecret(name.clone()));
        }

        Ok(secret)
    }

    /// `host:port` to bind the HTTP listener to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn create_test_config(secret_env: &str) -> String {
        format!(
            r#"
[server]
host = "0.0.0.0"
port = 9000
log_level = "debug"
log_format = "json"

[auth]
jwt_secret_env = "{secret_env}"
jwt_expiration_ms = 60000

[database]
url = ":memory:"

[bootstrap]
enabled = true

[[bootstrap.users]]
username = "root"
password = "toor"
role = "ADMIN"
"#
        )
    }

    #[test]
    fn test_parse_config() {
        let config = AuthGateConfig::from_toml_str(&create_test_config("UNUSED"))
            .expect("Failed to parse config");

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.log_format, LogFormat::Json);
        assert_eq!(config.auth.jwt_expiration_ms, 60000);
        assert_eq!(config.database.url, ":memory:");
        assert_eq!(config.bootstrap.users.len(), 1);
        assert_eq!(config.bootstrap.users[0].username, "root");
        assert_eq!(config.bind_address(), "0.0.0.0:9000");
    }

    #[test]
    fn test_defaults() {
        let config = AuthGateConfig::from_toml_str("").expect("empty config should parse");

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.log_level, "info");
        assert_eq!(config.server.log_format, LogFormat::Pretty);
        assert_eq!(config.auth.jwt_secret_env, "JWT_SECRET");
        assert_eq!(config.auth.jwt_expiration_ms, 3_600_000);
        assert_eq!(config.database.url, "./data/authgate.db");
        assert!(config.bootstrap.enabled);

        let usernames: Vec<&str> = config
            .bootstrap
            .users
            .iter()
            .map(|u| u.username.as_str())
            .collect();
        assert_eq!(usernames, vec!["admin", "user"]);
    }

    #[test]
    fn test_validation_missing_secret() {
        let config = AuthGateConfig::from_toml_str(&create_test_config(
            "AUTHGATE_TEST_SECRET_NEVER_SET",
        ))
        .expect("should parse");

        let result = config.validate();

        assert!(matches!(result, Err(ConfigError::MissingEnvVar(name)) if name == "AUTHGATE_TEST_SECRET_NEVER_SET"));
    }

    #[test]
    fn test_validation_empty_secret() {
        std::env::set_var("AUTHGATE_TEST_SECRET_EMPTY", "   ");
        let config = AuthGateConfig::from_toml_str(&create_test_config("AUTHGATE_TEST_SECRET_EMPTY"))
            .expect("should parse");

        let result = config.validate();

        assert!(matches!(result, Err(ConfigError::EmptySecret(_))));
    }

    #[test]
    fn test_validation_success_resolves_secret() {
        std::env::set_var("AUTHGATE_TEST_SECRET_OK", "test-secret-at-least-32-characters-long");
        let config = AuthGateConfig::from_toml_str(&create_test_config("AUTHGATE_TEST_SECRET_OK"))
            .expect("should parse");

        config.validate().expect("config should be valid");
        assert_eq!(
            config.jwt_secret().expect("secret"),
            "test-secret-at-least-32-characters-long"
        );
    }

    #[test]
    fn test_validation_non_positive_expiration() {
        std::env::set_var("AUTHGATE_TEST_SECRET_EXP", "secret");
        let mut config = AuthGateConfig::default();
        config.auth.jwt_secret_env = "AUTHGATE_TEST_SECRET_EXP".to_string();
        config.auth.jwt_expiration_ms = 0;

        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_oversized_expiration() {
        std::env::set_var("AUTHGATE_TEST_SECRET_HUGE", "secret");
        let mut config = AuthGateConfig::default();
        config.auth.jwt_secret_env = "AUTHGATE_TEST_SECRET_HUGE".to_string();
        config.auth.jwt_expiration_ms = 10_000_000_000_000_000;

        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        config.auth.jwt_expiration_ms = MAX_EXPIRATION_MS;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_duplicate_bootstrap_user() {
        std::env::set_var("AUTHGATE_TEST_SECRET_DUP", "secret");
        let mut config = AuthGateConfig::default();
        config.auth.jwt_secret_env = "AUTHGATE_TEST_SECRET_DUP".to_string();
        let first = config.bootstrap.users[0].clone();
        config.bootstrap.users.push(first);

        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_validation_blank_bootstrap_field() {
        std::env::set_var("AUTHGATE_TEST_SECRET_BLANK", "secret");
        let mut config = AuthGateConfig::default();
        config.auth.jwt_secret_env = "AUTHGATE_TEST_SECRET_BLANK".to_string();
        config.bootstrap.users[1].role = " ".to_string();

        assert!(matches!(config.validate(), Err(ConfigError::ValidationError(_))));

        // Disabled bootstrap skips the user checks.
        config.bootstrap.enabled = false;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_missing_file() {
        let result = AuthGateConfig::load("/definitely/not/here/authgate.toml");
        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_from_file() {
        std::env::set_var("AUTHGATE_TEST_SECRET_FILE", "file-secret");
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(create_test_config("AUTHGATE_TEST_SECRET_FILE").as_bytes())
            .expect("write config");

        let config = AuthGateConfig::load(file.path()).expect("should load");

        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_load_invalid_toml() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(b"[server\nport = ").expect("write config");

        let result = AuthGateConfig::load(file.path());

        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }
}
