//! Init command implementation
//!
//! Scaffolds an AuthGate deployment directory with a configuration file,
//! an environment template and the data directory.

use super::output::Output;
use std::fs;
use std::path::Path;

/// Result of the init operation
pub enum InitResult {
    /// Initialization completed successfully
    Success,
    /// Configuration already exists (authgate.toml found)
    AlreadyExists,
    /// An error occurred during initialization
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    /// Directory to initialize
    pub path: std::path::PathBuf,
    /// Overwrite existing files
    pub force: bool,
    /// Host address for the server
    pub host: String,
    /// Port for the server
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing AuthGate");

    let base_path = &config.path;

    let config_path = base_path.join("authgate.toml");
    if config_path.exists() && !config.force {
        output.warning("authgate.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    output.subheader("Creating directories");

    let data_dir = base_path.join("data");
    if !data_dir.exists() {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            output.error(&format!("Failed to create data: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("directory", "data");
    } else {
        output.skipped("data", "already exists");
    }

    output.subheader("Creating configuration files");

    let toml_content = generate_authgate_toml(&config);
    let files = [
        ("config", "authgate.toml", toml_content.as_str()),
        ("env", ".env.example", generate_env_example()),
    ];
    for (kind, name, content) in files {
        match write_file(&base_path.join(name), content, config.force) {
            Ok(true) => output.created(kind, name),
            Ok(false) => output.skipped(name, "already exists"),
            Err(e) => {
                output.error(&format!("Failed to create {}: {}", name, e));
                return InitResult::Error(e.to_string());
            }
        }
    }

    output.success("AuthGate initialized successfully!");

    output.header("Next Steps");
    output.newline();
    output.info("1. Set the signing secret:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set JWT_SECRET (generate with: openssl rand -base64 32)");
    output.newline();
    output.info("2. Change the bootstrap passwords in authgate.toml");
    output.newline();
    output.info("3. Start the server:");
    output.command("authgate-server");

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));

    InitResult::Success
}

/// Returns `Ok(false)` when an existing file was left in place.
fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}

fn generate_authgate_toml(config: &InitConfig) -> String {
    format!(
        r#"# AuthGate Configuration
# =====================

[server]
host = "{host}"
port = {port}
# trace, debug, info, warn, error (RUST_LOG overrides)
log_level = "info"
# "pretty" or "json"
log_format = "pretty"

[auth]
# Name of the environment variable holding the HS256 secret
jwt_secret_env = "JWT_SECRET"
# Token lifetime in milliseconds
jwt_expiration_ms = 3600000

[database]
# SQLite file path, or ":memory:" for a throwaway store
url = "./data/authgate.db"

# Accounts created on startup when missing. Existing accounts are left untouched.
[bootstrap]
enabled = true

[[bootstrap.users]]
username = "admin"
password = "123456"
role = "ADMIN"

[[bootstrap.users]]
username = "user"
password = "password"
role = "USER"
"#,
        host = config.host,
        port = config.port
    )
}

fn generate_env_example() -> &'static str {
    r#"# AuthGate Environment Variables
# ==============================
# Copy this file to .env and fill in the values.

# REQUIRED: HS256 signing secret (use a long random value)
# Generate with: openssl rand -base64 32
JWT_SECRET=change-me-in-production-use-at-least-32-characters

# Optional: Log filter, overrides server.log_level
# RUST_LOG=info,authgate=debug
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::AuthGateConfig;
    use tempfile::TempDir;

    fn create_test_config(temp_dir: &TempDir) -> InitConfig {
        InitConfig {
            path: temp_dir.path().to_path_buf(),
            force: false,
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }

    #[test]
    fn test_generated_toml_parses() {
        let config = InitConfig {
            path: std::path::PathBuf::from("/tmp"),
            force: false,
            host: "0.0.0.0".to_string(),
            port: 9999,
        };

        let parsed = AuthGateConfig::from_toml_str(&generate_authgate_toml(&config))
            .expect("generated config should parse");

        assert_eq!(parsed.server.host, "0.0.0.0");
        assert_eq!(parsed.server.port, 9999);
        assert_eq!(parsed.auth.jwt_secret_env, "JWT_SECRET");
        assert_eq!(parsed.auth.jwt_expiration_ms, 3_600_000);
        assert_eq!(parsed.bootstrap.users.len(), 2);
    }

    #[test]
    fn test_env_example_names_secret() {
        let content = generate_env_example();

        assert!(content.contains("JWT_SECRET="));
        assert!(content.contains("openssl rand"));
    }

    #[test]
    fn test_init_creates_files() {
        let temp_dir = TempDir::new().expect("temp dir");
        let output = Output::no_color();

        let result = run(create_test_config(&temp_dir), &output);

        assert!(matches!(result, InitResult::Success));
        assert!(temp_dir.path().join("authgate.toml").exists());
        assert!(temp_dir.path().join(".env.example").exists());
        assert!(temp_dir.path().join("data").is_dir());
    }

    #[test]
    fn test_init_refuses_existing_config() {
        let temp_dir = TempDir::new().expect("temp dir");
        let output = Output::no_color();
        fs::write(temp_dir.path().join("authgate.toml"), "# mine").expect("write");

        let result = run(create_test_config(&temp_dir), &output);

        assert!(matches!(result, InitResult::AlreadyExists));
        let kept = fs::read_to_string(temp_dir.path().join("authgate.toml")).expect("read");
        assert_eq!(kept, "# mine");
    }

    #[test]
    fn test_write_file_reports_skipped_existing_file() {
        let temp_dir = TempDir::new().expect("temp dir");
        let path = temp_dir.path().join(".env.example");
        fs::write(&path, "JWT_SECRET=mine").expect("write");

        let written = write_file(&path, generate_env_example(), false).expect("no io error");

        assert!(!written);
        assert_eq!(fs::read_to_string(&path).expect("read"), "JWT_SECRET=mine");
        assert!(write_file(&path, generate_env_example(), true).expect("overwrite"));
    }

    #[test]
    fn test_init_keeps_existing_env_example() {
        let temp_dir = TempDir::new().expect("temp dir");
        let output = Output::no_color();
        fs::write(temp_dir.path().join(".env.example"), "JWT_SECRET=mine").expect("write");

        let result = run(create_test_config(&temp_dir), &output);

        assert!(matches!(result, InitResult::Success));
        assert!(temp_dir.path().join("authgate.toml").exists());
        let env = fs::read_to_string(temp_dir.path().join(".env.example")).expect("read");
        assert_eq!(env, "JWT_SECRET=mine");
    }

    #[test]
    fn test_init_force_overwrites() {
        let temp_dir = TempDir::new().expect("temp dir");
        let output = Output::no_color();
        fs::write(temp_dir.path().join("authgate.toml"), "# mine").expect("write");

        let mut config = create_test_config(&temp_dir);
        config.force = true;
        let result = run(config, &output);

        assert!(matches!(result, InitResult::Success));
        let content = fs::read_to_string(temp_dir.path().join("authgate.toml")).expect("read");
        assert!(content.contains("[auth]"));
    }
}
