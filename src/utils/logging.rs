//! Structured logging via `tracing`.
//!
//! `RUST_LOG` takes precedence over the configured level when set.

use crate::types::{AppError, Result};
use crate::utils::toml_config::{LogFormat, ServerConfig};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the filter directive for a base level.
///
/// Only this crate's targets and the HTTP trace layer are raised to the
/// requested level; everything else stays at `warn`.
pub fn filter_directive(level: &str) -> String {
    format!("warn,authgate={level},authgate_server={level},tower_http={level}")
}

/// Installs the global subscriber. `verbose` forces `debug`.
pub fn init_tracing(server: &ServerConfig, verbose: bool) -> Result<()> {
    let level = if verbose {
        "debug"
    } else {
        server.log_level.as_str()
    };

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter_directive(level)))
        .map_err(|e| AppError::Configuration(format!("Invalid log level '{}': {}", level, e)))?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = match server.log_format {
        LogFormat::Pretty => registry.with(fmt::layer().with_target(true)).try_init(),
        LogFormat::Json => registry
            .with(fmt::layer().json().with_current_span(true))
            .try_init(),
    };
    result.map_err(|e| AppError::Internal(format!("Failed to install tracing subscriber: {}", e)))?;

    tracing::debug!(format = ?server.log_format, level = %level, "Logging initialized");

    Ok(())
}
