use anyhow::Context;
use authgate::{
    api,
    auth::password::hash_password,
    cli::{
        init::{self, InitConfig, InitResult},
        output::{redact, Output},
        Cli, Commands,
    },
    db::seed_users,
    utils::{logging::init_tracing, toml_config::AuthGateConfig},
    AppState, DatabaseProvider, TokenCodec,
};
use std::path::Path;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    let Cli {
        config,
        verbose,
        no_color,
        command,
    } = Cli::parse_args();

    let output = if no_color {
        Output::no_color()
    } else {
        Output::new()
    };

    match command {
        Some(Commands::Init {
            path,
            force,
            host,
            port,
        }) => match init::run(
            InitConfig {
                path,
                force,
                host,
                port,
            },
            &output,
        ) {
            InitResult::Success | InitResult::AlreadyExists => Ok(()),
            InitResult::Error(e) => Err(anyhow::anyhow!(e)),
        },
        Some(Commands::HashPassword { password }) => {
            println!("{}", hash_password(&password)?);
            Ok(())
        }
        Some(Commands::Config { validate }) => show_config(&config, validate, &output),
        Some(Commands::Serve) | None => serve(&config, verbose).await,
    }
}

async fn serve(config_path: &Path, verbose: bool) -> anyhow::Result<()> {
    let config = AuthGateConfig::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    init_tracing(&config.server, verbose)?;

    let secret = config.jwt_secret()?;
    let codec = TokenCodec::new(&secret, config.auth.jwt_expiration_ms)?;

    let store = DatabaseProvider::from_url(&config.database.url)
        .create_client()
        .await
        .context("Failed to open user store")?;
    info!("User store ready at {}", config.database.url);

    if config.bootstrap.enabled {
        let created = seed_users(store.as_ref(), &config.bootstrap.users).await?;
        info!("Bootstrap created {} user(s)", created);
    }

    let app = api::app(AppState::new(store, codec));

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("AuthGate listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

fn show_config(config_path: &Path, validate: bool, output: &Output) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    let config = AuthGateConfig::from_toml_str(&content)?;

    output.header("AuthGate Configuration");
    output.kv("file", &config_path.display().to_string());

    output.subheader("Server");
    output.kv("address", &config.bind_address());
    output.kv("log_level", &config.server.log_level);
    output.kv("log_format", &format!("{:?}", config.server.log_format).to_lowercase());

    output.subheader("Auth");
    output.kv("jwt_secret_env", &config.auth.jwt_secret_env);
    let secret = match config.jwt_secret() {
        Ok(secret) => redact(&secret),
        Err(_) => "<not set>".to_string(),
    };
    output.kv("jwt_secret", &secret);
    output.kv("jwt_expiration_ms", &config.auth.jwt_expiration_ms.to_string());

    output.subheader("Database");
    output.kv("url", &config.database.url);

    output.subheader("Bootstrap");
    output.kv("enabled", &config.bootstrap.enabled.to_string());
    for user in &config.bootstrap.users {
        output.list_item(&format!("{} ({})", user.username, user.role));
    }

    if validate {
        output.newline();
        match config.validate() {
            Ok(()) => output.success("Configuration is valid"),
            Err(e) => {
                output.error(&e.to_string());
                return Err(e.into());
            }
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            warn!("Received Ctrl+C, initiating graceful shutdown...");
        }
        _ = terminate => {
            warn!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
