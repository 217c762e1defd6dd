//! # checklist-api — Binary Entry Point
//!
//! Reads configuration from the environment (and `.env`, if present),
//! applies command-line overrides, and starts the Axum HTTP server.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use checklist_api::config::{AppConfig, StorageMode};
use checklist_api::db::Database;
use checklist_api::state::AppState;
use checklist_crypto::SessionKey;

/// Checklist server.
#[derive(Parser, Debug)]
#[command(name = "checklist-api", version, about = "Single-user checklist server")]
struct Cli {
    /// Listen port. Overrides `PORT`.
    #[arg(long)]
    port: Option<u16>,

    /// Directory of the web client. Overrides `STATIC_DIR`.
    #[arg(long)]
    static_dir: Option<PathBuf>,

    /// Keep data in process memory instead of Postgres.
    #[arg(long)]
    in_memory: bool,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env file is normal.
    let dotenv_path = dotenv::dotenv().ok();
    init_tracing();
    if let Some(path) = dotenv_path {
        tracing::debug!(path = %path.display(), "loaded .env");
    }

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("invalid configuration")?;
    if let Some(port) = cli.port {
        config.port = port;
    }
    if let Some(dir) = cli.static_dir {
        config.static_dir = dir;
    }
    if cli.in_memory {
        config.storage = StorageMode::Memory;
    }

    let session_key = match &config.session_secret {
        Some(secret) => SessionKey::from_secret(secret.expose().as_bytes()),
        None => {
            tracing::warn!("JWT_SECRET not set; sessions will not survive a restart");
            SessionKey::generate()
        }
    };
    tracing::info!(
        public_key = %session_key.public_key_hex(),
        ephemeral = session_key.is_ephemeral(),
        "session signing key ready"
    );
    if config.app_password.is_none() {
        tracing::warn!("APP_PASSWORD not set; login is disabled");
    }

    let db = match config.storage {
        StorageMode::Postgres => Database::connect_lazy(&config.database),
        StorageMode::Memory => {
            tracing::warn!("using in-memory storage; data is lost on exit");
            Database::in_memory()
        }
    };

    let port = config.port;
    let health_interval = config.health_interval;
    let state = AppState::new(config, db, session_key);

    // First check applies migrations if the database is already up.
    let status = state.health.check(&state.db).await;
    tracing::info!(backend = state.db.backend_name(), ?status, "initial database check");
    let monitor = state.health.spawn_monitor(state.db.clone(), health_interval);

    let app = checklist_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("checklist API listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    monitor.abort();
    tracing::info!("shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
