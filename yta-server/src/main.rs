//! yta-server - Yomitan audio lookup service
//!
//! Serves ranked audio clip lists for (term, reading) lookups over a
//! read-only SQLite catalog.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use yta_common::config::{
    default_config_path, resolve_database_path, resolve_root_folder, TomlConfig,
};
use yta_common::db;
use yta_server::lookup::store::SqliteAudioStore;
use yta_server::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "yta-server")]
#[command(about = "Audio lookup service for Yomitan")]
#[command(version)]
struct Args {
    /// Path to TOML config file
    #[arg(short, long, env = "YTA_CONFIG")]
    config: Option<PathBuf>,

    /// Root folder holding the catalog database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Catalog database path (overrides <root_folder>/entries.db)
    #[arg(short, long, env = "YTA_DATABASE")]
    database: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "YTA_PORT")]
    port: Option<u16>,

    /// Log level directive (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,

    /// Create the catalog database if it does not exist
    #[arg(long)]
    init_db: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Config is read before tracing starts so the log level can come from it;
    // the outcome is logged once the subscriber is up
    let config_path = args.config.clone().or_else(default_config_path);
    let config_result = config_path
        .as_deref()
        .filter(|path| path.exists())
        .map(TomlConfig::load);
    let config = match &config_result {
        Some(Ok(config)) => config.clone(),
        _ => TomlConfig::default(),
    };

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.logging.level.clone());
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_level)),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting yta-server v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match (&config_result, &config_path) {
        (Some(Ok(_)), Some(path)) => info!("Loaded configuration from {}", path.display()),
        (Some(Err(e)), Some(path)) => {
            warn!("Ignoring config file {}: {}", path.display(), e)
        }
        _ => info!("No config file found, using compiled defaults"),
    }

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &config);
    let db_path = resolve_database_path(args.database.as_deref(), &config, &root_folder);
    info!("Database path: {}", db_path.display());

    let pool = if args.init_db {
        db::init_database(&db_path)
            .await
            .context("Failed to initialize database")?
    } else {
        db::connect_readonly(&db_path)
            .await
            .context("Failed to connect to database")?
    };

    let entry_count = db::count_entries(&pool)
        .await
        .context("Failed to read catalog")?;
    info!("✓ Catalog ready ({} entries)", entry_count);

    if config.media_base_url.is_none() {
        warn!("media_base_url not set; /api/audio/list is disabled");
    }

    let store = Arc::new(SqliteAudioStore::new(pool));
    let state = AppState::new(store, config.media_base_url.clone());
    let app = build_router(state);

    let port = args.port.unwrap_or(config.port);
    let addr: SocketAddr = format!("{}:{}", config.host, port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.host, port))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;
    info!("yta-server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
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
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
