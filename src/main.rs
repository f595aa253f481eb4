//! Skeleton Backend Service
//!
//! A minimal REST service meant to be copied as the starting point for new
//! backends: environment-aware configuration, a layered storage stack, one
//! example endpoint, and a test harness.
//!
//! Startup wires components explicitly in dependency order:
//!
//! ```text
//! CLI args + logging
//!     -> ConfigResolver (explicit args / env vars / {env}.yaml / secrets)
//!     -> Database (SQLite, migrations on open)
//!     -> SqliteHealthCheckRepository
//!     -> HealthService
//!     -> axum server (GET /health)
//! ```

use anyhow::Result;
use clap::Parser;
use serde_json::Map;
use service_skeleton::config::ConfigResolver;
use service_skeleton::db::Database;
use service_skeleton::repository::SqliteHealthCheckRepository;
use service_skeleton::server::{AppState, start_server};
use service_skeleton::service::HealthService;
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

/// Skeleton backend REST service
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory holding per-environment YAML config files
    #[arg(long, default_value = "configs")]
    configs_dir: PathBuf,

    /// Directory holding file-based secrets
    #[arg(long)]
    secrets_dir: Option<PathBuf>,

    /// Port for the HTTP API
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Logging output: 0/off, 1/stdout, 2/stderr (default), or filename
    #[arg(short, long, default_value = "2")]
    log: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on --log option
    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    match cli.log.as_str() {
        "0" | "off" => {
            // No logging
        }
        "1" | "stdout" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stdout)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        "2" | "stderr" => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
        filename => {
            // Log to file (append mode)
            let file = OpenOptions::new().create(true).append(true).open(filename)?;
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_writer(file)
                .with_ansi(false)
                .finish();
            tracing::subscriber::set_global_default(subscriber)?;
        }
    }

    // Resolve configuration before constructing anything else. Any hard
    // config error aborts startup here.
    let mut resolver = ConfigResolver::new().with_configs_dir(&cli.configs_dir);
    if let Some(ref secrets_dir) = cli.secrets_dir {
        resolver = resolver.with_secrets_dir(secrets_dir);
    }
    let config = resolver.resolve(Map::new())?;

    info!(
        name = %config.name,
        database_scheme = %config.database_dsn.scheme(),
        "configuration resolved"
    );

    // Wire components in dependency order
    let db = Database::connect(&config.database_dsn)?;
    let repo = SqliteHealthCheckRepository::new(db);
    let health_service = HealthService::new(Arc::new(repo));
    let state = AppState::new(health_service);

    let handle = start_server(state, cli.port).await?;

    tokio::signal::ctrl_c().await?;
    info!("shutdown signal received");
    handle.shutdown().await;

    Ok(())
}
