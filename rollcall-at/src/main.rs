//! rollcall-at (Attendance Tracker) - check-in and enrollee admin service
//!
//! Stores enrollee records, validates national identity numbers,
//! records attendance check-ins, and serves the administrative
//! read/update API.

use anyhow::Result;
use clap::Parser;
use rollcall_common::{config, db::init_database};
use rollcall_at::{build_router, AppState};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "rollcall-at", version, about = "Rollcall attendance tracker service")]
struct Args {
    /// Data folder holding the database and seed file
    /// (falls back to ROLLCALL_DATA, config.toml, then the OS default)
    #[arg(long)]
    data_folder: Option<String>,

    /// HTTP listen port
    #[arg(long, env = "ROLLCALL_PORT", default_value_t = 5850)]
    port: u16,

    /// Enrollee seed CSV (defaults to <data folder>/enrollees.csv)
    #[arg(long, env = "ROLLCALL_SEED")]
    seed: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting Rollcall Attendance Tracker (rollcall-at) v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();

    let data_folder = config::resolve_data_folder(args.data_folder.as_deref(), "ROLLCALL_DATA");
    config::ensure_data_folder(&data_folder)?;

    let db_path = config::database_path(&data_folder);
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path).await?;

    // One-time seeding; a bad or missing seed file must not keep the
    // service from starting
    let seed_path = args.seed.unwrap_or_else(|| data_folder.join("enrollees.csv"));
    if seed_path.exists() {
        match rollcall_at::import::seed_from_csv(&pool, &seed_path).await {
            Ok(summary) => info!(
                "Seeded enrollees from {}: {} inserted, {} skipped",
                seed_path.display(),
                summary.inserted,
                summary.skipped
            ),
            Err(e) => warn!("Enrollee seeding failed, continuing: {}", e),
        }
    }

    let state = AppState::new(pool);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", args.port)).await?;
    info!("rollcall-at listening on http://127.0.0.1:{}", args.port);
    info!("Health check: http://127.0.0.1:{}/health", args.port);

    axum::serve(listener, app).await?;

    Ok(())
}
