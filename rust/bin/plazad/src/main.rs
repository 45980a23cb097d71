//! `plazad` — the Plaza server binary.
//!
//! Usage:
//!   plazad [--data-dir <dir>] [--sqlite <path>] [--listen <addr>] [--decay-hour <h>]
//!
//! Identity verification happens upstream; every `uid` / `x-user-id`
//! reaching this process is already trusted.

mod routes;

use std::sync::Arc;

use clap::Parser;
use plaza_core::Module;
use tracing::info;

/// Plaza server.
#[derive(Parser, Debug)]
#[command(name = "plazad", about = "Plaza social server")]
struct Cli {
    /// Directory where the server keeps its data files.
    #[arg(long = "data-dir")]
    data_dir: Option<std::path::PathBuf>,

    /// SQLite database path (overrides `{data-dir}/data.sqlite`).
    #[arg(long = "sqlite")]
    sqlite: Option<std::path::PathBuf>,

    /// Listen address.
    #[arg(long = "listen", default_value = "0.0.0.0:8080")]
    listen: String,

    /// UTC hour of the daily trend decay tick.
    #[arg(long = "decay-hour", default_value_t = 0)]
    decay_hour: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = plaza_core::ServiceConfig {
        data_dir: cli.data_dir.clone(),
        sqlite_path: cli.sqlite.clone(),
        listen: cli.listen.clone(),
    };

    if let Some(dir) = &config.data_dir {
        std::fs::create_dir_all(dir)?;
    }

    // Initialize the embedded store.
    let sql: Arc<dyn plaza_sql::SQLStore> = Arc::new(
        plaza_sql::SqliteStore::open(&config.resolve_sqlite_path())
            .map_err(|e| anyhow::anyhow!("failed to open SQL store: {}", e))?,
    );

    let social_module = social::SocialModule::new(Arc::clone(&sql))
        .map_err(|e| anyhow::anyhow!("failed to initialize social module: {}", e))?;
    info!("Social module initialized");

    // Daily trend decay; the same routine backs POST /degrade-posts.
    let decay_guard = social::worker::start(
        Arc::clone(social_module.service()),
        social::worker::DecayConfig {
            hour_utc: cli.decay_hour,
        },
    );

    let module_routes = vec![(social_module.name().to_string(), social_module.routes())];
    let app = routes::build_router(module_routes);

    let listener = tokio::net::TcpListener::bind(&config.listen).await?;
    info!("Plaza server listening on {}", config.listen);
    axum::serve(listener, app).await?;

    decay_guard.cancel();
    Ok(())
}
