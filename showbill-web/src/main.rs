//! showbill-web - Booking site HTTP service
//!
//! Lists venues and artists and schedules shows between them. Serves the
//! static pages and the JSON data endpoints they consume.

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use showbill_common::config;
use showbill_common::db::{init_database, Store};
use showbill_web::{build_router, AppState};

#[derive(Parser, Debug)]
#[command(name = "showbill-web", about = "Showbill booking site server")]
struct Args {
    /// Database file path (overrides SHOWBILL_DATABASE and the config file)
    #[arg(long)]
    database: Option<String>,

    /// Listen address
    #[arg(long, env = "SHOWBILL_BIND", default_value = config::DEFAULT_BIND)]
    bind: String,

    /// Log at debug level instead of info
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber; RUST_LOG still wins over --debug
    let default_level = if args.debug {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(default_level.into()),
        )
        .init();

    // Log build identification immediately after tracing init
    info!(
        "Starting Showbill (showbill-web) v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let db_path = config::resolve_database_path(args.database.as_deref());
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Connected to database");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let state = AppState::new(Store::new(pool));
    let app = build_router(state);

    let addr = config::resolve_bind_addr(&args.bind);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("showbill-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
