//! dreamcapture - booking API server
//!
//! Startup sequence: load .env, read configuration, open the connection
//! pool, probe connectivity, ensure (or in dev mode reset) the bookings
//! schema, then serve. Any failure before the listener binds aborts the
//! process with a message; the server never accepts traffic against an
//! unreachable database.

use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use dreamcapture_server::config::{AppConfig, RuntimeEnv};
use dreamcapture_server::db::{create_pool, probe, BookingRepo};
use dreamcapture_server::http::{run_server, ServerConfig};

#[derive(Parser, Debug)]
#[command(
    name = "dreamcapture",
    author,
    version,
    about = "Booking API backend for photography session requests"
)]
struct Cli {
    /// Address to bind to (overrides BIND_ADDR)
    #[arg(long, short = 'b')]
    bind: Option<SocketAddr>,

    /// Enable debug logging (unless RUST_LOG is set)
    #[arg(long)]
    debug: bool,
}

/// Initialize tracing with console output.
fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.debug)?;

    // Missing .env is fine; variables may come from the environment itself
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    tracing::info!(env = ?config.env, "configuration loaded");

    let pool = create_pool(&config.db.database_url())
        .await
        .context("failed to create database pool")?;
    probe(&pool)
        .await
        .context("database unreachable, refusing to start")?;

    let repo = BookingRepo::new(&pool);
    if config.env == RuntimeEnv::Development {
        repo.reset_schema()
            .await
            .context("development schema reset failed")?;
    }
    repo.ensure_schema()
        .await
        .context("schema migration failed")?;

    let server_config = ServerConfig {
        bind_addr: cli.bind.unwrap_or(config.bind_addr),
    };

    run_server(pool, server_config).await.context("server error")
}
