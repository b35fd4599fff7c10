//! rusved: the Rusve daemon.
//!
//! Serves `UsersService`, `UtilsService` and `NotesService` over gRPC,
//! backed by the in-process memory store.

use std::net::SocketAddr;

use clap::Parser;
use tonic::transport::Server;
use tracing::info;

use rusve::server::Routers;
use rusve::server::config::Config;
use rusve::{MemoryStore, Rusve, RusveError};

/// Rusve daemon serving users, files and notes.
#[derive(Parser)]
#[command(name = "rusved")]
#[command(version = rusve::PKG_VERSION)]
#[command(about = "Rusve users, files and notes daemon")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long)]
    config: Option<std::path::PathBuf>,

    /// Address to bind to, overriding the configuration file.
    #[arg(short, long, env = "RUSVED_ADDRESS")]
    address: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialise tracing (default: info for the daemon; override with RUST_LOG).
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Load configuration
    let mut config = Config::load(args.config.as_deref())?;
    if let Some(address) = args.address {
        config.server.address = address;
    }

    // Parse address
    let addr: SocketAddr = config
        .server
        .address
        .parse()
        .map_err(|e| RusveError::Configuration(format!("Invalid address: {e}")))?;

    let services = config
        .apply(Rusve::builder().memory(MemoryStore::new()))
        .build()?;
    let routers = Routers::from(services);

    info!(version = rusve::version_string(), %addr, "rusved starting");

    let limits = &config.server.limits;
    Server::builder()
        .concurrency_limit_per_connection(limits.max_concurrent_requests)
        .timeout(limits.request_timeout())
        .add_service(routers.users)
        .add_service(routers.utils)
        .add_service(routers.notes)
        .serve_with_shutdown(addr, shutdown_signal())
        .await?;

    info!("rusved stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}
