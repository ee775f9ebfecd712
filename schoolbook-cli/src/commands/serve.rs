//! HTTP server command
//!
//! Runs the schoolbook HTTP server: school routes, health check, and the
//! public directory as static files.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use schoolbook_server::db::{migrations, PoolProvider, SchoolRepo};
use schoolbook_server::http::server::DEFAULT_MAX_UPLOAD_BYTES;
use schoolbook_server::http::{run_server, AppState, ServerConfig};
use schoolbook_server::{DatabaseConfig, ImageStore};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "SCHOOLBOOK_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Directory served as static files; images are stored under schoolImages/
    #[arg(long, env = "SCHOOLBOOK_PUBLIC_DIR", default_value = "public")]
    pub public_dir: PathBuf,

    /// Maximum request body size in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    pub max_upload_bytes: usize,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Create the schools table before serving
    #[arg(long)]
    pub migrate: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let pools = Arc::new(PoolProvider::new(DatabaseConfig::from_env()));

    // Otherwise the first request opens the pool
    if args.migrate {
        let pool = pools
            .pool()
            .await
            .context("Failed to create database pool")?;
        migrations::run(pool)
            .await
            .context("Failed to run migrations")?;
        tracing::info!("Migrations applied");
    }

    tracing::info!("Starting schoolbook server on {}", args.bind);

    let state = AppState::new(
        Arc::new(SchoolRepo::new(pools.clone())),
        ImageStore::new(args.public_dir),
    )
    .with_pools(pools);
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        max_upload_bytes: args.max_upload_bytes,
    };

    // Blocks until shutdown
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
