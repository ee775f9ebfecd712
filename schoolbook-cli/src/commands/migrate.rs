//! Database migration command

use anyhow::{Context, Result};
use clap::Parser;

use schoolbook_server::db::{migrations, PoolProvider};
use schoolbook_server::DatabaseConfig;

/// Arguments for the migrate command
///
/// Connection settings come from `DATABASE_URL` or the `DB_*` variables.
#[derive(Parser, Debug)]
pub struct MigrateArgs {}

/// Create the schools table if missing
pub async fn run_migrate(_args: MigrateArgs) -> Result<()> {
    let provider = PoolProvider::new(DatabaseConfig::from_env());
    let pool = provider
        .pool()
        .await
        .context("Failed to create database pool")?;

    migrations::run(pool)
        .await
        .context("Failed to run migrations")?;

    println!("schools table ready");
    Ok(())
}
