//! schoolbook CLI - school directory server and client
//!
//! Subcommands:
//! - `serve`: run the HTTP API and static file server
//! - `migrate`: create the `schools` table
//! - `add`: validate a school locally and submit it
//! - `list`: show every school, newest first

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "schoolbook",
    author,
    version,
    about = "School directory: submit schools with an image and browse them"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run HTTP API server (school routes, health, public files)
    Serve(commands::serve::ServeArgs),
    /// Create the schools table if it does not exist
    Migrate(commands::migrate::MigrateArgs),
    /// Validate and submit a new school
    Add(commands::add::AddArgs),
    /// List all schools, newest first
    List(commands::list::ListArgs),
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing().ok();
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(args).await?,
        Commands::Migrate(args) => commands::run_migrate(args).await?,
        Commands::Add(args) => commands::run_add(args).await?,
        Commands::List(args) => commands::run_list(args).await?,
    }

    Ok(())
}
