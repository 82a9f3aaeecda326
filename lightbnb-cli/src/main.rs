//! lightbnb CLI - operator access to the LightBnB database
//!
//! Every subcommand maps onto one data access operation and prints its
//! result as JSON on stdout:
//! - `user` (lookup by email or id, create)
//! - `reservations` (a guest's reservations)
//! - `properties` (filtered search)
//! - `property` (lookup by id, create from JSON)

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lightbnb_db::{DbConfig, PgStore};

mod commands;
mod tracing_setup;

use commands::Outcome;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "lightbnb",
    author,
    version,
    about = "Query and update the LightBnB vacation-rental database"
)]
struct Cli {
    /// TOML config file (default: ~/.lightbnb/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// PostgreSQL connection URL (overrides config file and PG* variables)
    #[arg(long, env = "DATABASE_URL", global = true, hide_env_values = true)]
    database_url: Option<String>,

    /// Enable debug logging, including generated search SQL
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Look up or create users
    User(commands::user::UserArgs),
    /// List a guest's reservations, earliest first
    Reservations(commands::reservations::ReservationsArgs),
    /// Search properties, cheapest first
    Properties(commands::properties::SearchArgs),
    /// Show or create a single property
    Property(commands::properties::PropertyArgs),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(err) = tracing_setup::init_tracing(&TracingConfig { debug: cli.debug }) {
        eprintln!("warning: tracing not initialized: {err}");
    }

    match run(cli).await {
        Ok(outcome) => outcome.report(),
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Outcome> {
    let mut config =
        DbConfig::load(cli.config.as_deref()).context("failed to load database configuration")?;
    if let Some(url) = cli.database_url {
        config.url = Some(url);
    }
    tracing::debug!(?config, "resolved database configuration");

    let store = PgStore::connect(&config)
        .await
        .context("failed to connect to database")?;

    let outcome = match cli.command {
        Commands::User(args) => commands::user::run(&store, args).await,
        Commands::Reservations(args) => commands::reservations::run(&store, args).await,
        Commands::Properties(args) => commands::properties::search(&store, args).await,
        Commands::Property(args) => commands::properties::run(&store, args).await,
    };

    store.close().await;
    outcome
}
