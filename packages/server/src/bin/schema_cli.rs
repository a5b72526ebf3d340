//! CLI for managing the auth service schema
//!
//! `migrate` applies the embedded migrations and is always safe to re-run.
//! `reset` drops the schema first and refuses to run without --yes-really;
//! it exists for dev and test databases only.

use anyhow::{Context, Result};
use auth_core::Config;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "schema_cli")]
#[command(about = "Schema management for the auth service database")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations (idempotent)
    Migrate,

    /// Drop all auth service tables and re-apply migrations from scratch
    Reset {
        /// Required confirmation; this destroys all identity records
        #[arg(long = "yes-really")]
        yes_really: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::from_env().context("Failed to load configuration")?;
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Migrate => {
            migrate(&pool).await?;
            println!("migrations applied");
        }
        Commands::Reset { yes_really } => {
            if !yes_really {
                anyhow::bail!(
                    "reset drops all identity records; pass --yes-really to confirm"
                );
            }
            reset(&pool).await?;
            println!("schema reset and migrations re-applied");
        }
    }

    Ok(())
}

async fn migrate(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to run migrations")?;
    Ok(())
}

async fn reset(pool: &PgPool) -> Result<()> {
    sqlx::query("DROP TABLE IF EXISTS users CASCADE")
        .execute(pool)
        .await
        .context("Failed to drop users table")?;
    sqlx::query("DROP TABLE IF EXISTS _sqlx_migrations")
        .execute(pool)
        .await
        .context("Failed to drop migrations ledger")?;
    migrate(pool).await
}
