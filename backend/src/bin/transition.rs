//! Migration and transition runner.
//!
//! ```text
//! transition migrate   # schema migrations, then data transitions
//! transition run       # data transitions only
//! ```
//!
//! `migrate` suits self-hosted deployments that own their schema; `run`
//! suits managed environments where schema changes ship separately.

use clap::{Parser, Subcommand};
use diesel::pg::PgConnection;
use diesel::Connection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use ortho_config::OrthoConfig;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use backend::config::AppConfig;
use backend::transitions;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[derive(Parser)]
#[command(name = "transition", about = "Run database migrations and transitions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run schema migrations, then data transitions.
    Migrate,
    /// Run data transitions only.
    Run,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load_from_iter([std::ffi::OsString::from("transition")])?;
    let database_url = config
        .database_url
        .as_deref()
        .ok_or("BANNER_DATABASE_URL must be set to run migrations")?;

    let mut conn = PgConnection::establish(database_url)?;

    if matches!(cli.command, Command::Migrate) {
        let applied = conn
            .run_pending_migrations(MIGRATIONS)
            .map_err(|err| format!("running schema migrations: {err}"))?;
        info!(count = applied.len(), "schema migrations applied");
    }

    let applied = transitions::run_pending(&mut conn, &transitions::registry())?;
    info!(count = applied, "data transitions applied");

    Ok(())
}
