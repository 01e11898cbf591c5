//! Apply pending schema migrations to the configured database.
//!
//! Reads `PersistenceSettings` from flags, `PROFILES_*` environment variables
//! and configuration files, then applies the embedded migrations.

use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use profiles::outbound::persistence::run_migrations;
use profiles::settings::PersistenceSettings;

fn main() -> Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings =
        PersistenceSettings::load().map_err(|error| eyre!("failed to load settings: {error}"))?;
    let target = settings.to_pool_config()?;
    info!(database = %target.redacted_url(), "applying migrations");

    let applied = run_migrations(target.database_url()).wrap_err("schema migration failed")?;
    if applied.is_empty() {
        info!("schema already up to date");
    } else {
        info!(versions = ?applied, "schema migrated");
    }
    Ok(())
}
