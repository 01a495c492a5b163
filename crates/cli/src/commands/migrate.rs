//! Database migration command.

use drippss_server::config::ServerConfig;
use drippss_server::db;

use super::CliError;

/// Run the server's database migrations.
///
/// # Errors
///
/// Returns `CliError` if configuration is missing or a migration fails.
pub async fn run() -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;

    tracing::info!("Connecting to database...");
    let pool = db::create_pool(&config.database_url).await?;

    tracing::info!("Running migrations...");
    sqlx::migrate!("../server/migrations").run(&pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}
