//! CLI command implementations.

pub mod account;
pub mod migrate;
pub mod seed;

use thiserror::Error;

use drippss_server::config::ConfigError;
use drippss_server::db::RepositoryError;

/// Errors shared by the CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("auth error: {0}")]
    Auth(#[from] drippss_server::services::auth::AuthError),

    #[error("no account with email {0}")]
    UnknownAccount(String),

    #[error("invalid email: {0}")]
    InvalidEmail(#[from] drippss_core::EmailError),
}
