//! Account and role management commands.

use drippss_core::{AppRole, Email};
use drippss_server::config::ServerConfig;
use drippss_server::db::{self, users::UserRepository};
use drippss_server::services::auth::AuthService;

use super::CliError;

/// Create an account and grant it the given role.
///
/// New accounts always get the customer role; an `admin` or `manager` role is
/// granted on top of it.
///
/// # Errors
///
/// Returns `CliError` if the account already exists or the write fails.
pub async fn create(email: &str, password: &str, name: &str, role: AppRole) -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let user = AuthService::new(&pool).register(email, password, name).await?;

    if role != AppRole::Customer {
        UserRepository::new(&pool).grant_role(user.id, role).await?;
    }

    tracing::info!(user_id = %user.id, %role, "Account created");
    Ok(())
}

/// Grant a role to an existing account. Idempotent.
///
/// # Errors
///
/// Returns `CliError::UnknownAccount` if no account has the given email.
pub async fn grant(email: &str, role: AppRole) -> Result<(), CliError> {
    let config = ServerConfig::from_env()?;
    let pool = db::create_pool(&config.database_url).await?;

    let parsed = Email::parse(email)?;
    let repo = UserRepository::new(&pool);
    let user = repo
        .get_by_email(&parsed)
        .await?
        .ok_or_else(|| CliError::UnknownAccount(email.to_owned()))?;

    repo.grant_role(user.id, role).await?;

    tracing::info!(user_id = %user.id, %role, "Role granted");
    Ok(())
}
