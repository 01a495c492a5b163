//! Authentication routes.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use drippss_core::AppRole;

use crate::error::{AppError, Result};
use crate::middleware::{RequireAuth, auth};
use crate::models::CurrentUser;
use crate::services::auth::AuthService;
use crate::state::AppState;

/// Body for `POST /auth/register`.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub full_name: String,
}

/// Body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// The logged-in user's identity and roles.
#[derive(Debug, Serialize)]
pub struct SessionUser {
    pub id: drippss_core::UserId,
    pub email: String,
    pub roles: Vec<AppRole>,
    pub is_staff: bool,
}

async fn session_user(state: &AppState, user: &CurrentUser) -> Result<SessionUser> {
    let roles = AuthService::new(state.pool()).roles(user.id).await?;
    Ok(SessionUser {
        id: user.id,
        email: user.email.clone(),
        is_staff: roles.is_staff(),
        roles: roles.iter().collect(),
    })
}

/// `POST /auth/register` - create an account and log it in.
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<SessionUser>)> {
    let service = AuthService::new(state.pool());
    let user = service
        .register(&form.email, &form.password, &form.full_name)
        .await?;

    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
    };
    auth::set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to start session: {e}")))?;

    state.dashboard_cache().invalidate();
    tracing::info!(user_id = %user.id, "New account registered");

    Ok((StatusCode::CREATED, Json(session_user(&state, &current).await?)))
}

/// `POST /auth/login` - sign in with email and password.
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<LoginForm>,
) -> Result<Json<SessionUser>> {
    let service = AuthService::new(state.pool());
    let user = service.login(&form.email, &form.password).await?;

    // Rotate the session ID on login.
    session
        .cycle_id()
        .await
        .map_err(|e| AppError::Internal(format!("failed to rotate session: {e}")))?;

    let current = CurrentUser {
        id: user.id,
        email: user.email.clone(),
    };
    auth::set_current_user(&session, &current)
        .await
        .map_err(|e| AppError::Internal(format!("failed to start session: {e}")))?;

    Ok(Json(session_user(&state, &current).await?))
}

/// `POST /auth/logout` - sign out. The cart stays in the session.
pub async fn logout(session: Session) -> Result<StatusCode> {
    auth::clear_current_user(&session)
        .await
        .map_err(|e| AppError::Internal(format!("failed to end session: {e}")))?;
    Ok(StatusCode::NO_CONTENT)
}

/// `GET /auth/me` - the logged-in user and their roles.
pub async fn me(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<SessionUser>> {
    Ok(Json(session_user(&state, &user).await?))
}
