//! Authentication handlers

use std::time::Duration;

use axum::{Json, extract::State};

use shared::client::{LoginRequest, LoginResponse, UserInfo};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::users;
use crate::utils::password::verify_password;
use crate::utils::{AppError, AppResponse, ok};

/// Fixed delay applied to every login attempt so response time does
/// not reveal whether the account exists.
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Login handler
///
/// Verifies credentials and returns a bearer token plus the actor's
/// profile. Failures use one unified message to prevent email
/// enumeration.
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<AppResponse<LoginResponse>>, AppError> {
    let email = req.email.trim().to_lowercase();

    let user = users::find_by_email(state.pool(), &email).await?;

    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    let user = match user {
        Some(u) if verify_password(&req.password, &u.hashed_password) => u,
        Some(_) => {
            tracing::warn!(target: "security", email = %email, "login failed: bad password");
            return Err(AppError::invalid_credentials());
        }
        None => {
            tracing::warn!(target: "security", email = %email, "login failed: unknown account");
            return Err(AppError::invalid_credentials());
        }
    };

    let token = state
        .jwt_service
        .generate_token(&user)
        .map_err(|e| AppError::internal(format!("Token generation failed: {e}")))?;

    tracing::info!(target: "security", user_id = %user.id, role = %user.role, "login succeeded");

    Ok(ok(LoginResponse {
        token,
        user: user.into_info(),
    }))
}

/// Current actor, re-read from storage so a deleted account stops
/// resolving even while its token is still valid.
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<AppResponse<UserInfo>>, AppError> {
    let account = users::find_by_id(state.pool(), &user.id)
        .await?
        .ok_or_else(|| AppError::unauthorized())?;
    Ok(ok(account.into_info()))
}
