//! First-admin bootstrap
//!
//! The only count-guarded operation in the system: creating the very
//! first administrator, callable without a session but rejected the
//! moment any admin row exists. The guard lives inside the INSERT
//! statement so two concurrent calls can never both succeed.

use axum::{Json, extract::State};
use uuid::Uuid;

use shared::client::{AdminExistsResponse, SetupAdminRequest, UserInfo};
use shared::util::now_millis;

use crate::core::ServerState;
use crate::db::users;
use crate::utils::password::hash_password;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResponse, ok, ok_with_message};

/// Probe whether the bootstrap window is still open
pub async fn check_admin(
    State(state): State<ServerState>,
) -> Result<Json<AppResponse<AdminExistsResponse>>, AppError> {
    let admin_exists = users::admin_exists(state.pool()).await?;
    Ok(ok(AdminExistsResponse { admin_exists }))
}

/// Create the bootstrap administrator
pub async fn setup_admin(
    State(state): State<ServerState>,
    Json(req): Json<SetupAdminRequest>,
) -> Result<Json<AppResponse<UserInfo>>, AppError> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let email = req.email.trim().to_lowercase();
    let id = Uuid::new_v4().to_string();
    let hashed = hash_password(&req.password)?;

    let inserted = users::create_admin_if_none(
        state.pool(),
        &id,
        req.name.trim(),
        &email,
        &hashed,
        now_millis(),
    )
    .await?;
    if !inserted {
        tracing::warn!(target: "security", email = %email, "bootstrap rejected: admin already exists");
        return Err(AppError::conflict("An administrator account already exists"));
    }

    tracing::info!(target: "security", user_id = %id, "bootstrap administrator created");

    let account = users::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::internal("Created account not readable"))?;
    Ok(ok_with_message(account.into_info(), "Administrator created"))
}
