//! Staff account management handlers
//!
//! Every operation here requires the manage-users capability, which
//! only administrators carry.

use axum::{
    Json,
    extract::{Path, State},
};
use uuid::Uuid;

use shared::PermissionKind;
use shared::client::{UserCreate, UserInfo, UserUpdate};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::users;
use crate::utils::password::hash_password;
use crate::utils::validation::{
    MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};
use crate::utils::{AppError, AppResponse, ok, ok_with_message};

/// List all staff accounts
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<AppResponse<Vec<UserInfo>>>, AppError> {
    user.require(PermissionKind::ManageUsers)?;

    let rows = users::list_all(state.pool()).await?;
    Ok(ok(rows.into_iter().map(users::User::into_info).collect()))
}

/// Create a staff account
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(req): Json<UserCreate>,
) -> Result<Json<AppResponse<UserInfo>>, AppError> {
    user.require(PermissionKind::ManageUsers)?;

    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let email = req.email.trim().to_lowercase();

    // Friendly pre-check; the UNIQUE constraint still backstops races
    if users::find_by_email(state.pool(), &email).await?.is_some() {
        return Err(AppError::conflict(
            "An account with this email already exists",
        ));
    }

    let id = Uuid::new_v4().to_string();
    let hashed = hash_password(&req.password)?;
    users::create(
        state.pool(),
        &id,
        req.name.trim(),
        &email,
        &hashed,
        req.role,
        now_millis(),
    )
    .await?;

    tracing::info!(target: "security", user_id = %id, role = %req.role, created_by = %user.id, "account created");

    let account = users::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::internal("Created account not readable"))?;
    Ok(ok_with_message(account.into_info(), "Account created"))
}

/// Update a staff account. A blank or absent `new_password` keeps the
/// stored credential unchanged.
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(req): Json<UserUpdate>,
) -> Result<Json<AppResponse<UserInfo>>, AppError> {
    user.require(PermissionKind::ManageUsers)?;

    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_email(&req.email)?;

    let email = req.email.trim().to_lowercase();

    // Reject taking over another account's email
    if let Some(existing) = users::find_by_email(state.pool(), &email).await?
        && existing.id != id
    {
        return Err(AppError::conflict(
            "An account with this email already exists",
        ));
    }

    let new_password = req
        .new_password
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty());
    let hashed = match new_password {
        Some(p) => {
            validate_password(p)?;
            Some(hash_password(p)?)
        }
        None => None,
    };

    let affected = users::update(
        state.pool(),
        &id,
        req.name.trim(),
        &email,
        req.role,
        hashed.as_deref(),
        now_millis(),
    )
    .await?;
    if affected == 0 {
        return Err(AppError::not_found(format!("Account {id} not found")));
    }

    tracing::info!(
        target: "security",
        user_id = %id,
        updated_by = %user.id,
        password_changed = hashed.is_some(),
        "account updated"
    );

    let account = users::find_by_id(state.pool(), &id)
        .await?
        .ok_or_else(|| AppError::internal("Updated account not readable"))?;
    Ok(ok_with_message(account.into_info(), "Account updated"))
}
