//! Tutor record handlers
//!
//! All mutations check the actor's permission before the competency
//! encoding runs or any row is touched. The public registration
//! handler is the single ungated write: it stores no attribution.

use axum::{
    Json,
    extract::{Path, Query, State},
};

use shared::PermissionKind;
use shared::client::{RepetiteurPayload, RepetiteurQuery, RepetiteurResponse};
use shared::util::now_millis;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repetiteurs;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResponse, ok, ok_with_message};

fn validate_payload(data: &RepetiteurPayload) -> Result<(), AppError> {
    validate_required_text(&data.nom, "nom", MAX_NAME_LEN)?;
    validate_required_text(&data.prenom, "prenom", MAX_NAME_LEN)?;
    validate_required_text(&data.telephone, "telephone", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.ville, "ville", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.departement, "departement", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&data.diplome, "diplome", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.email, "email", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&data.photo_url, "photo_url", MAX_URL_LEN)?;
    if let Some(statut) = &data.statut
        && statut != "Actif"
        && statut != "Suspendu"
    {
        return Err(AppError::validation("statut must be Actif or Suspendu"));
    }
    Ok(())
}

/// List tutors with optional filters
pub async fn list(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Query(filter): Query<RepetiteurQuery>,
) -> Result<Json<AppResponse<Vec<RepetiteurResponse>>>, AppError> {
    let rows = repetiteurs::search(state.pool(), &filter).await?;
    Ok(ok(rows
        .into_iter()
        .map(repetiteurs::Repetiteur::into_response)
        .collect()))
}

/// Tutor detail, stored encoding decoded alongside
pub async fn get_by_id(
    State(state): State<ServerState>,
    _user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<AppResponse<RepetiteurResponse>>, AppError> {
    let row = repetiteurs::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Répétiteur {id} not found")))?;
    Ok(ok(row.into_response()))
}

/// Staff create (attributed to the actor)
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(data): Json<RepetiteurPayload>,
) -> Result<Json<AppResponse<RepetiteurResponse>>, AppError> {
    user.require(PermissionKind::Create)?;
    validate_payload(&data)?;

    let encoded = data.competences.clone().normalize().encode();
    let id = repetiteurs::create(state.pool(), &data, &encoded, Some(&user.id), now_millis())
        .await?;

    tracing::info!(repetiteur_id = id, created_by = %user.id, "répétiteur created");

    let row = repetiteurs::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::internal("Created record not readable"))?;
    Ok(ok_with_message(row.into_response(), "Répétiteur created"))
}

/// Public self-registration: no session required, no attribution
pub async fn public_register(
    State(state): State<ServerState>,
    Json(data): Json<RepetiteurPayload>,
) -> Result<Json<AppResponse<RepetiteurResponse>>, AppError> {
    validate_payload(&data)?;

    let encoded = data.competences.clone().normalize().encode();
    let id = repetiteurs::create(state.pool(), &data, &encoded, None, now_millis()).await?;

    tracing::info!(repetiteur_id = id, "public registration received");

    let row = repetiteurs::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::internal("Created record not readable"))?;
    Ok(ok_with_message(row.into_response(), "Inscription received"))
}

/// Full update of a tutor record
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
    Json(data): Json<RepetiteurPayload>,
) -> Result<Json<AppResponse<RepetiteurResponse>>, AppError> {
    user.require(PermissionKind::Edit)?;
    validate_payload(&data)?;

    let encoded = data.competences.clone().normalize().encode();
    let affected =
        repetiteurs::update(state.pool(), id, &data, &encoded, &user.id, now_millis()).await?;
    if affected == 0 {
        return Err(AppError::not_found(format!("Répétiteur {id} not found")));
    }

    tracing::info!(repetiteur_id = id, updated_by = %user.id, "répétiteur updated");

    let row = repetiteurs::find_by_id(state.pool(), id)
        .await?
        .ok_or_else(|| AppError::internal("Updated record not readable"))?;
    Ok(ok_with_message(row.into_response(), "Répétiteur updated"))
}

/// Remove a tutor record
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<AppResponse<()>>, AppError> {
    user.require(PermissionKind::Delete)?;

    let affected = repetiteurs::delete(state.pool(), id).await?;
    if affected == 0 {
        return Err(AppError::not_found(format!("Répétiteur {id} not found")));
    }

    tracing::info!(repetiteur_id = id, deleted_by = %user.id, "répétiteur deleted");

    Ok(ok_with_message((), "Répétiteur deleted"))
}
