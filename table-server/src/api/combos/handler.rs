//! Combo handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Combo, ComboCreate, ComboUpdate};

use crate::core::ServerState;
use crate::db::repository::{RepoError, combo};
use crate::utils::validation::{MAX_URL_LEN, validate_bundle, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/combos - active combos
pub async fn list_active(State(state): State<ServerState>) -> AppResult<Json<Vec<Combo>>> {
    Ok(Json(combo::find_active(&state.pool).await?))
}

/// GET /api/combos/all
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<Combo>>> {
    Ok(Json(combo::find_all(&state.pool).await?))
}

/// GET /api/combos/:id
pub async fn get_by_id(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<Combo>> {
    let found = combo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(found))
}

/// POST /api/combos
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ComboCreate>,
) -> AppResult<(StatusCode, Json<Combo>)> {
    validate_bundle(
        &payload.name,
        &payload.description,
        &payload.items,
        payload.original_price,
        payload.combo_price,
        ErrorCode::ComboEmpty,
    )?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let created = combo::create(&state.pool, payload).await?;
    tracing::info!(combo_id = created.id, discount = created.discount, "Combo created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/combos/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<ComboUpdate>,
) -> AppResult<Json<Combo>> {
    let current = combo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    validate_bundle(
        payload.name.as_deref().unwrap_or(&current.name),
        payload.description.as_deref().unwrap_or(&current.description),
        payload.items.as_deref().unwrap_or(&current.items),
        payload.original_price.unwrap_or(current.original_price),
        payload.combo_price.unwrap_or(current.combo_price),
        ErrorCode::ComboEmpty,
    )?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let updated = combo::update(&state.pool, id, payload)
        .await
        .map_err(|e| map_not_found(e, id))?;
    tracing::info!(combo_id = id, "Combo updated");
    Ok(Json(updated))
}

/// PATCH /api/combos/:id/toggle
pub async fn toggle(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<Combo>> {
    let toggled = combo::toggle(&state.pool, id)
        .await
        .map_err(|e| map_not_found(e, id))?;
    tracing::info!(combo_id = id, active = toggled.active, "Combo toggled");
    Ok(Json(toggled))
}

/// DELETE /api/combos/:id
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    combo::delete(&state.pool, id)
        .await
        .map_err(|e| map_not_found(e, id))?;
    tracing::info!(combo_id = id, "Combo deleted");
    Ok(Json(true))
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::ComboNotFound).with_detail("id", id)
}

fn map_not_found(err: RepoError, id: i64) -> AppError {
    match err {
        RepoError::NotFound(_) => not_found(id),
        other => other.into(),
    }
}
