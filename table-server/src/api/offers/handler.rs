//! Special offer handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{ReconcileReport, SpecialOffer, SpecialOfferCreate, SpecialOfferUpdate};

use crate::core::ServerState;
use crate::db::repository::special_offer;
use crate::offers::{self, service};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/special-offers - active offers
pub async fn list_active(State(state): State<ServerState>) -> AppResult<Json<Vec<SpecialOffer>>> {
    Ok(Json(special_offer::find_active(&state.pool).await?))
}

/// GET /api/special-offers/all
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<SpecialOffer>>> {
    Ok(Json(special_offer::find_all(&state.pool).await?))
}

/// GET /api/special-offers/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SpecialOffer>> {
    let offer = special_offer::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::SpecialOfferNotFound).with_detail("id", id))?;
    Ok(Json(offer))
}

/// POST /api/special-offers - also creates the mirror menu item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<SpecialOfferCreate>,
) -> AppResult<(StatusCode, Json<SpecialOffer>)> {
    let offer = service::create(&state.pool, payload).await?;
    Ok((StatusCode::CREATED, Json(offer)))
}

/// PUT /api/special-offers/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<SpecialOfferUpdate>,
) -> AppResult<Json<SpecialOffer>> {
    Ok(Json(service::update(&state.pool, id, payload).await?))
}

/// PATCH /api/special-offers/:id/toggle
pub async fn toggle(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<SpecialOffer>> {
    Ok(Json(service::toggle(&state.pool, id).await?))
}

/// DELETE /api/special-offers/:id
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    service::delete(&state.pool, id).await?;
    Ok(Json(true))
}

/// POST /api/special-offers/reconcile - repair offer / mirror drift
pub async fn reconcile(State(state): State<ServerState>) -> AppResult<Json<ReconcileReport>> {
    let report = offers::reconcile(&state.pool).await?;
    tracing::info!(
        created = report.created,
        relinked = report.relinked,
        resynced = report.resynced,
        orphans_removed = report.orphans_removed,
        "Special offer reconciliation requested"
    );
    Ok(Json(report))
}
