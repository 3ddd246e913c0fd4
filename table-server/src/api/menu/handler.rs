//! Menu item handlers
//!
//! Offer mirror items are read-only here; they change only through the
//! special offer endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Serialize;
use shared::models::{MenuItem, MenuItemCreate, MenuItemUpdate};

use crate::core::ServerState;
use crate::db::repository::RepoError;
use crate::db::repository::menu_item::{self, DeleteOutcome};
use crate::pricing::MenuCatalog;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, MAX_URL_LEN, validate_optional_text, validate_positive_amount,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/menu - available items, by category then name
pub async fn list_available(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = MenuCatalog::new(&state.pool).list_available().await?;
    Ok(Json(items))
}

/// GET /api/menu/all - every item including hidden ones
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<MenuItem>>> {
    let items = MenuCatalog::new(&state.pool).list_all().await?;
    Ok(Json(items))
}

/// GET /api/menu/:id - hidden items read as missing
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuItem>> {
    let item = MenuCatalog::new(&state.pool)
        .lookup_available(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(item))
}

/// POST /api/menu
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<MenuItemCreate>,
) -> AppResult<(StatusCode, Json<MenuItem>)> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.description, "description", MAX_NOTE_LEN)?;
    validate_price(payload.price)?;
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    let item = menu_item::create(&state.pool, payload).await?;
    tracing::info!(menu_item_id = item.id, name = %item.name, "Menu item created");
    Ok((StatusCode::CREATED, Json(item)))
}

/// PUT /api/menu/:id
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<MenuItemUpdate>,
) -> AppResult<Json<MenuItem>> {
    if let Some(name) = &payload.name {
        validate_required_text(name, "name", MAX_NAME_LEN)?;
    }
    if let Some(description) = &payload.description {
        validate_required_text(description, "description", MAX_NOTE_LEN)?;
    }
    if let Some(price) = payload.price {
        validate_price(price)?;
    }
    validate_optional_text(&payload.image, "image", MAX_URL_LEN)?;

    ensure_not_mirror(&state, id).await?;
    let item = menu_item::update(&state.pool, id, payload)
        .await
        .map_err(|e| map_not_found(e, id))?;
    tracing::info!(menu_item_id = id, "Menu item updated");
    Ok(Json(item))
}

#[derive(Debug, Serialize)]
pub struct MenuDeleteResponse {
    pub id: i64,
    /// Still referenced by past orders, so only marked unavailable
    pub hidden: bool,
}

/// DELETE /api/menu/:id - hides instead of deleting when ordered before
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<MenuDeleteResponse>> {
    ensure_not_mirror(&state, id).await?;
    let outcome = menu_item::delete(&state.pool, id)
        .await
        .map_err(|e| map_not_found(e, id))?;
    let hidden = outcome == DeleteOutcome::Hidden;
    tracing::info!(menu_item_id = id, hidden, "Menu item deleted");
    Ok(Json(MenuDeleteResponse { id, hidden }))
}

fn validate_price(price: f64) -> AppResult<()> {
    validate_positive_amount(price, "price")
        .map_err(|e| AppError::with_message(ErrorCode::MenuItemInvalidPrice, e.message))
}

async fn ensure_not_mirror(state: &ServerState, id: i64) -> AppResult<()> {
    let item = MenuCatalog::new(&state.pool)
        .lookup(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    if item.is_offer_mirror() {
        return Err(AppError::new(ErrorCode::MenuItemOwnedByOffer)
            .with_detail("special_offer_id", item.special_offer_id));
    }
    Ok(())
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::MenuItemNotFound).with_detail("id", id)
}

fn map_not_found(err: RepoError, id: i64) -> AppError {
    match err {
        RepoError::NotFound(_) => not_found(id),
        other => other.into(),
    }
}
