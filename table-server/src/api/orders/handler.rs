//! Order handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{Order, OrderCreate, OrderStatusUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::order;
use crate::orders::{lifecycle, service};
use crate::utils::AppResult;

/// POST /api/orders - price server-side and persist as pending
pub async fn create(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Json(payload): Json<OrderCreate>,
) -> AppResult<(StatusCode, Json<Order>)> {
    let placed = service::place_order(
        &state.pool,
        state.config.order_policy,
        &current_user,
        payload,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(placed)))
}

/// GET /api/orders/my-orders - newest first
pub async fn list_mine(
    State(state): State<ServerState>,
    current_user: CurrentUser,
) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_by_user(&state.pool, current_user.id).await?;
    Ok(Json(orders))
}

/// GET /api/orders/:id
pub async fn get_by_id(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let found = service::get_order(&state.pool, &current_user, id).await?;
    Ok(Json(found))
}

/// PATCH /api/orders/:id/cancel
pub async fn cancel(
    State(state): State<ServerState>,
    current_user: CurrentUser,
    Path(id): Path<i64>,
) -> AppResult<Json<Order>> {
    let cancelled = service::cancel_order(&state.pool, &current_user, id).await?;
    Ok(Json(cancelled))
}

/// GET /api/orders - every order, newest first
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<Order>>> {
    let orders = order::find_all(&state.pool).await?;
    Ok(Json(orders))
}

/// GET /api/orders/status/:status
pub async fn list_by_status(
    State(state): State<ServerState>,
    Path(status): Path<String>,
) -> AppResult<Json<Vec<Order>>> {
    let status = lifecycle::parse_status(&status)?;
    let orders = order::find_by_status(&state.pool, status).await?;
    Ok(Json(orders))
}

/// PUT /api/orders/:id/status
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<OrderStatusUpdate>,
) -> AppResult<Json<Order>> {
    let updated = service::update_status(&state.pool, id, &payload.status).await?;
    Ok(Json(updated))
}
