//! Coupon handlers

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::models::{
    ActiveCoupon, Coupon, CouponCreate, CouponSummary, CouponUpdate, CouponValidateRequest,
    CouponValidateResponse, DiscountType,
};

use crate::core::ServerState;
use crate::db::repository::{RepoError, coupon};
use crate::pricing::{DiscountError, DiscountSource, OrderPricer, to_decimal};
use crate::utils::validation::{
    MAX_CODE_LEN, MAX_NAME_LEN, validate_non_negative_amount, validate_positive_amount,
    validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

/// GET /api/coupons/active - usable now, usage counter hidden
pub async fn list_active(State(state): State<ServerState>) -> AppResult<Json<Vec<ActiveCoupon>>> {
    let coupons = coupon::find_active(&state.pool, shared::util::now_millis()).await?;
    Ok(Json(coupons.into_iter().map(ActiveCoupon::from).collect()))
}

/// POST /api/coupons/validate
///
/// Read-only: usage is consumed when an order is placed.
pub async fn validate(
    State(state): State<ServerState>,
    Json(req): Json<CouponValidateRequest>,
) -> AppResult<Json<CouponValidateResponse>> {
    validate_non_negative_amount(req.order_amount, "order_amount")?;

    let found = coupon::find_by_code(&state.pool, &req.code)
        .await?
        .ok_or(DiscountError::NotFound)?;

    let subtotal = to_decimal(req.order_amount);
    let discount = found.resolve(subtotal, shared::util::now_millis())?;
    let quote = OrderPricer::new(state.config.order_policy.clamp_final_amount).quote(subtotal, discount);

    Ok(Json(CouponValidateResponse {
        valid: true,
        coupon: CouponSummary {
            code: found.code,
            description: found.description,
            discount_type: found.discount_type,
            discount_value: found.discount_value,
        },
        discount: quote.discount_f64(),
        final_amount: quote.final_f64(),
    }))
}

/// GET /api/coupons
pub async fn list_all(State(state): State<ServerState>) -> AppResult<Json<Vec<Coupon>>> {
    let coupons = coupon::find_all(&state.pool).await?;
    Ok(Json(coupons))
}

/// POST /api/coupons - code stored upper-case
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CouponCreate>,
) -> AppResult<(StatusCode, Json<Coupon>)> {
    check_coupon(&CouponFields {
        code: &payload.code,
        description: &payload.description,
        discount_type: payload.discount_type,
        discount_value: payload.discount_value,
        max_discount: payload.max_discount,
        min_order_amount: payload.min_order_amount.unwrap_or(0.0),
        valid_from: payload.valid_from,
        valid_until: payload.valid_until,
        usage_limit: payload.usage_limit,
    })?;

    let created = coupon::create(&state.pool, payload)
        .await
        .map_err(map_repo_error)?;
    tracing::info!(coupon_id = created.id, code = %created.code, "Coupon created");
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /api/coupons/:id - the merged result must still be a valid coupon
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<CouponUpdate>,
) -> AppResult<Json<Coupon>> {
    let current = coupon::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    check_coupon(&CouponFields {
        code: payload.code.as_deref().unwrap_or(&current.code),
        description: payload.description.as_deref().unwrap_or(&current.description),
        discount_type: payload.discount_type.unwrap_or(current.discount_type),
        discount_value: payload.discount_value.unwrap_or(current.discount_value),
        max_discount: payload.max_discount.or(current.max_discount),
        min_order_amount: payload.min_order_amount.unwrap_or(current.min_order_amount),
        valid_from: payload.valid_from.unwrap_or(current.valid_from),
        valid_until: payload.valid_until.unwrap_or(current.valid_until),
        usage_limit: payload.usage_limit.or(current.usage_limit),
    })?;

    let updated = coupon::update(&state.pool, id, payload)
        .await
        .map_err(|e| match e {
            RepoError::NotFound(_) => not_found(id),
            other => map_repo_error(other),
        })?;
    tracing::info!(coupon_id = id, "Coupon updated");
    Ok(Json(updated))
}

/// DELETE /api/coupons/:id
pub async fn delete(State(state): State<ServerState>, Path(id): Path<i64>) -> AppResult<Json<bool>> {
    coupon::delete(&state.pool, id).await.map_err(|e| match e {
        RepoError::NotFound(_) => not_found(id),
        other => other.into(),
    })?;
    tracing::info!(coupon_id = id, "Coupon deleted");
    Ok(Json(true))
}

/// POST /api/coupons/:id/use - consume one use outside of an order
pub async fn record_usage(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Coupon>> {
    coupon::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    let mut conn = state
        .pool
        .acquire()
        .await
        .map_err(|e| AppError::database(format!("Failed to acquire connection: {e}")))?;
    if !coupon::try_consume(&mut *conn, id).await? {
        return Err(DiscountError::UsageExceeded.into());
    }
    drop(conn);

    let updated = coupon::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(coupon_id = id, used_count = updated.used_count, "Coupon usage recorded");
    Ok(Json(updated))
}

/// Coupon fields after defaults / merge, for validation
struct CouponFields<'a> {
    code: &'a str,
    description: &'a str,
    discount_type: DiscountType,
    discount_value: f64,
    max_discount: Option<f64>,
    min_order_amount: f64,
    valid_from: i64,
    valid_until: i64,
    usage_limit: Option<i64>,
}

fn check_coupon(c: &CouponFields<'_>) -> AppResult<()> {
    validate_required_text(c.code, "code", MAX_CODE_LEN)?;
    validate_required_text(c.description, "description", MAX_NAME_LEN)?;
    validate_positive_amount(c.discount_value, "discount_value")?;
    if c.discount_type == DiscountType::Percentage && c.discount_value > 100.0 {
        return Err(AppError::with_message(
            ErrorCode::ValueOutOfRange,
            "Percentage discount cannot exceed 100",
        )
        .with_detail("field", "discount_value"));
    }
    // Fixed coupons drop max_discount on write
    if c.discount_type == DiscountType::Percentage
        && let Some(cap) = c.max_discount
    {
        validate_positive_amount(cap, "max_discount")?;
    }
    validate_non_negative_amount(c.min_order_amount, "min_order_amount")?;
    if c.valid_until <= c.valid_from {
        return Err(AppError::validation("valid_until must be after valid_from")
            .with_detail("field", "valid_until"));
    }
    if let Some(limit) = c.usage_limit
        && limit < 1
    {
        return Err(AppError::validation("usage_limit must be at least 1")
            .with_detail("field", "usage_limit"));
    }
    Ok(())
}

fn map_repo_error(err: RepoError) -> AppError {
    match err {
        RepoError::Duplicate(_) => AppError::new(ErrorCode::CouponCodeExists),
        other => other.into(),
    }
}

fn not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::CouponNotFound).with_detail("id", id)
}
