//! Order placement and status changes

use rust_decimal::Decimal;
use shared::models::{Coupon, MenuItem, Order, OrderCreate, OrderStatus};
use sqlx::SqlitePool;

use super::lifecycle::{self, LifecycleError};
use crate::auth::CurrentUser;
use crate::db::repository::order::{NewOrder, NewOrderLine};
use crate::db::repository::{coupon, order, special_offer, user};
use crate::pricing::{DiscountError, DiscountSource, MenuCatalog, OrderPricer, to_f64};
use crate::security_log;
use crate::utils::validation::{MAX_NOTE_LEN, validate_optional_text};
use crate::utils::{AppError, AppResult, ErrorCode};

/// Behavior switches for order pricing
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderPolicy {
    /// Clamp `final_amount` at zero
    pub clamp_final_amount: bool,
    /// Reject coupons on orders containing an offer with `allow_coupons = false`
    pub enforce_offer_coupon_gate: bool,
}

/// Place an order for the current user
///
/// Prices come from the catalog and the discount from the coupon code;
/// any client-sent discount is ignored. The order rows and the coupon
/// usage increment commit together.
pub async fn place_order(
    pool: &SqlitePool,
    policy: OrderPolicy,
    current_user: &CurrentUser,
    payload: OrderCreate,
) -> AppResult<Order> {
    if payload.table_number < 1 {
        return Err(AppError::validation("table_number must be a positive number")
            .with_detail("field", "table_number"));
    }
    validate_optional_text(&payload.special_instructions, "special_instructions", MAX_NOTE_LEN)?;

    let customer = user::find_by_id(pool, current_user.id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::UserNotFound))?;

    let resolved = MenuCatalog::new(pool).resolve_lines(&payload.items).await?;
    let (lines, items): (Vec<_>, Vec<_>) = resolved.into_iter().unzip();
    let subtotal = OrderPricer::subtotal(&lines);

    let now = shared::util::now_millis();
    let coupon_code = payload
        .coupon_code
        .as_deref()
        .map(coupon::normalize_code)
        .filter(|code| !code.is_empty());

    let applied = match &coupon_code {
        Some(code) => {
            let found = coupon::find_by_code(pool, code)
                .await?
                .ok_or(DiscountError::NotFound)?;
            let discount = found.resolve(subtotal, now)?;
            if policy.enforce_offer_coupon_gate {
                check_offer_stacking(pool, &items).await?;
            }
            Some((found, discount))
        }
        None => None,
    };

    if let Some(client_discount) = payload.discount {
        tracing::debug!(
            client_discount,
            "Ignoring client-supplied discount, resolving from coupon code"
        );
    }

    let discount = applied.as_ref().map_or(Decimal::ZERO, |(_, d)| *d);
    let quote = OrderPricer::new(policy.clamp_final_amount).quote(subtotal, discount);

    let new_order = NewOrder {
        user_id: customer.id,
        user_name: customer.name.clone(),
        table_number: payload.table_number,
        total_amount: quote.total_f64(),
        coupon_code: applied.as_ref().map(|(c, _)| c.code.clone()),
        discount: quote.discount_f64(),
        final_amount: quote.final_f64(),
        special_instructions: payload
            .special_instructions
            .map(|s| s.trim().to_string())
            .unwrap_or_default(),
        lines: lines
            .iter()
            .map(|line| NewOrderLine {
                menu_item_id: line.menu_item_id,
                name: line.name.clone(),
                quantity: line.quantity,
                price: to_f64(line.unit_price),
            })
            .collect(),
    };

    let order_id = persist(pool, &new_order, applied.as_ref().map(|(c, _)| c)).await?;

    tracing::info!(
        order_id,
        user_id = customer.id,
        table_number = new_order.table_number,
        total = new_order.total_amount,
        discount = new_order.discount,
        final_amount = new_order.final_amount,
        "Order placed"
    );

    Ok(order::require(pool, order_id).await?)
}

/// Insert the order and consume the coupon in one transaction
async fn persist(pool: &SqlitePool, new_order: &NewOrder, coupon: Option<&Coupon>) -> AppResult<i64> {
    let mut tx = pool
        .begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))?;

    let order_id = order::insert(&mut *tx, new_order).await?;

    if let Some(coupon) = coupon
        && !coupon::try_consume(&mut *tx, coupon.id).await?
    {
        // Dropping the transaction rolls the order back
        return Err(DiscountError::UsageExceeded.into());
    }

    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit order: {e}")))?;
    Ok(order_id)
}

/// Fail when any ordered mirror belongs to an offer that forbids coupons
async fn check_offer_stacking(pool: &SqlitePool, items: &[MenuItem]) -> AppResult<()> {
    for item in items.iter().filter(|item| item.is_offer_mirror()) {
        let Some(offer_id) = item.special_offer_id else {
            continue;
        };
        if let Some(offer) = special_offer::find_by_id(pool, offer_id).await?
            && !offer.stacks_with_coupons()
        {
            return Err(AppError::from(DiscountError::NotStackable)
                .with_detail("special_offer_id", offer.id));
        }
    }
    Ok(())
}

/// Fetch an order visible to the current user (owner or admin)
pub async fn get_order(pool: &SqlitePool, current_user: &CurrentUser, id: i64) -> AppResult<Order> {
    let order = order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    if !current_user.can_access(order.user_id) {
        return Err(AppError::forbidden("Not authorized to access this order"));
    }
    Ok(order)
}

/// Cancel an order (owner or admin, only from pending / preparing)
pub async fn cancel_order(pool: &SqlitePool, current_user: &CurrentUser, id: i64) -> AppResult<Order> {
    let order = get_order(pool, current_user, id).await?;
    lifecycle::check_cancel(order.status)?;
    change_status(pool, id, order.status, OrderStatus::Cancelled).await?;

    security_log!(
        "INFO",
        "order_cancelled",
        order_id = id,
        user_id = current_user.id,
        by_admin = current_user.is_admin()
    );
    Ok(order::require(pool, id).await?)
}

/// Admin status change
pub async fn update_status(pool: &SqlitePool, id: i64, status: &str) -> AppResult<Order> {
    let next = lifecycle::parse_status(status)?;
    let order = order::find_by_id(pool, id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound))?;
    lifecycle::check_transition(order.status, next)?;
    change_status(pool, id, order.status, next).await?;

    tracing::info!(order_id = id, from = %order.status, to = %next, "Order status changed");
    Ok(order::require(pool, id).await?)
}

/// Compare-and-set; a concurrent change surfaces as an invalid transition
async fn change_status(
    pool: &SqlitePool,
    id: i64,
    from: OrderStatus,
    to: OrderStatus,
) -> AppResult<()> {
    if order::update_status(pool, id, from, to).await? {
        return Ok(());
    }
    let current = order::require(pool, id).await?.status;
    Err(LifecycleError::InvalidTransition { from: current, to }.into())
}
