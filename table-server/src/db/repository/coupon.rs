//! Coupon Repository

use super::{RepoError, RepoResult};
use shared::models::{Coupon, CouponCreate, CouponUpdate, DiscountType};
use sqlx::{SqliteConnection, SqlitePool};

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Coupon>> {
    let coupons = sqlx::query_as::<_, Coupon>(
        "SELECT id, code, description, discount_type, discount_value, max_discount, min_order_amount, valid_from, valid_until, usage_limit, used_count, active, created_at, updated_at FROM coupon ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(coupons)
}

/// Coupons usable at `now`: active, inside the window, not exhausted
pub async fn find_active(pool: &SqlitePool, now: i64) -> RepoResult<Vec<Coupon>> {
    let coupons = sqlx::query_as::<_, Coupon>(
        "SELECT id, code, description, discount_type, discount_value, max_discount, min_order_amount, valid_from, valid_until, usage_limit, used_count, active, created_at, updated_at FROM coupon WHERE active = 1 AND valid_from <= ?1 AND valid_until >= ?1 AND (usage_limit IS NULL OR used_count < usage_limit) ORDER BY valid_until",
    )
    .bind(now)
    .fetch_all(pool)
    .await?;
    Ok(coupons)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Coupon>> {
    let coupon = sqlx::query_as::<_, Coupon>(
        "SELECT id, code, description, discount_type, discount_value, max_discount, min_order_amount, valid_from, valid_until, usage_limit, used_count, active, created_at, updated_at FROM coupon WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(coupon)
}

/// Case-insensitive code lookup
pub async fn find_by_code(pool: &SqlitePool, code: &str) -> RepoResult<Option<Coupon>> {
    let coupon = sqlx::query_as::<_, Coupon>(
        "SELECT id, code, description, discount_type, discount_value, max_discount, min_order_amount, valid_from, valid_until, usage_limit, used_count, active, created_at, updated_at FROM coupon WHERE code = ? LIMIT 1",
    )
    .bind(normalize_code(code))
    .fetch_optional(pool)
    .await?;
    Ok(coupon)
}

pub async fn create(pool: &SqlitePool, data: CouponCreate) -> RepoResult<Coupon> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    let max_discount = match data.discount_type {
        DiscountType::Percentage => data.max_discount,
        DiscountType::Fixed => None,
    };
    sqlx::query(
        "INSERT INTO coupon (id, code, description, discount_type, discount_value, max_discount, min_order_amount, valid_from, valid_until, usage_limit, used_count, active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, 0, ?11, ?12, ?12)",
    )
    .bind(id)
    .bind(normalize_code(&data.code))
    .bind(&data.description)
    .bind(data.discount_type)
    .bind(data.discount_value)
    .bind(max_discount)
    .bind(data.min_order_amount.unwrap_or(0.0))
    .bind(data.valid_from)
    .bind(data.valid_until)
    .bind(data.usage_limit)
    .bind(data.active.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create coupon".into()))
}

/// Partial update; switching to a fixed coupon clears `max_discount`
pub async fn update(pool: &SqlitePool, id: i64, data: CouponUpdate) -> RepoResult<Coupon> {
    let rows = sqlx::query(
        "UPDATE coupon SET code = COALESCE(?1, code), description = COALESCE(?2, description), discount_type = COALESCE(?3, discount_type), discount_value = COALESCE(?4, discount_value), max_discount = CASE WHEN COALESCE(?3, discount_type) = 'fixed' THEN NULL ELSE COALESCE(?5, max_discount) END, min_order_amount = COALESCE(?6, min_order_amount), valid_from = COALESCE(?7, valid_from), valid_until = COALESCE(?8, valid_until), usage_limit = COALESCE(?9, usage_limit), active = COALESCE(?10, active), updated_at = ?11 WHERE id = ?12",
    )
    .bind(data.code.as_deref().map(normalize_code))
    .bind(data.description)
    .bind(data.discount_type)
    .bind(data.discount_value)
    .bind(data.max_discount)
    .bind(data.min_order_amount)
    .bind(data.valid_from)
    .bind(data.valid_until)
    .bind(data.usage_limit)
    .bind(data.active)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Coupon {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Coupon {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM coupon WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Coupon {id} not found")));
    }
    Ok(())
}

/// Consume one use if the limit allows it
///
/// The limit check and increment are one statement, so two concurrent
/// orders can never both take the last use. Returns `false` when exhausted.
pub async fn try_consume(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE coupon SET used_count = used_count + 1, updated_at = ? WHERE id = ? AND (usage_limit IS NULL OR used_count < usage_limit)",
    )
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Codes are stored upper-cased
pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_code() {
        assert_eq!(normalize_code(" save20 "), "SAVE20");
    }
}
