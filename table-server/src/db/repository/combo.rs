//! Combo Repository

use super::{RepoError, RepoResult};
use crate::pricing::discount_percent;
use shared::models::{Combo, ComboCreate, ComboUpdate};
use sqlx::SqlitePool;

pub async fn find_active(pool: &SqlitePool) -> RepoResult<Vec<Combo>> {
    let combos = sqlx::query_as::<_, Combo>(
        "SELECT id, name, description, items, original_price, combo_price, discount, image, active, created_at, updated_at FROM combo WHERE active = 1 ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(combos)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<Combo>> {
    let combos = sqlx::query_as::<_, Combo>(
        "SELECT id, name, description, items, original_price, combo_price, discount, image, active, created_at, updated_at FROM combo ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    Ok(combos)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Combo>> {
    let combo = sqlx::query_as::<_, Combo>(
        "SELECT id, name, description, items, original_price, combo_price, discount, image, active, created_at, updated_at FROM combo WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(combo)
}

pub async fn create(pool: &SqlitePool, data: ComboCreate) -> RepoResult<Combo> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO combo (id, name, description, items, original_price, combo_price, discount, image, active, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(serde_json::to_string(&data.items)?)
    .bind(data.original_price)
    .bind(data.combo_price)
    .bind(discount_percent(data.original_price, data.combo_price))
    .bind(&data.image)
    .bind(data.active.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create combo".into()))
}

/// Merge the update into the stored row and recompute the discount
pub async fn update(pool: &SqlitePool, id: i64, data: ComboUpdate) -> RepoResult<Combo> {
    let mut combo = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Combo {id} not found")))?;

    if let Some(name) = data.name {
        combo.name = name;
    }
    if let Some(description) = data.description {
        combo.description = description;
    }
    if let Some(items) = data.items {
        combo.items = items;
    }
    if let Some(original_price) = data.original_price {
        combo.original_price = original_price;
    }
    if let Some(combo_price) = data.combo_price {
        combo.combo_price = combo_price;
    }
    if data.image.is_some() {
        combo.image = data.image;
    }
    if let Some(active) = data.active {
        combo.active = active;
    }
    combo.discount = discount_percent(combo.original_price, combo.combo_price);

    sqlx::query(
        "UPDATE combo SET name = ?1, description = ?2, items = ?3, original_price = ?4, combo_price = ?5, discount = ?6, image = ?7, active = ?8, updated_at = ?9 WHERE id = ?10",
    )
    .bind(&combo.name)
    .bind(&combo.description)
    .bind(serde_json::to_string(&combo.items)?)
    .bind(combo.original_price)
    .bind(combo.combo_price)
    .bind(combo.discount)
    .bind(&combo.image)
    .bind(combo.active)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;

    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Combo {id} not found")))
}

/// Flip the active flag
pub async fn toggle(pool: &SqlitePool, id: i64) -> RepoResult<Combo> {
    let rows = sqlx::query(
        "UPDATE combo SET active = CASE active WHEN 1 THEN 0 ELSE 1 END, updated_at = ? WHERE id = ?",
    )
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Combo {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Combo {id} not found")))
}

pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<()> {
    let rows = sqlx::query("DELETE FROM combo WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Combo {id} not found")));
    }
    Ok(())
}
