//! Special Offer Repository
//!
//! Row-level access only. Mirror menu items are kept in step by
//! `crate::offers`, which wraps these calls in a transaction.

use super::RepoResult;
use shared::models::SpecialOffer;
use sqlx::{Executor, Sqlite, SqliteConnection};

pub async fn find_active<'c, E>(executor: E) -> RepoResult<Vec<SpecialOffer>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let offers = sqlx::query_as::<_, SpecialOffer>(
        "SELECT id, name, description, offer_type, items, original_price, offer_price, discount, image, active, valid_days, bogo_type, percentage_off, custom_rules, badge_text, allow_coupons, menu_item_id, created_at, updated_at FROM special_offer WHERE active = 1 ORDER BY created_at DESC",
    )
    .fetch_all(executor)
    .await?;
    Ok(offers)
}

pub async fn find_all<'c, E>(executor: E) -> RepoResult<Vec<SpecialOffer>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let offers = sqlx::query_as::<_, SpecialOffer>(
        "SELECT id, name, description, offer_type, items, original_price, offer_price, discount, image, active, valid_days, bogo_type, percentage_off, custom_rules, badge_text, allow_coupons, menu_item_id, created_at, updated_at FROM special_offer ORDER BY created_at DESC",
    )
    .fetch_all(executor)
    .await?;
    Ok(offers)
}

pub async fn find_by_id<'c, E>(executor: E, id: i64) -> RepoResult<Option<SpecialOffer>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let offer = sqlx::query_as::<_, SpecialOffer>(
        "SELECT id, name, description, offer_type, items, original_price, offer_price, discount, image, active, valid_days, bogo_type, percentage_off, custom_rules, badge_text, allow_coupons, menu_item_id, created_at, updated_at FROM special_offer WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(executor)
    .await?;
    Ok(offer)
}

/// Offer owning a mirror menu item
pub async fn find_by_menu_item<'c, E>(executor: E, menu_item_id: i64) -> RepoResult<Option<SpecialOffer>>
where
    E: Executor<'c, Database = Sqlite>,
{
    let offer = sqlx::query_as::<_, SpecialOffer>(
        "SELECT id, name, description, offer_type, items, original_price, offer_price, discount, image, active, valid_days, bogo_type, percentage_off, custom_rules, badge_text, allow_coupons, menu_item_id, created_at, updated_at FROM special_offer WHERE menu_item_id = ?",
    )
    .bind(menu_item_id)
    .fetch_optional(executor)
    .await?;
    Ok(offer)
}

/// Insert a fully derived offer row (id and timestamps taken from `offer`)
pub async fn insert(conn: &mut SqliteConnection, offer: &SpecialOffer) -> RepoResult<()> {
    sqlx::query(
        "INSERT INTO special_offer (id, name, description, offer_type, items, original_price, offer_price, discount, image, active, valid_days, bogo_type, percentage_off, custom_rules, badge_text, allow_coupons, menu_item_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19)",
    )
    .bind(offer.id)
    .bind(&offer.name)
    .bind(&offer.description)
    .bind(offer.offer_type)
    .bind(serde_json::to_string(&offer.items)?)
    .bind(offer.original_price)
    .bind(offer.offer_price)
    .bind(offer.discount)
    .bind(&offer.image)
    .bind(offer.active)
    .bind(serde_json::to_string(&offer.valid_days)?)
    .bind(offer.bogo_type)
    .bind(offer.percentage_off)
    .bind(&offer.custom_rules)
    .bind(&offer.badge_text)
    .bind(offer.allow_coupons)
    .bind(offer.menu_item_id)
    .bind(offer.created_at)
    .bind(offer.updated_at)
    .execute(conn)
    .await?;
    Ok(())
}

/// Overwrite every mutable column; `false` when the row is gone
pub async fn update(conn: &mut SqliteConnection, offer: &SpecialOffer) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE special_offer SET name = ?1, description = ?2, offer_type = ?3, items = ?4, original_price = ?5, offer_price = ?6, discount = ?7, image = ?8, active = ?9, valid_days = ?10, bogo_type = ?11, percentage_off = ?12, custom_rules = ?13, badge_text = ?14, allow_coupons = ?15, menu_item_id = ?16, updated_at = ?17 WHERE id = ?18",
    )
    .bind(&offer.name)
    .bind(&offer.description)
    .bind(offer.offer_type)
    .bind(serde_json::to_string(&offer.items)?)
    .bind(offer.original_price)
    .bind(offer.offer_price)
    .bind(offer.discount)
    .bind(&offer.image)
    .bind(offer.active)
    .bind(serde_json::to_string(&offer.valid_days)?)
    .bind(offer.bogo_type)
    .bind(offer.percentage_off)
    .bind(&offer.custom_rules)
    .bind(&offer.badge_text)
    .bind(offer.allow_coupons)
    .bind(offer.menu_item_id)
    .bind(offer.updated_at)
    .bind(offer.id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

pub async fn set_menu_item_id(
    conn: &mut SqliteConnection,
    offer_id: i64,
    menu_item_id: i64,
) -> RepoResult<()> {
    sqlx::query("UPDATE special_offer SET menu_item_id = ? WHERE id = ?")
        .bind(menu_item_id)
        .bind(offer_id)
        .execute(conn)
        .await?;
    Ok(())
}

/// `false` when the row did not exist
pub async fn delete(conn: &mut SqliteConnection, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM special_offer WHERE id = ?")
        .bind(id)
        .execute(conn)
        .await?;
    Ok(rows.rows_affected() > 0)
}

/// Ids of all offers (reconciliation)
pub async fn all_ids(conn: &mut SqliteConnection) -> RepoResult<Vec<i64>> {
    let ids = sqlx::query_scalar("SELECT id FROM special_offer")
        .fetch_all(conn)
        .await?;
    Ok(ids)
}
