//! Menu Item Repository
//!
//! Offer mirror rows are written only through the `*_mirror` functions,
//! which run inside the owning offer's transaction.

use super::{RepoError, RepoResult};
use shared::models::{MenuCategory, MenuItem, MenuItemCreate, MenuItemUpdate, SpecialOffer};
use sqlx::{SqliteConnection, SqlitePool};

/// Outcome of a menu item delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// Row removed
    Deleted,
    /// Referenced by past orders: marked unavailable instead
    Hidden,
}

pub async fn find_available(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description, price, category, image, available, is_special_offer, special_offer_id, created_at, updated_at FROM menu_item WHERE available = 1 ORDER BY category, name",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_all(pool: &SqlitePool) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description, price, category, image, available, is_special_offer, special_offer_id, created_at, updated_at FROM menu_item ORDER BY category, name",
    )
    .fetch_all(pool)
    .await?;
    Ok(items)
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description, price, category, image, available, is_special_offer, special_offer_id, created_at, updated_at FROM menu_item WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    Ok(item)
}

pub async fn create(pool: &SqlitePool, data: MenuItemCreate) -> RepoResult<MenuItem> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO menu_item (id, name, description, price, category, image, available, is_special_offer, special_offer_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 0, NULL, ?8, ?8)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.price)
    .bind(data.category)
    .bind(&data.image)
    .bind(data.available.unwrap_or(true))
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create menu item".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: MenuItemUpdate) -> RepoResult<MenuItem> {
    let rows = sqlx::query(
        "UPDATE menu_item SET name = COALESCE(?1, name), description = COALESCE(?2, description), price = COALESCE(?3, price), category = COALESCE(?4, category), image = COALESCE(?5, image), available = COALESCE(?6, available), updated_at = ?7 WHERE id = ?8",
    )
    .bind(data.name)
    .bind(data.description)
    .bind(data.price)
    .bind(data.category)
    .bind(data.image)
    .bind(data.available)
    .bind(shared::util::now_millis())
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
}

/// Delete a menu item, hiding it instead when order history references it
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<DeleteOutcome> {
    let referenced: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM order_item WHERE menu_item_id = ?")
            .bind(id)
            .fetch_one(pool)
            .await?;

    let rows = if referenced > 0 {
        sqlx::query("UPDATE menu_item SET available = 0, updated_at = ? WHERE id = ?")
            .bind(shared::util::now_millis())
            .bind(id)
            .execute(pool)
            .await?
    } else {
        sqlx::query("DELETE FROM menu_item WHERE id = ?")
            .bind(id)
            .execute(pool)
            .await?
    };
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Menu item {id} not found")));
    }

    Ok(if referenced > 0 {
        DeleteOutcome::Hidden
    } else {
        DeleteOutcome::Deleted
    })
}

// ── Offer mirrors ───────────────────────────────────────────────────

/// Mirror description for an offer
pub fn mirror_description(offer_description: &str) -> String {
    format!("{offer_description} (Special Offer)")
}

pub async fn find_mirror_by_offer(
    conn: &mut SqliteConnection,
    offer_id: i64,
) -> RepoResult<Option<MenuItem>> {
    let item = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description, price, category, image, available, is_special_offer, special_offer_id, created_at, updated_at FROM menu_item WHERE special_offer_id = ?",
    )
    .bind(offer_id)
    .fetch_optional(conn)
    .await?;
    Ok(item)
}

/// Insert the mirror menu item of an offer, returning its id
pub async fn insert_mirror(conn: &mut SqliteConnection, offer: &SpecialOffer) -> RepoResult<i64> {
    let id = shared::util::snowflake_id();
    let now = shared::util::now_millis();
    sqlx::query(
        "INSERT INTO menu_item (id, name, description, price, category, image, available, is_special_offer, special_offer_id, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?9, ?9)",
    )
    .bind(id)
    .bind(&offer.name)
    .bind(mirror_description(&offer.description))
    .bind(offer.offer_price)
    .bind(MenuCategory::Special)
    .bind(&offer.image)
    .bind(offer.active)
    .bind(offer.id)
    .bind(now)
    .execute(conn)
    .await?;
    Ok(id)
}

/// Overwrite mirror fields from its offer; `false` when no mirror row exists
pub async fn sync_mirror(
    conn: &mut SqliteConnection,
    mirror_id: i64,
    offer: &SpecialOffer,
) -> RepoResult<bool> {
    let rows = sqlx::query(
        "UPDATE menu_item SET name = ?1, description = ?2, price = ?3, category = ?4, image = ?5, available = ?6, is_special_offer = 1, special_offer_id = ?7, updated_at = ?8 WHERE id = ?9",
    )
    .bind(&offer.name)
    .bind(mirror_description(&offer.description))
    .bind(offer.offer_price)
    .bind(MenuCategory::Special)
    .bind(&offer.image)
    .bind(offer.active)
    .bind(offer.id)
    .bind(shared::util::now_millis())
    .bind(mirror_id)
    .execute(conn)
    .await?;
    Ok(rows.rows_affected() > 0)
}

/// Remove the mirror of an offer (hidden instead if ordered before)
pub async fn delete_mirror(conn: &mut SqliteConnection, offer_id: i64) -> RepoResult<()> {
    let Some(mirror) = find_mirror_by_offer(&mut *conn, offer_id).await? else {
        return Ok(());
    };
    remove_mirror_row(conn, mirror.id).await
}

/// Drop a mirror row; ordered mirrors are detached and hidden so history stays intact
pub async fn remove_mirror_row(conn: &mut SqliteConnection, mirror_id: i64) -> RepoResult<()> {
    let referenced: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM order_item WHERE menu_item_id = ?")
            .bind(mirror_id)
            .fetch_one(&mut *conn)
            .await?;
    if referenced > 0 {
        sqlx::query(
            "UPDATE menu_item SET available = 0, special_offer_id = NULL, updated_at = ? WHERE id = ?",
        )
        .bind(shared::util::now_millis())
        .bind(mirror_id)
        .execute(conn)
        .await?;
    } else {
        sqlx::query("DELETE FROM menu_item WHERE id = ?")
            .bind(mirror_id)
            .execute(conn)
            .await?;
    }
    Ok(())
}

/// Mirror rows (`is_special_offer = 1`) still linked to an offer id
pub async fn find_linked_mirrors(conn: &mut SqliteConnection) -> RepoResult<Vec<MenuItem>> {
    let items = sqlx::query_as::<_, MenuItem>(
        "SELECT id, name, description, price, category, image, available, is_special_offer, special_offer_id, created_at, updated_at FROM menu_item WHERE is_special_offer = 1 AND special_offer_id IS NOT NULL",
    )
    .fetch_all(conn)
    .await?;
    Ok(items)
}
