//! Special offer writes
//!
//! Each write touches the offer row and its mirror menu item inside one
//! transaction, so the pair is never observed half-updated.

use shared::models::{BundleItem, OfferType, SpecialOffer, SpecialOfferCreate, SpecialOfferUpdate};
use sqlx::{SqliteConnection, SqlitePool};

use super::mirror::{apply_update, new_offer};
use crate::db::repository::{menu_item, special_offer};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_bundle_items, validate_optional_text,
    validate_positive_amount, validate_required_text,
};
use crate::utils::{AppError, AppResult, ErrorCode};

fn offer_not_found(id: i64) -> AppError {
    AppError::new(ErrorCode::SpecialOfferNotFound).with_detail("id", id)
}

/// An item list that is sent must not be empty; leaving it out is fine
fn reject_empty_items(items: Option<&[BundleItem]>) -> AppResult<()> {
    if items.is_some_and(|items| items.is_empty()) {
        return Err(AppError::new(ErrorCode::SpecialOfferEmpty).with_detail("field", "items"));
    }
    Ok(())
}

/// Field rules on a fully merged offer
///
/// Item-less offers (weekend, percentage, custom deals) are allowed.
pub fn validate_offer(offer: &SpecialOffer) -> AppResult<()> {
    validate_required_text(&offer.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&offer.description, "description", MAX_NOTE_LEN)?;
    validate_bundle_items(&offer.items)?;
    validate_positive_amount(offer.original_price, "original_price")?;
    validate_positive_amount(offer.offer_price, "price")?;
    validate_optional_text(&Some(offer.custom_rules.clone()), "custom_rules", MAX_NOTE_LEN)?;
    if offer.offer_type == OfferType::Percentage {
        match offer.percentage_off {
            Some(pct) if (0.0..=100.0).contains(&pct) => {}
            _ => {
                return Err(AppError::with_message(
                    ErrorCode::ValueOutOfRange,
                    "percentage_off must be between 0 and 100",
                )
                .with_detail("field", "percentage_off"));
            }
        }
    }
    Ok(())
}

/// Create an offer together with its mirror menu item
pub async fn create(pool: &SqlitePool, data: SpecialOfferCreate) -> AppResult<SpecialOffer> {
    reject_empty_items(data.items.as_deref())?;
    let offer = new_offer(data);
    validate_offer(&offer)?;

    let mut tx = begin(pool).await?;
    special_offer::insert(&mut *tx, &offer).await?;
    let mirror_id = menu_item::insert_mirror(&mut *tx, &offer).await?;
    special_offer::set_menu_item_id(&mut *tx, offer.id, mirror_id).await?;
    commit(tx).await?;

    tracing::info!(offer_id = offer.id, mirror_id, name = %offer.name, "Special offer created");
    load(pool, offer.id).await
}

/// Update an offer and resync its mirror
pub async fn update(pool: &SqlitePool, id: i64, data: SpecialOfferUpdate) -> AppResult<SpecialOffer> {
    reject_empty_items(data.items.as_deref())?;
    let mut offer = load(pool, id).await?;
    apply_update(&mut offer, data);
    validate_offer(&offer)?;
    save_with_mirror(pool, offer).await
}

/// Flip the active flag (mirror availability follows)
pub async fn toggle(pool: &SqlitePool, id: i64) -> AppResult<SpecialOffer> {
    let mut offer = load(pool, id).await?;
    let active = !offer.active;
    apply_update(
        &mut offer,
        SpecialOfferUpdate {
            active: Some(active),
            ..Default::default()
        },
    );
    save_with_mirror(pool, offer).await
}

/// Delete an offer and its mirror
pub async fn delete(pool: &SqlitePool, id: i64) -> AppResult<()> {
    let mut tx = begin(pool).await?;
    menu_item::delete_mirror(&mut *tx, id).await?;
    if !special_offer::delete(&mut *tx, id).await? {
        return Err(offer_not_found(id));
    }
    commit(tx).await?;

    tracing::info!(offer_id = id, "Special offer deleted");
    Ok(())
}

async fn save_with_mirror(pool: &SqlitePool, mut offer: SpecialOffer) -> AppResult<SpecialOffer> {
    let mut tx = begin(pool).await?;
    offer.menu_item_id = Some(ensure_mirror(&mut *tx, &offer).await?);
    if !special_offer::update(&mut *tx, &offer).await? {
        return Err(offer_not_found(offer.id));
    }
    commit(tx).await?;

    tracing::info!(offer_id = offer.id, active = offer.active, "Special offer updated");
    load(pool, offer.id).await
}

/// Sync the existing mirror or create a fresh one, returning its id
async fn ensure_mirror(conn: &mut SqliteConnection, offer: &SpecialOffer) -> AppResult<i64> {
    match menu_item::find_mirror_by_offer(&mut *conn, offer.id).await? {
        Some(mirror) => {
            menu_item::sync_mirror(&mut *conn, mirror.id, offer).await?;
            Ok(mirror.id)
        }
        None => Ok(menu_item::insert_mirror(conn, offer).await?),
    }
}

async fn load(pool: &SqlitePool, id: i64) -> AppResult<SpecialOffer> {
    special_offer::find_by_id(pool, id)
        .await?
        .ok_or_else(|| offer_not_found(id))
}

async fn begin(pool: &SqlitePool) -> AppResult<sqlx::Transaction<'static, sqlx::Sqlite>> {
    pool.begin()
        .await
        .map_err(|e| AppError::database(format!("Failed to begin transaction: {e}")))
}

async fn commit(tx: sqlx::Transaction<'static, sqlx::Sqlite>) -> AppResult<()> {
    tx.commit()
        .await
        .map_err(|e| AppError::database(format!("Failed to commit transaction: {e}")))
}
