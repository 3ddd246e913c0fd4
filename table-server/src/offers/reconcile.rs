//! Offer / mirror consistency pass
//!
//! Repairs every way an offer and its mirror menu item can drift apart:
//!
//! | Drift | Repair | Counter |
//! |-------|--------|---------|
//! | offer without a mirror | insert mirror | `created` |
//! | `menu_item_id` not pointing at the linked mirror | re-point | `relinked` |
//! | mirror fields differ from the offer | overwrite | `resynced` |
//! | mirror whose offer is gone | delete (hide if ordered) | `orphans_removed` |

use std::collections::HashSet;

use shared::models::ReconcileReport;
use sqlx::SqlitePool;

use super::mirror::mirror_matches;
use crate::db::repository::{RepoError, RepoResult, menu_item, special_offer};

/// Run the pass in a single transaction
pub async fn reconcile(pool: &SqlitePool) -> RepoResult<ReconcileReport> {
    let mut report = ReconcileReport::default();
    let mut tx = pool.begin().await?;

    let offers = special_offer::find_all(&mut *tx).await?;
    let offer_ids: HashSet<i64> = offers.iter().map(|o| o.id).collect();

    for orphan in menu_item::find_linked_mirrors(&mut *tx)
        .await?
        .into_iter()
        .filter(|m| m.special_offer_id.is_some_and(|id| !offer_ids.contains(&id)))
    {
        tracing::warn!(menu_item_id = orphan.id, "Removing orphan offer mirror");
        menu_item::remove_mirror_row(&mut *tx, orphan.id).await?;
        report.orphans_removed += 1;
    }

    for offer in &offers {
        match menu_item::find_mirror_by_offer(&mut *tx, offer.id).await? {
            Some(mirror) => {
                if offer.menu_item_id != Some(mirror.id) {
                    special_offer::set_menu_item_id(&mut *tx, offer.id, mirror.id).await?;
                    report.relinked += 1;
                }
                if !mirror_matches(&mirror, offer) {
                    menu_item::sync_mirror(&mut *tx, mirror.id, offer).await?;
                    report.resynced += 1;
                }
            }
            None => {
                let mirror_id = menu_item::insert_mirror(&mut *tx, offer).await?;
                special_offer::set_menu_item_id(&mut *tx, offer.id, mirror_id).await?;
                tracing::warn!(offer_id = offer.id, mirror_id, "Created missing offer mirror");
                report.created += 1;
            }
        }
    }

    tx.commit()
        .await
        .map_err(|e| RepoError::Database(format!("Failed to commit reconciliation: {e}")))?;
    Ok(report)
}
