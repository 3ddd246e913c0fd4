//! Menu catalog - the authoritative source of item prices

use shared::models::{MenuItem, OrderLineRequest};
use sqlx::SqlitePool;

use super::pricer::{PricedLine, PricingError};
use crate::db::repository::{RepoResult, menu_item};

/// Read access to the menu
#[derive(Debug, Clone, Copy)]
pub struct MenuCatalog<'a> {
    pool: &'a SqlitePool,
}

impl<'a> MenuCatalog<'a> {
    pub fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// Any item by id, including hidden ones
    pub async fn lookup(&self, id: i64) -> RepoResult<Option<MenuItem>> {
        menu_item::find_by_id(self.pool, id).await
    }

    /// Orderable item by id (hidden items count as absent)
    pub async fn lookup_available(&self, id: i64) -> RepoResult<Option<MenuItem>> {
        Ok(self.lookup(id).await?.filter(|item| item.available))
    }

    pub async fn list_available(&self) -> RepoResult<Vec<MenuItem>> {
        menu_item::find_available(self.pool).await
    }

    pub async fn list_all(&self) -> RepoResult<Vec<MenuItem>> {
        menu_item::find_all(self.pool).await
    }

    /// Resolve requested lines against current prices
    ///
    /// Fails on the first unknown or unavailable item; nothing is written.
    pub async fn resolve_lines(
        &self,
        requests: &[OrderLineRequest],
    ) -> Result<Vec<(PricedLine, MenuItem)>, PricingError> {
        if requests.is_empty() {
            return Err(PricingError::Empty);
        }

        let mut lines = Vec::with_capacity(requests.len());
        for request in requests {
            PricedLine::check_quantity(request.menu_item_id, request.quantity)?;

            let item = self
                .lookup(request.menu_item_id)
                .await?
                .ok_or(PricingError::MenuItemNotFound(request.menu_item_id))?;
            if !item.available {
                return Err(PricingError::MenuItemUnavailable {
                    id: item.id,
                    name: item.name,
                });
            }

            lines.push((PricedLine::from_item(&item, request.quantity), item));
        }
        Ok(lines)
    }
}
