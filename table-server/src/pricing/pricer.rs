//! Order pricer
//!
//! Combines priced lines with an already-resolved discount. The pricer
//! never looks a discount up itself.

use rust_decimal::prelude::*;
use shared::models::MenuItem;
use thiserror::Error;

use super::money::{round_money, to_decimal, to_f64};
use crate::db::repository::RepoError;
use crate::utils::{AppError, ErrorCode};

/// Maximum quantity per line
pub const MAX_QUANTITY: i64 = 9999;

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("Order must contain at least one item")]
    Empty,

    #[error("Quantity must be between 1 and {max} (item {menu_item_id}, got {quantity})", max = MAX_QUANTITY)]
    InvalidQuantity { menu_item_id: i64, quantity: i64 },

    #[error("Menu item {0} not found")]
    MenuItemNotFound(i64),

    #[error("{name} is currently unavailable")]
    MenuItemUnavailable { id: i64, name: String },

    #[error(transparent)]
    Repo(#[from] RepoError),
}

impl From<PricingError> for AppError {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::Empty => AppError::new(ErrorCode::OrderEmpty),
            PricingError::InvalidQuantity { menu_item_id, .. } => {
                AppError::with_message(ErrorCode::OrderQuantityInvalid, err.to_string())
                    .with_detail("menu_item_id", menu_item_id)
            }
            PricingError::MenuItemNotFound(id) => {
                AppError::with_message(ErrorCode::MenuItemNotFound, err.to_string())
                    .with_detail("menu_item_id", id)
            }
            PricingError::MenuItemUnavailable { id, .. } => {
                AppError::with_message(ErrorCode::MenuItemUnavailable, err.to_string())
                    .with_detail("menu_item_id", id)
            }
            PricingError::Repo(e) => e.into(),
        }
    }
}

/// One order line at its current catalog price
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub menu_item_id: i64,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
}

impl PricedLine {
    pub fn from_item(item: &MenuItem, quantity: i64) -> Self {
        Self {
            menu_item_id: item.id,
            name: item.name.clone(),
            quantity,
            unit_price: to_decimal(item.price),
        }
    }

    pub fn check_quantity(menu_item_id: i64, quantity: i64) -> Result<(), PricingError> {
        if !(1..=MAX_QUANTITY).contains(&quantity) {
            return Err(PricingError::InvalidQuantity {
                menu_item_id,
                quantity,
            });
        }
        Ok(())
    }

    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// Priced order totals
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    /// Subtotal before discount
    pub total: Decimal,
    pub discount: Decimal,
    /// `total - discount` (clamped at zero only when configured)
    pub final_amount: Decimal,
}

impl Quote {
    pub fn total_f64(&self) -> f64 {
        to_f64(self.total)
    }

    pub fn discount_f64(&self) -> f64 {
        to_f64(self.discount)
    }

    pub fn final_f64(&self) -> f64 {
        to_f64(self.final_amount)
    }
}

/// Computes order totals
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderPricer {
    /// Clamp `final_amount` at zero when the discount exceeds the subtotal
    pub clamp_final_amount: bool,
}

impl OrderPricer {
    pub fn new(clamp_final_amount: bool) -> Self {
        Self { clamp_final_amount }
    }

    /// `Σ unit_price × quantity`, rounded to cents
    pub fn subtotal(lines: &[PricedLine]) -> Decimal {
        round_money(lines.iter().map(PricedLine::line_total).sum())
    }

    /// Apply an upstream discount to the subtotal
    ///
    /// When clamping, the discount itself is capped at the subtotal so
    /// `final_amount == total - discount` still holds.
    pub fn quote(&self, subtotal: Decimal, discount: Decimal) -> Quote {
        let mut discount = round_money(discount);
        if self.clamp_final_amount && discount > subtotal {
            discount = subtotal.max(Decimal::ZERO);
        }
        Quote {
            total: subtotal,
            discount,
            final_amount: subtotal - discount,
        }
    }

    pub fn price(&self, lines: &[PricedLine], discount: Decimal) -> Quote {
        self.quote(Self::subtotal(lines), discount)
    }
}
