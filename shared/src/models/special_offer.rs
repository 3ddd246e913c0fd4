//! Special Offer Model

use serde::{Deserialize, Serialize};

use super::combo::BundleItem;

/// Offer type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum OfferType {
    #[default]
    Combo,
    Weekend,
    Bogo,
    Percentage,
    Custom,
}

/// BOGO subtype
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum BogoType {
    Buy1get1,
    Buy2get1,
    Buy1get1free,
}

/// Day of week for weekend offers
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum DayOfWeek {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

/// Badge text used when no explicit badge is set
pub const DEFAULT_BADGE: &str = "SPECIAL OFFER";

/// Special offer entity
///
/// Every offer owns exactly one mirror [`MenuItem`](super::MenuItem)
/// (`menu_item_id`) so it can be ordered like any catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct SpecialOffer {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub offer_type: OfferType,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<BundleItem>,
    pub original_price: f64,
    pub offer_price: f64,
    /// Derived discount percentage
    pub discount: i64,
    pub image: Option<String>,
    pub active: bool,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub valid_days: Vec<DayOfWeek>,
    pub bogo_type: Option<BogoType>,
    pub percentage_off: Option<f64>,
    pub custom_rules: String,
    pub badge_text: String,
    /// Whether a coupon may be stacked on the mirror item
    pub allow_coupons: bool,
    /// Mirror menu item
    pub menu_item_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create special offer payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialOfferCreate {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub offer_type: OfferType,
    /// Omitted means no constituent items; an explicit `[]` is rejected
    pub items: Option<Vec<BundleItem>>,
    pub original_price: f64,
    pub offer_price: f64,
    pub image: Option<String>,
    pub valid_days: Option<Vec<DayOfWeek>>,
    pub bogo_type: Option<BogoType>,
    pub percentage_off: Option<f64>,
    pub custom_rules: Option<String>,
    pub badge_text: Option<String>,
    pub allow_coupons: Option<bool>,
}

/// Update special offer payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SpecialOfferUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub offer_type: Option<OfferType>,
    pub items: Option<Vec<BundleItem>>,
    pub original_price: Option<f64>,
    pub offer_price: Option<f64>,
    pub image: Option<String>,
    pub active: Option<bool>,
    pub valid_days: Option<Vec<DayOfWeek>>,
    pub bogo_type: Option<BogoType>,
    pub percentage_off: Option<f64>,
    pub custom_rules: Option<String>,
    pub badge_text: Option<String>,
    pub allow_coupons: Option<bool>,
}

/// Result of a mirror consistency pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconcileReport {
    /// Offers that had no mirror and got a new one
    pub created: u32,
    /// Offers whose `menu_item_id` was re-pointed at an existing mirror
    pub relinked: u32,
    /// Mirrors whose fields drifted from their offer
    pub resynced: u32,
    /// Mirrors whose offer no longer exists
    pub orphans_removed: u32,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        *self == Self::default()
    }
}
