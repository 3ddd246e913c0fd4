//! Combo Model

use serde::{Deserialize, Serialize};

/// Constituent item of a combo or special offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleItem {
    pub menu_item_id: i64,
    pub name: String,
    #[serde(default = "default_quantity")]
    pub quantity: i64,
}

fn default_quantity() -> i64 {
    1
}

/// Combo entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Combo {
    pub id: i64,
    pub name: String,
    pub description: String,
    #[cfg_attr(feature = "db", sqlx(json))]
    pub items: Vec<BundleItem>,
    pub original_price: f64,
    pub combo_price: f64,
    /// Derived discount percentage
    pub discount: i64,
    pub image: Option<String>,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create combo payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComboCreate {
    pub name: String,
    pub description: String,
    pub items: Vec<BundleItem>,
    pub original_price: f64,
    pub combo_price: f64,
    pub image: Option<String>,
    pub active: Option<bool>,
}

/// Update combo payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ComboUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub items: Option<Vec<BundleItem>>,
    pub original_price: Option<f64>,
    pub combo_price: Option<f64>,
    pub image: Option<String>,
    pub active: Option<bool>,
}
