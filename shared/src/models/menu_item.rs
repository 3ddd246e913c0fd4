//! Menu Item Model

use serde::{Deserialize, Serialize};

/// Menu category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum MenuCategory {
    Appetizer,
    #[serde(rename = "Main Course")]
    #[cfg_attr(feature = "db", sqlx(rename = "Main Course"))]
    MainCourse,
    Dessert,
    Beverage,
    Special,
}

impl MenuCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            MenuCategory::Appetizer => "Appetizer",
            MenuCategory::MainCourse => "Main Course",
            MenuCategory::Dessert => "Dessert",
            MenuCategory::Beverage => "Beverage",
            MenuCategory::Special => "Special",
        }
    }
}

/// Menu item entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: MenuCategory,
    pub image: Option<String>,
    pub available: bool,
    /// Generated from a special offer; managed only through the offer
    pub is_special_offer: bool,
    /// Owning special offer
    pub special_offer_id: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

impl MenuItem {
    pub fn is_offer_mirror(&self) -> bool {
        self.is_special_offer || self.special_offer_id.is_some()
    }
}

/// Create menu item payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuItemCreate {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: MenuCategory,
    pub image: Option<String>,
    pub available: Option<bool>,
}

/// Update menu item payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MenuItemUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<MenuCategory>,
    pub image: Option<String>,
    pub available: Option<bool>,
}
