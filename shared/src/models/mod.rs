//! Data models
//!
//! Shared between table-server and its clients (via API).
//! DB row types use `#[cfg_attr(feature = "db", derive(sqlx::FromRow))]`.
//! All IDs are `i64` snowflakes, all timestamps are Unix millis.

pub mod analytics;
pub mod combo;
pub mod coupon;
pub mod media;
pub mod menu_item;
pub mod order;
pub mod review;
pub mod special_offer;
pub mod user;

// Re-exports
pub use analytics::*;
pub use combo::*;
pub use coupon::*;
pub use media::*;
pub use menu_item::*;
pub use order::*;
pub use review::*;
pub use special_offer::*;
pub use user::*;
