//! Pricing core
//!
//! - [`MenuCatalog`] - authoritative item prices
//! - [`DiscountSource`] - coupon / special offer discount resolution
//! - [`OrderPricer`] - subtotal, discount and final amount

pub mod catalog;
pub mod discount;
pub mod money;
pub mod pricer;

pub use catalog::MenuCatalog;
pub use discount::{DiscountError, DiscountSource};
pub use money::{discount_percent, round_half_up, round_money, to_decimal, to_f64};
pub use pricer::{OrderPricer, PricedLine, PricingError, Quote};
