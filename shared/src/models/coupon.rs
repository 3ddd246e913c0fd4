//! Coupon Model

use serde::{Deserialize, Serialize};

/// Discount type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Coupon entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Coupon {
    pub id: i64,
    /// Upper-cased, unique
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    /// Percentage: 20 = 20%, fixed: currency amount
    pub discount_value: f64,
    /// Cap for percentage coupons
    pub max_discount: Option<f64>,
    pub min_order_amount: f64,
    /// Validity window start (Unix millis)
    pub valid_from: i64,
    /// Validity window end (Unix millis, inclusive)
    pub valid_until: i64,
    pub usage_limit: Option<i64>,
    pub used_count: i64,
    pub active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Coupon as listed to customers (usage counter hidden)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveCoupon {
    pub id: i64,
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount: Option<f64>,
    pub min_order_amount: f64,
    pub valid_from: i64,
    pub valid_until: i64,
    pub usage_limit: Option<i64>,
}

impl From<Coupon> for ActiveCoupon {
    fn from(c: Coupon) -> Self {
        Self {
            id: c.id,
            code: c.code,
            description: c.description,
            discount_type: c.discount_type,
            discount_value: c.discount_value,
            max_discount: c.max_discount,
            min_order_amount: c.min_order_amount,
            valid_from: c.valid_from,
            valid_until: c.valid_until,
            usage_limit: c.usage_limit,
        }
    }
}

/// Create coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponCreate {
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
    pub max_discount: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub valid_from: i64,
    pub valid_until: i64,
    pub usage_limit: Option<i64>,
    pub active: Option<bool>,
}

/// Update coupon payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CouponUpdate {
    pub code: Option<String>,
    pub description: Option<String>,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<f64>,
    pub max_discount: Option<f64>,
    pub min_order_amount: Option<f64>,
    pub valid_from: Option<i64>,
    pub valid_until: Option<i64>,
    pub usage_limit: Option<i64>,
    pub active: Option<bool>,
}

/// Validate coupon payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponValidateRequest {
    pub code: String,
    pub order_amount: f64,
}

/// Coupon summary returned by validation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponSummary {
    pub code: String,
    pub description: String,
    pub discount_type: DiscountType,
    pub discount_value: f64,
}

/// Validate coupon response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CouponValidateResponse {
    pub valid: bool,
    pub coupon: CouponSummary,
    pub discount: f64,
    pub final_amount: f64,
}
