//! Discount sources
//!
//! A [`DiscountSource`] turns an order subtotal into a discount amount.
//! Coupons compute one; special offers are already priced into their
//! mirror menu item and only decide whether a coupon may stack on top.

use rust_decimal::prelude::*;
use shared::models::{Coupon, DiscountType, SpecialOffer};
use thiserror::Error;

use super::money::{round_half_up, round_money, to_decimal};
use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DiscountError {
    #[error("Invalid coupon code")]
    NotFound,

    #[error("This coupon is no longer active")]
    Inactive,

    #[error("This coupon has expired")]
    Expired,

    #[error("This coupon has reached its usage limit")]
    UsageExceeded,

    #[error("Minimum order amount of {minimum} required")]
    BelowMinimum { minimum: Decimal },

    #[error("Coupons cannot be combined with this special offer")]
    NotStackable,
}

impl From<DiscountError> for AppError {
    fn from(err: DiscountError) -> Self {
        let code = match &err {
            DiscountError::NotFound => ErrorCode::CouponNotFound,
            DiscountError::Inactive => ErrorCode::CouponInactive,
            DiscountError::Expired => ErrorCode::CouponExpired,
            DiscountError::UsageExceeded => ErrorCode::CouponUsageExceeded,
            DiscountError::BelowMinimum { .. } => ErrorCode::CouponBelowMinimum,
            DiscountError::NotStackable => ErrorCode::CouponNotStackable,
        };
        let app_err = AppError::with_message(code, err.to_string());
        match err {
            DiscountError::BelowMinimum { minimum } => {
                app_err.with_detail("min_order_amount", minimum.to_f64().unwrap_or_default())
            }
            _ => app_err,
        }
    }
}

/// Something that can discount an order subtotal
pub trait DiscountSource {
    /// Discount for `subtotal` at `now_millis`
    fn resolve(&self, subtotal: Decimal, now_millis: i64) -> Result<Decimal, DiscountError>;

    /// Whether a coupon may be applied on top of this source
    fn stacks_with_coupons(&self) -> bool {
        true
    }
}

impl DiscountSource for Coupon {
    /// Checks run in a fixed order: inactive, expired, usage, minimum.
    ///
    /// Percentage coupons round to a whole unit and respect `max_discount`;
    /// fixed coupons return their value as-is, even above the subtotal.
    fn resolve(&self, subtotal: Decimal, now_millis: i64) -> Result<Decimal, DiscountError> {
        if !self.active {
            return Err(DiscountError::Inactive);
        }
        if now_millis < self.valid_from || now_millis > self.valid_until {
            return Err(DiscountError::Expired);
        }
        if let Some(limit) = self.usage_limit
            && self.used_count >= limit
        {
            return Err(DiscountError::UsageExceeded);
        }
        let minimum = to_decimal(self.min_order_amount);
        if subtotal < minimum {
            return Err(DiscountError::BelowMinimum { minimum });
        }

        let value = to_decimal(self.discount_value);
        let discount = match self.discount_type {
            DiscountType::Percentage => {
                let raw = round_half_up(subtotal * value / Decimal::ONE_HUNDRED);
                match self.max_discount {
                    Some(cap) => raw.min(to_decimal(cap)),
                    None => raw,
                }
            }
            DiscountType::Fixed => value,
        };
        Ok(round_money(discount))
    }
}

impl DiscountSource for SpecialOffer {
    fn resolve(&self, _subtotal: Decimal, _now_millis: i64) -> Result<Decimal, DiscountError> {
        Ok(Decimal::ZERO)
    }

    fn stacks_with_coupons(&self) -> bool {
        self.allow_coupons
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{DEFAULT_BADGE, OfferType};

    const NOW: i64 = 1_750_000_000_000;
    const DAY: i64 = 86_400_000;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn coupon(discount_type: DiscountType, value: f64) -> Coupon {
        Coupon {
            id: 1,
            code: "SAVE".into(),
            description: "test".into(),
            discount_type,
            discount_value: value,
            max_discount: None,
            min_order_amount: 0.0,
            valid_from: NOW - DAY,
            valid_until: NOW + DAY,
            usage_limit: None,
            used_count: 0,
            active: true,
            created_at: 0,
            updated_at: 0,
        }
    }

    #[test]
    fn test_percentage_capped() {
        let mut c = coupon(DiscountType::Percentage, 20.0);
        c.max_discount = Some(150.0);
        assert_eq!(c.resolve(d("1000"), NOW), Ok(d("150")));
    }

    #[test]
    fn test_percentage_uncapped_rounds() {
        let c = coupon(DiscountType::Percentage, 15.0);
        // 15% of 299 = 44.85
        assert_eq!(c.resolve(d("299"), NOW), Ok(d("45")));
        assert_eq!(c.resolve(d("100"), NOW), Ok(d("15")));
    }

    #[test]
    fn test_fixed_not_scaled() {
        let c = coupon(DiscountType::Fixed, 700.0);
        assert_eq!(c.resolve(d("500"), NOW), Ok(d("700")));
    }

    #[test]
    fn test_failure_order() {
        let mut c = coupon(DiscountType::Fixed, 50.0);
        c.active = false;
        c.valid_until = NOW - 1;
        c.usage_limit = Some(1);
        c.used_count = 1;
        c.min_order_amount = 1000.0;
        assert_eq!(c.resolve(d("10"), NOW), Err(DiscountError::Inactive));

        c.active = true;
        assert_eq!(c.resolve(d("10"), NOW), Err(DiscountError::Expired));

        c.valid_until = NOW + DAY;
        assert_eq!(c.resolve(d("10"), NOW), Err(DiscountError::UsageExceeded));

        c.usage_limit = None;
        assert_eq!(
            c.resolve(d("10"), NOW),
            Err(DiscountError::BelowMinimum { minimum: d("1000") })
        );

        assert!(c.resolve(d("1000"), NOW).is_ok());
    }

    #[test]
    fn test_window_bounds_inclusive() {
        let c = coupon(DiscountType::Fixed, 10.0);
        assert!(c.resolve(d("100"), c.valid_from).is_ok());
        assert!(c.resolve(d("100"), c.valid_until).is_ok());
        assert_eq!(
            c.resolve(d("100"), c.valid_from - 1),
            Err(DiscountError::Expired)
        );
        assert_eq!(
            c.resolve(d("100"), c.valid_until + 1),
            Err(DiscountError::Expired)
        );
    }

    #[test]
    fn test_usage_limit_reached() {
        let mut c = coupon(DiscountType::Fixed, 10.0);
        c.usage_limit = Some(3);
        c.used_count = 2;
        assert!(c.resolve(d("100"), NOW).is_ok());
        c.used_count = 3;
        assert_eq!(c.resolve(d("100"), NOW), Err(DiscountError::UsageExceeded));
    }

    #[test]
    fn test_offer_stacking() {
        let mut offer = SpecialOffer {
            id: 1,
            name: "Family Feast".into(),
            description: "x".into(),
            offer_type: OfferType::Combo,
            items: vec![],
            original_price: 500.0,
            offer_price: 400.0,
            discount: 20,
            image: None,
            active: true,
            valid_days: vec![],
            bogo_type: None,
            percentage_off: None,
            custom_rules: String::new(),
            badge_text: DEFAULT_BADGE.into(),
            allow_coupons: false,
            menu_item_id: None,
            created_at: 0,
            updated_at: 0,
        };
        assert_eq!(offer.resolve(d("400"), NOW), Ok(Decimal::ZERO));
        assert!(!offer.stacks_with_coupons());
        offer.allow_coupons = true;
        assert!(offer.stacks_with_coupons());
    }

    #[test]
    fn test_error_codes() {
        let err: AppError = DiscountError::BelowMinimum { minimum: d("500") }.into();
        assert_eq!(err.code, ErrorCode::CouponBelowMinimum);
        let err: AppError = DiscountError::NotFound.into();
        assert_eq!(err.code, ErrorCode::CouponNotFound);
        assert_eq!(err.message, "Invalid coupon code");
    }
}
