//! Money helpers
//!
//! Amounts are stored and serialized as `f64` but every calculation runs
//! on `Decimal`, rounded to cents half away from zero.

use rust_decimal::prelude::*;

/// `f64` -> `Decimal` (non-finite values become zero)
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

/// `Decimal` -> `f64` rounded to cents
pub fn to_f64(value: Decimal) -> f64 {
    round_money(value).to_f64().unwrap_or_default()
}

/// Round to 2 decimal places, half away from zero
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Round to a whole unit, halves towards +infinity (`floor(x + 0.5)`)
pub fn round_half_up(value: Decimal) -> Decimal {
    (value + Decimal::new(5, 1)).floor()
}

/// Whole-percent discount of `price` relative to `original`
///
/// `round((original - price) / original * 100)`; zero when `original` is not positive.
pub fn discount_percent(original: f64, price: f64) -> i64 {
    let original = to_decimal(original);
    if original <= Decimal::ZERO {
        return 0;
    }
    let price = to_decimal(price);
    round_half_up((original - price) / original * Decimal::ONE_HUNDRED)
        .to_i64()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(d("10.005")), d("10.01"));
        assert_eq!(round_money(d("10.004")), d("10.00"));
        assert_eq!(to_f64(d("0.1") + d("0.2")), 0.3);
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(d("2.5")), d("3"));
        assert_eq!(round_half_up(d("2.49")), d("2"));
        assert_eq!(round_half_up(d("-2.5")), d("-2"));
    }

    #[test]
    fn test_discount_percent() {
        assert_eq!(discount_percent(500.0, 400.0), 20);
        assert_eq!(discount_percent(299.0, 199.0), 33);
        assert_eq!(discount_percent(3.0, 2.0), 33);
        assert_eq!(discount_percent(8.0, 7.0), 13);
        assert_eq!(discount_percent(0.0, 10.0), 0);
    }

    #[test]
    fn test_to_decimal_exact() {
        assert_eq!(to_decimal(299.0), d("299"));
        assert_eq!(to_decimal(0.1), d("0.1"));
        assert_eq!(to_decimal(f64::NAN), Decimal::ZERO);
    }
}
