//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SQLite TEXT has no built-in length enforcement, so handlers check here.

use shared::models::BundleItem;
use validator::ValidateEmail;

use crate::utils::{AppError, ErrorCode};

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: menu item, combo, offer, coupon description, user name
pub const MAX_NAME_LEN: usize = 200;

/// Descriptions, special instructions, review comments, custom offer rules
pub const MAX_NOTE_LEN: usize = 500;

/// Coupon codes
pub const MAX_CODE_LEN: usize = 50;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// Passwords (before hashing)
pub const MAX_PASSWORD_LEN: usize = 128;

pub const MIN_PASSWORD_LEN: usize = 6;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers ──────────────────────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")).with_detail("field", field));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        ))
        .with_detail("field", field));
    }
    Ok(())
}

/// Validate an email address (syntax + length).
pub fn validate_email(email: &str) -> Result<(), AppError> {
    validate_required_text(email, "email", MAX_EMAIL_LEN)?;
    if !email.to_string().validate_email() {
        return Err(AppError::validation("Invalid email address").with_detail("field", "email"));
    }
    Ok(())
}

/// Validate that an amount is finite and strictly positive.
pub fn validate_positive_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 {
        return Err(
            AppError::validation(format!("{field} must be greater than zero"))
                .with_detail("field", field),
        );
    }
    Ok(())
}

/// Validate that an amount is finite and not negative.
pub fn validate_non_negative_amount(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!("{field} must not be negative"))
            .with_detail("field", field));
    }
    Ok(())
}

/// Validate the shared shape of combos and special offers.
///
/// `empty_code` is reported when the bundle has no constituent items.
pub fn validate_bundle(
    name: &str,
    description: &str,
    items: &[BundleItem],
    original_price: f64,
    price: f64,
    empty_code: ErrorCode,
) -> Result<(), AppError> {
    validate_required_text(name, "name", MAX_NAME_LEN)?;
    validate_required_text(description, "description", MAX_NOTE_LEN)?;
    if items.is_empty() {
        return Err(AppError::new(empty_code).with_detail("field", "items"));
    }
    validate_bundle_items(items)?;
    validate_positive_amount(original_price, "original_price")?;
    validate_positive_amount(price, "price")?;
    Ok(())
}

/// Per-item rules for constituent items; an empty list passes.
pub fn validate_bundle_items(items: &[BundleItem]) -> Result<(), AppError> {
    for item in items {
        validate_required_text(&item.name, "items.name", MAX_NAME_LEN)?;
        if item.quantity < 1 {
            return Err(AppError::validation("Item quantity must be at least 1")
                .with_detail("field", "items.quantity")
                .with_detail("menu_item_id", item.menu_item_id));
        }
    }
    Ok(())
}
