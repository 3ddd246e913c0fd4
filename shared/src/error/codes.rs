//! Unified error codes
//!
//! This module defines all error codes used by the server and its clients.
//! Error codes are organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Account errors
//! - 4xxx: Order errors
//! - 5xxx: Coupon errors
//! - 6xxx: Menu, combo and special offer errors
//! - 7xxx: Review errors
//! - 8xxx: Media errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// All error codes are represented as u16 values for efficient serialization
/// and cross-language compatibility (Rust, TypeScript, etc.)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid request
    InvalidRequest = 5,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (email/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Admin role required
    AdminRequired = 2003,

    // ==================== 3xxx: Account ====================
    /// User not found
    UserNotFound = 3001,
    /// Email is already registered
    EmailExists = 3002,
    /// Password too short
    PasswordTooShort = 3003,

    // ==================== 4xxx: Order ====================
    /// Order not found
    OrderNotFound = 4001,
    /// Order has no items
    OrderEmpty = 4002,
    /// Status change not allowed from the current status
    OrderInvalidTransition = 4003,
    /// Unknown order status
    OrderStatusInvalid = 4004,
    /// Line item quantity out of range
    OrderQuantityInvalid = 4005,

    // ==================== 5xxx: Coupon ====================
    /// Coupon code does not exist
    CouponNotFound = 5001,
    /// Coupon is not active
    CouponInactive = 5002,
    /// Coupon is outside its validity window
    CouponExpired = 5003,
    /// Coupon usage limit reached
    CouponUsageExceeded = 5004,
    /// Order subtotal below the coupon minimum
    CouponBelowMinimum = 5005,
    /// Coupon code already exists
    CouponCodeExists = 5006,
    /// Coupon cannot be combined with a special offer in the order
    CouponNotStackable = 5007,

    // ==================== 6xxx: Menu ====================
    /// Menu item not found
    MenuItemNotFound = 6001,
    /// Menu item is not available for ordering
    MenuItemUnavailable = 6002,
    /// Menu item is owned by a special offer
    MenuItemOwnedByOffer = 6003,
    /// Menu item price is invalid
    MenuItemInvalidPrice = 6004,
    /// Combo not found
    ComboNotFound = 6101,
    /// Combo has no items
    ComboEmpty = 6102,
    /// Special offer not found
    SpecialOfferNotFound = 6201,
    /// Special offer has no items
    SpecialOfferEmpty = 6202,

    // ==================== 7xxx: Review ====================
    /// Review not found
    ReviewNotFound = 7001,
    /// Rating outside 1-5
    ReviewRatingOutOfRange = 7002,

    // ==================== 8xxx: Media ====================
    /// File too large
    FileTooLarge = 8001,
    /// Unsupported file format
    UnsupportedFileFormat = 8002,
    /// Invalid image file
    InvalidImageFile = 8003,
    /// No file provided
    NoFileProvided = 8004,
    /// Empty file
    EmptyFile = 8005,
    /// Image processing failed
    ImageProcessingFailed = 8006,
    /// File storage failed
    FileStorageFailed = 8007,
    /// Image not found
    ImageNotFound = 8008,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Database error
    DatabaseError = 9002,
    /// Network error
    NetworkError = 9003,
    /// Timeout error
    TimeoutError = 9004,
    /// Configuration error
    ConfigError = 9005,

    // ==================== 94xx: Storage ====================
    /// Object storage unreachable
    StorageUnavailable = 9401,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    #[inline]
    pub const fn is_success(&self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Success",
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidRequest => "Invalid request",
            ErrorCode::RequiredField => "Required field missing",
            ErrorCode::ValueOutOfRange => "Value out of range",

            // Auth
            ErrorCode::NotAuthenticated => "Authentication required",
            ErrorCode::InvalidCredentials => "Invalid credentials",
            ErrorCode::TokenExpired => "Token expired",
            ErrorCode::TokenInvalid => "Invalid token",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::AdminRequired => "Admin role required",

            // Account
            ErrorCode::UserNotFound => "User not found",
            ErrorCode::EmailExists => "User already exists",
            ErrorCode::PasswordTooShort => "Password too short",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order must contain at least one item",
            ErrorCode::OrderInvalidTransition => "Order status change not allowed",
            ErrorCode::OrderStatusInvalid => "Invalid status",
            ErrorCode::OrderQuantityInvalid => "Quantity must be at least 1",

            // Coupon
            ErrorCode::CouponNotFound => "Invalid coupon code",
            ErrorCode::CouponInactive => "This coupon is no longer active",
            ErrorCode::CouponExpired => "This coupon has expired",
            ErrorCode::CouponUsageExceeded => "This coupon has reached its usage limit",
            ErrorCode::CouponBelowMinimum => "Order amount below coupon minimum",
            ErrorCode::CouponCodeExists => "Coupon code already exists",
            ErrorCode::CouponNotStackable => "Coupons cannot be applied to this special offer",

            // Menu
            ErrorCode::MenuItemNotFound => "Menu item not found",
            ErrorCode::MenuItemUnavailable => "Menu item is not available",
            ErrorCode::MenuItemOwnedByOffer => "Menu item is managed by a special offer",
            ErrorCode::MenuItemInvalidPrice => "Price must be greater than zero",
            ErrorCode::ComboNotFound => "Combo not found",
            ErrorCode::ComboEmpty => "Combo must have at least one item",
            ErrorCode::SpecialOfferNotFound => "Special offer not found",
            ErrorCode::SpecialOfferEmpty => "Offer must have at least one item",

            // Review
            ErrorCode::ReviewNotFound => "Review not found",
            ErrorCode::ReviewRatingOutOfRange => "Rating must be between 1 and 5",

            // Media
            ErrorCode::FileTooLarge => "File too large",
            ErrorCode::UnsupportedFileFormat => "Unsupported file format",
            ErrorCode::InvalidImageFile => "Invalid image file",
            ErrorCode::NoFileProvided => "No file provided",
            ErrorCode::EmptyFile => "Empty file",
            ErrorCode::ImageProcessingFailed => "Image processing failed",
            ErrorCode::FileStorageFailed => "File storage failed",
            ErrorCode::ImageNotFound => "Image not found",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::DatabaseError => "Database error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",

            // Storage
            ErrorCode::StorageUnavailable => "Storage unavailable",
        }
    }
}

impl From<ErrorCode> for u16 {
    #[inline]
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            5 => Ok(ErrorCode::InvalidRequest),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1004 => Ok(ErrorCode::TokenInvalid),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2003 => Ok(ErrorCode::AdminRequired),

            // Account
            3001 => Ok(ErrorCode::UserNotFound),
            3002 => Ok(ErrorCode::EmailExists),
            3003 => Ok(ErrorCode::PasswordTooShort),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::OrderInvalidTransition),
            4004 => Ok(ErrorCode::OrderStatusInvalid),
            4005 => Ok(ErrorCode::OrderQuantityInvalid),

            // Coupon
            5001 => Ok(ErrorCode::CouponNotFound),
            5002 => Ok(ErrorCode::CouponInactive),
            5003 => Ok(ErrorCode::CouponExpired),
            5004 => Ok(ErrorCode::CouponUsageExceeded),
            5005 => Ok(ErrorCode::CouponBelowMinimum),
            5006 => Ok(ErrorCode::CouponCodeExists),
            5007 => Ok(ErrorCode::CouponNotStackable),

            // Menu
            6001 => Ok(ErrorCode::MenuItemNotFound),
            6002 => Ok(ErrorCode::MenuItemUnavailable),
            6003 => Ok(ErrorCode::MenuItemOwnedByOffer),
            6004 => Ok(ErrorCode::MenuItemInvalidPrice),
            6101 => Ok(ErrorCode::ComboNotFound),
            6102 => Ok(ErrorCode::ComboEmpty),
            6201 => Ok(ErrorCode::SpecialOfferNotFound),
            6202 => Ok(ErrorCode::SpecialOfferEmpty),

            // Review
            7001 => Ok(ErrorCode::ReviewNotFound),
            7002 => Ok(ErrorCode::ReviewRatingOutOfRange),

            // Media
            8001 => Ok(ErrorCode::FileTooLarge),
            8002 => Ok(ErrorCode::UnsupportedFileFormat),
            8003 => Ok(ErrorCode::InvalidImageFile),
            8004 => Ok(ErrorCode::NoFileProvided),
            8005 => Ok(ErrorCode::EmptyFile),
            8006 => Ok(ErrorCode::ImageProcessingFailed),
            8007 => Ok(ErrorCode::FileStorageFailed),
            8008 => Ok(ErrorCode::ImageNotFound),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9002 => Ok(ErrorCode::DatabaseError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            // Storage
            9401 => Ok(ErrorCode::StorageUnavailable),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
