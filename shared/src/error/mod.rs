//! Error system shared by every layer
//!
//! An [`AppError`] is an [`ErrorCode`] plus a client-facing message and
//! optional details. The code decides the HTTP status and the
//! [`ErrorCategory`]; the response body is an [`ErrorBody`].
//!
//! | Range | Domain |
//! |-------|--------|
//! | 0xxx | general |
//! | 1xxx | authentication |
//! | 2xxx | permission |
//! | 3xxx | account |
//! | 4xxx | order |
//! | 5xxx | coupon |
//! | 6xxx | menu, combo, special offer |
//! | 7xxx | review |
//! | 8xxx | media |
//! | 9xxx | system |
//!
//! ```
//! use shared::error::{AppError, ErrorBody, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::ReviewRatingOutOfRange).with_detail("rating", 6);
//! let body = ErrorBody::from(&err);
//! assert_eq!(body.code, 7002);
//! ```

mod category;
mod codes;
mod http;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{AppError, AppResult, ErrorBody};
