//! Utility module
//!
//! - [`AppError`] - application error type (from shared::error)
//! - [`ErrorBody`] - error response body (from shared::error)
//! - logging, input validation, business time zone helpers

pub mod error;
pub mod logger;
pub mod time;
pub mod validation;

pub use error::{AppError, ErrorBody, AppResult, ErrorCategory, ErrorCode};
