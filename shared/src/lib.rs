//! Shared types for the table-ordering backend
//!
//! Common types used by the server and its clients: the unified error
//! system, error response body, domain models and small utilities.

pub mod error;
pub mod models;
pub mod util;

// Re-exports
pub use axum::{Json, body};
pub use error::{AppError, ErrorBody, AppResult, ErrorCategory, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
