//! `AppError` and its wire form

use std::collections::HashMap;

use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::category::ErrorCategory;
use super::codes::ErrorCode;

/// Error returned by every handler
///
/// `message` is what the client sees; `details` carries machine-readable
/// context such as the offending field or the rejected status pair.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Error with the code's default message
    pub fn new(code: ErrorCode) -> Self {
        Self::with_message(code, code.message())
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach one detail entry (later keys overwrite earlier ones)
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InvalidRequest, msg)
    }

    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    pub fn invalid_credentials() -> Self {
        Self::new(ErrorCode::InvalidCredentials)
    }

    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    pub fn token_expired() -> Self {
        Self::new(ErrorCode::TokenExpired)
    }

    /// Authenticated, but not allowed to touch this resource
    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::PermissionDenied, msg)
    }

    pub fn admin_required() -> Self {
        Self::new(ErrorCode::AdminRequired)
    }

    /// Order status change outside the lifecycle graph (409)
    pub fn invalid_transition(from: impl Into<String>, to: impl Into<String>) -> Self {
        let (from, to) = (from.into(), to.into());
        Self::with_message(
            ErrorCode::OrderInvalidTransition,
            format!("Cannot change order status from {from} to {to}"),
        )
        .with_detail("from", from)
        .with_detail("to", to)
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::InternalError, msg)
    }

    pub fn database(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::DatabaseError, msg)
    }
}

/// JSON body of an error response: `{ "code", "message", "details"? }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

impl ErrorBody {
    /// Code back to [`ErrorCode`]; unknown numbers read as internal errors
    pub fn error_code(&self) -> ErrorCode {
        ErrorCode::try_from(self.code).unwrap_or(ErrorCode::InternalError)
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let category = self.code.category();
        if category == ErrorCategory::System {
            tracing::error!(code = %self.code, message = %self.message, "System error occurred");
        } else {
            tracing::debug!(code = %self.code, category = category.name(), "Request rejected");
        }
        (self.http_status(), axum::Json(ErrorBody::from(&self))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_message() {
        let err = AppError::new(ErrorCode::CouponExpired);
        assert_eq!(err.to_string(), "This coupon has expired");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_details_accumulate() {
        let err = AppError::validation("Comment is required")
            .with_detail("field", "comment")
            .with_detail("max", 2000);
        let details = err.details.unwrap();
        assert_eq!(details["field"], "comment");
        assert_eq!(details["max"], 2000);
    }

    #[test]
    fn test_constructor_statuses() {
        assert_eq!(AppError::not_authenticated().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::token_expired().http_status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::admin_required().http_status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::forbidden("not yours").http_status(), StatusCode::FORBIDDEN);
        assert_eq!(AppError::database("down").http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::invalid_request("bad").http_status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_invalid_transition_carries_states() {
        let err = AppError::invalid_transition("served", "cancelled");
        assert_eq!(err.code, ErrorCode::OrderInvalidTransition);
        assert_eq!(err.http_status(), StatusCode::CONFLICT);
        assert_eq!(err.message, "Cannot change order status from served to cancelled");
        let details = err.details.unwrap();
        assert_eq!(details["from"], "served");
        assert_eq!(details["to"], "cancelled");
    }

    #[test]
    fn test_error_body_shape() {
        let err = AppError::new(ErrorCode::OrderNotFound).with_detail("id", 123);
        let json = serde_json::to_value(ErrorBody::from(&err)).unwrap();
        assert_eq!(json["code"], 4001);
        assert_eq!(json["details"]["id"], 123);

        let bare = serde_json::to_value(ErrorBody::from(&AppError::new(ErrorCode::OrderEmpty))).unwrap();
        assert!(bare.get("details").is_none());
    }

    #[test]
    fn test_error_body_round_trip_code() {
        let body: ErrorBody = serde_json::from_str(r#"{"code":5004,"message":"used up"}"#).unwrap();
        assert_eq!(body.error_code(), ErrorCode::CouponUsageExceeded);

        let unknown: ErrorBody = serde_json::from_str(r#"{"code":4242,"message":"?"}"#).unwrap();
        assert_eq!(unknown.error_code(), ErrorCode::InternalError);
    }
}
