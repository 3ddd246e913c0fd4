//! Order lifecycle
//!
//! ```text
//! pending -> preparing -> ready -> served -> paid
//!    \          \
//!     `----------`-----> cancelled
//! ```
//!
//! Admins move orders forward (skipping steps is allowed). Cancellation
//! is only possible from `pending` or `preparing`. `paid` and
//! `cancelled` are terminal.

use shared::models::OrderStatus;
use thiserror::Error;

use crate::utils::{AppError, ErrorCode};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Invalid order status: {0}")]
    UnknownStatus(String),
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::InvalidTransition { from, to } => {
                AppError::invalid_transition(from.as_str(), to.as_str())
            }
            LifecycleError::UnknownStatus(value) => {
                AppError::with_message(ErrorCode::OrderStatusInvalid, format!("Invalid order status: {value}"))
                    .with_detail("status", value)
            }
        }
    }
}

/// Position on the forward path (`None` for cancelled)
fn stage(status: OrderStatus) -> Option<u8> {
    match status {
        OrderStatus::Pending => Some(0),
        OrderStatus::Preparing => Some(1),
        OrderStatus::Ready => Some(2),
        OrderStatus::Served => Some(3),
        OrderStatus::Paid => Some(4),
        OrderStatus::Cancelled => None,
    }
}

pub fn is_terminal(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Paid | OrderStatus::Cancelled)
}

pub fn is_cancellable(status: OrderStatus) -> bool {
    matches!(status, OrderStatus::Pending | OrderStatus::Preparing)
}

/// Parse a status string from the API
pub fn parse_status(value: &str) -> Result<OrderStatus, LifecycleError> {
    OrderStatus::parse(value).ok_or_else(|| LifecycleError::UnknownStatus(value.to_string()))
}

/// Validate an admin status change
pub fn check_transition(from: OrderStatus, to: OrderStatus) -> Result<(), LifecycleError> {
    let allowed = match (stage(from), stage(to)) {
        (Some(current), Some(next)) => next > current,
        (Some(_), None) => is_cancellable(from),
        (None, _) => false,
    };
    if allowed {
        Ok(())
    } else {
        Err(LifecycleError::InvalidTransition { from, to })
    }
}

/// Validate a cancellation
pub fn check_cancel(from: OrderStatus) -> Result<(), LifecycleError> {
    check_transition(from, OrderStatus::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use OrderStatus::*;

    #[test]
    fn test_forward_transitions() {
        assert!(check_transition(Pending, Preparing).is_ok());
        assert!(check_transition(Preparing, Ready).is_ok());
        assert!(check_transition(Ready, Served).is_ok());
        assert!(check_transition(Served, Paid).is_ok());
        // skipping ahead is allowed
        assert!(check_transition(Pending, Paid).is_ok());
    }

    #[test]
    fn test_backward_and_same_rejected() {
        assert!(check_transition(Ready, Pending).is_err());
        assert!(check_transition(Served, Served).is_err());
        assert!(check_transition(Paid, Served).is_err());
    }

    #[test]
    fn test_terminal_states() {
        for to in OrderStatus::ALL {
            assert!(check_transition(Paid, to).is_err());
            assert!(check_transition(Cancelled, to).is_err());
        }
        assert!(is_terminal(Paid));
        assert!(is_terminal(Cancelled));
        assert!(!is_terminal(Served));
    }

    #[test]
    fn test_cancel_matrix() {
        assert!(check_cancel(Pending).is_ok());
        assert!(check_cancel(Preparing).is_ok());
        for from in [Ready, Served, Paid, Cancelled] {
            assert_eq!(
                check_cancel(from),
                Err(LifecycleError::InvalidTransition {
                    from,
                    to: Cancelled
                })
            );
        }
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(parse_status("ready"), Ok(Ready));
        assert_eq!(
            parse_status("delivered"),
            Err(LifecycleError::UnknownStatus("delivered".into()))
        );
    }

    #[test]
    fn test_error_mapping() {
        let err: AppError = LifecycleError::InvalidTransition {
            from: Paid,
            to: Cancelled,
        }
        .into();
        assert_eq!(err.code, ErrorCode::OrderInvalidTransition);
        assert_eq!(err.http_status(), http::StatusCode::CONFLICT);
    }
}
