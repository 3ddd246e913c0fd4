//! Orders
//!
//! - [`lifecycle`] - status state machine
//! - [`service`] - placement (pricing + coupon usage in one transaction),
//!   cancellation and admin status changes

pub mod lifecycle;
pub mod service;

pub use lifecycle::LifecycleError;
pub use service::OrderPolicy;
