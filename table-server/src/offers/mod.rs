//! Special offers
//!
//! Every offer owns exactly one mirror menu item so it can be ordered like
//! any other catalog entry.
//!
//! - [`mirror`] - badge / discount derivation and mirror comparison
//! - [`service`] - transactional offer + mirror writes
//! - [`reconcile`] - standing consistency pass

pub mod mirror;
pub mod reconcile;
pub mod service;

pub use reconcile::reconcile;
