//! Authentication and authorization
//!
//! - [`JwtService`] - token issuing / validation
//! - [`CurrentUser`] - request user context
//! - [`require_auth`] / [`require_admin`] - middleware
//! - [`hash_password`] / [`verify_password`] - argon2 helpers

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{is_public_route, require_admin, require_auth};
pub use password::{hash_password, verify_password};
