//! Table Server - restaurant table-ordering backend
//!
//! # Module layout
//!
//! ```text
//! table-server/src/
//! ├── core/        # config, state, server bootstrap
//! ├── auth/        # JWT, argon2 passwords, extractor, middleware
//! ├── db/          # SQLite pool, migrations, repositories
//! ├── pricing/     # money helpers, discount sources, order pricer
//! ├── orders/      # order lifecycle + order placement
//! ├── offers/      # special offer mirror items + reconciliation
//! ├── analytics/   # read-side order summaries
//! ├── media/       # image stores (S3 / local disk)
//! ├── api/         # HTTP routes and handlers
//! └── utils/       # errors, logging, validation, time
//! ```

pub mod analytics;
pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod media;
pub mod offers;
pub mod orders;
pub mod pricing;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export unified error types from shared
pub use utils::{ErrorBody, ErrorCategory, ErrorCode};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
