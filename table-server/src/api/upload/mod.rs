//! Image upload routes
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/upload | POST (multipart `file`) | admin |
//! | /api/upload/{public_id} | DELETE | admin |
//! | /uploads/{file} | GET | public (local storage only) |

mod handler;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{delete, get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;
use crate::media::MAX_FILE_SIZE;

/// Multipart framing on top of the file itself
const MULTIPART_OVERHEAD: usize = 64 * 1024;

pub fn router() -> Router<ServerState> {
    let manage_routes = Router::new()
        .route(
            "/api/upload",
            post(handler::upload).layer(DefaultBodyLimit::max(MAX_FILE_SIZE + MULTIPART_OVERHEAD)),
        )
        .route("/api/upload/{public_id}", delete(handler::remove))
        .layer(middleware::from_fn(require_admin));

    Router::new()
        .route("/uploads/{file}", get(handler::serve_local))
        .merge(manage_routes)
}
