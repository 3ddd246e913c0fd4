//! Order API
//!
//! | Path | Method | Access |
//! |------|--------|--------|
//! | /api/orders | POST | user |
//! | /api/orders/my-orders | GET | user |
//! | /api/orders/{id} | GET | owner / admin |
//! | /api/orders/{id}/cancel | PATCH | owner / admin |
//! | /api/orders | GET | admin |
//! | /api/orders/status/{status} | GET | admin |
//! | /api/orders/{id}/status | PUT | admin |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/orders", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", post(handler::create))
        .route("/my-orders", get(handler::list_mine))
        .route("/{id}", get(handler::get_by_id))
        .route("/{id}/cancel", patch(handler::cancel));

    let manage_routes = Router::new()
        .route("/", get(handler::list_all))
        .route("/status/{status}", get(handler::list_by_status))
        .route("/{id}/status", put(handler::update_status))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(manage_routes)
}
