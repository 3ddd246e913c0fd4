//! Special offer API
//!
//! Writes go through [`crate::offers::service`], which keeps the mirror
//! menu item in the same transaction.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, patch, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/special-offers", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/", get(handler::list_active))
        .route("/{id}", get(handler::get_by_id));

    let manage_routes = Router::new()
        .route("/all", get(handler::list_all))
        .route("/", post(handler::create))
        .route("/reconcile", post(handler::reconcile))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/toggle", patch(handler::toggle))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
