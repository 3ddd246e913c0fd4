//! Coupon API

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/coupons", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/active", get(handler::list_active))
        .route("/validate", post(handler::validate));

    let manage_routes = Router::new()
        .route("/", get(handler::list_all).post(handler::create))
        .route("/{id}", put(handler::update).delete(handler::delete))
        .route("/{id}/use", post(handler::record_usage))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(manage_routes)
}
