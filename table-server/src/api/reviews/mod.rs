//! Review API
//!
//! The approved list is public; everything else needs a token.

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/reviews", routes())
}

fn routes() -> Router<ServerState> {
    let user_routes = Router::new()
        .route("/", get(handler::list_approved).post(handler::create))
        .route("/my-reviews", get(handler::list_mine))
        .route("/{id}", put(handler::update).delete(handler::delete));

    let manage_routes = Router::new()
        .route("/all", get(handler::list_all))
        .route("/{id}/approve", put(handler::set_approval))
        .layer(middleware::from_fn(require_admin));

    user_routes.merge(manage_routes)
}
