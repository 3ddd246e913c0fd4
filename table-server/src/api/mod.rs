//! API routes
//!
//! # Structure
//!
//! - [`health`] - liveness + database ping
//! - [`auth`] - register, login, current user
//! - [`menu`] - menu items
//! - [`orders`] - order placement and status
//! - [`coupons`] - coupon administration and validation
//! - [`combos`] - combo deals
//! - [`offers`] - special offers (mirror menu items)
//! - [`reviews`] - customer reviews
//! - [`analytics`] - order summaries
//! - [`upload`] - image upload / delete / local serving
//!
//! Each resource exposes `router()`; admin-only groups carry
//! [`require_admin`](crate::auth::require_admin) as a layer, while
//! [`require_auth`](crate::auth::require_auth) runs once for the whole app.

pub mod analytics;
pub mod auth;
pub mod combos;
pub mod coupons;
pub mod health;
pub mod menu;
pub mod offers;
pub mod orders;
pub mod reviews;
pub mod upload;

use std::time::Instant;

use axum::{Router, middleware};
use http::{HeaderName, HeaderValue};
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;

use crate::auth::require_auth;
use crate::core::ServerState;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Snowflake request IDs
#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        let id = shared::util::snowflake_id().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// HTTP access log
async fn log_request(
    request: http::Request<axum::body::Body>,
    next: middleware::Next,
) -> http::Response<axum::body::Body> {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let started = Instant::now();

    let response = next.run(request).await;

    tracing::info!(
        target: "http_access",
        method = %method,
        uri = %uri,
        status = response.status().as_u16(),
        latency_ms = started.elapsed().as_millis() as u64,
        "request"
    );

    response
}

/// All routes, no middleware, no state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(menu::router())
        .merge(orders::router())
        .merge(coupons::router())
        .merge(combos::router())
        .merge(offers::router())
        .merge(reviews::router())
        .merge(analytics::router())
        .merge(upload::router())
}

/// Fully configured application
///
/// Used by the HTTP server and by integration tests (`oneshot`).
pub fn build_app(state: &ServerState) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    build_router()
        // JWT authentication, skips public routes, injects CurrentUser
        .layer(middleware::from_fn_with_state(state.clone(), require_auth))
        .with_state(state.clone())
        .layer(
            // top to bottom = outermost to innermost; the access log sees the final status
            ServiceBuilder::new()
                .layer(middleware::from_fn(log_request))
                .layer(SetRequestIdLayer::new(request_id.clone(), XRequestId))
                .layer(PropagateRequestIdLayer::new(request_id))
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(CorsLayer::permissive()),
        )
}
