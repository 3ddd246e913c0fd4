//! Analytics API

use axum::{
    Json, Router,
    extract::{Query, State},
    middleware,
    routing::get,
};
use shared::models::{AnalyticsPeriod, AnalyticsQuery, AnalyticsSummary};

use crate::analytics;
use crate::auth::require_admin;
use crate::core::ServerState;
use crate::utils::AppResult;

pub fn router() -> Router<ServerState> {
    Router::new()
        .route("/api/analytics", get(summary))
        .layer(middleware::from_fn(require_admin))
}

/// GET /api/analytics?period=daily|weekly|monthly|yearly
async fn summary(
    State(state): State<ServerState>,
    Query(query): Query<AnalyticsQuery>,
) -> AppResult<Json<AnalyticsSummary>> {
    let period = AnalyticsPeriod::parse_or_default(query.period.as_deref());
    let report = analytics::get_summary(
        &state.pool,
        period,
        shared::util::now_millis(),
        state.timezone(),
    )
    .await?;
    Ok(Json(report))
}
