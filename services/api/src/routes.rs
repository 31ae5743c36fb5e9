use crate::infra::{AppState, InsightsRequest, SharedInsightService};
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json, Router};
use job_market::error::AppError;
use job_market::market::MarketInsightsResponse;
use serde_json::json;

pub(crate) fn market_router(service: SharedInsightService) -> Router {
    Router::new()
        .route(
            "/api/v1/market/insights",
            get(insights_query_endpoint).post(insights_endpoint),
        )
        .with_state(service)
}

pub(crate) fn with_market_routes(service: SharedInsightService) -> Router {
    market_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn insights_endpoint(
    State(service): State<SharedInsightService>,
    Json(request): Json<InsightsRequest>,
) -> Result<Json<MarketInsightsResponse>, AppError> {
    market_insights(&service, request).await
}

pub(crate) async fn insights_query_endpoint(
    State(service): State<SharedInsightService>,
    Query(request): Query<InsightsRequest>,
) -> Result<Json<MarketInsightsResponse>, AppError> {
    market_insights(&service, request).await
}

async fn market_insights(
    service: &SharedInsightService,
    request: InsightsRequest,
) -> Result<Json<MarketInsightsResponse>, AppError> {
    let query = service.resolve_query(request.query, request.location);
    let insights = service.insights(&query).await?;
    Ok(Json(insights))
}
