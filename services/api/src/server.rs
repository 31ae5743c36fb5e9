use crate::cli::ServeArgs;
use crate::infra::AppState;
use crate::routes::with_market_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use job_market::config::AppConfig;
use job_market::error::AppError;
use job_market::market::MarketInsightService;
use job_market::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    if config.market.adzuna.is_none() {
        warn!(provider = "adzuna", "credentials missing; provider will report as failed");
    }
    if config.market.reed_api_key.is_none() {
        warn!(provider = "reed", "credentials missing; provider will report as failed");
    }

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let insight_service = Arc::new(MarketInsightService::from_config(&config.market)?);
    let providers = insight_service.provider_names();

    let app = with_market_routes(insight_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, ?providers, "job market insights service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
