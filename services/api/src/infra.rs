use job_market::market::MarketInsightService;
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) type SharedInsightService = Arc<MarketInsightService>;

/// Request body/query string; both fields fall back to configured defaults.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct InsightsRequest {
    #[serde(default)]
    pub(crate) query: Option<String>,
    #[serde(default)]
    pub(crate) location: Option<String>,
}
