use crate::config::ConfigError;
use crate::market::snapshot::SnapshotError;
use crate::market::MarketError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("telemetry error: {0}")]
    Telemetry(#[from] TelemetryError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Market(#[from] MarketError),
    #[error("{0}")]
    Snapshot(#[from] SnapshotError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Market(MarketError::NoDataAvailable { .. }) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            AppError::Snapshot(_) => StatusCode::BAD_REQUEST,
            AppError::Market(MarketError::HttpClient(_))
            | AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}
