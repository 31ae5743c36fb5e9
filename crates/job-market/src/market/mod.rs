//! Job-market aggregation: provider adapters, concurrent fan-out, and the
//! statistics computed over the merged listing set.

pub mod aggregator;
pub mod listing;
pub mod providers;
mod query;
pub mod report;
pub mod service;
pub mod snapshot;
pub mod stats;

pub use aggregator::{FetchOutcome, MarketAggregator, ProviderFailure};
pub use listing::{SalaryFigure, UnifiedListing};
pub use providers::{JobProvider, ProviderError};
pub use query::MarketQuery;
pub use report::views::MarketInsightsResponse;
pub use service::MarketInsightService;
pub use stats::{compute, MarketMetrics};

/// Failures surfaced to callers of the aggregation.
#[derive(Debug, thiserror::Error)]
pub enum MarketError {
    /// Every provider came back empty or failed; distinct from a market with no jobs.
    #[error(
        "no job listings available for '{query}' in '{location}': no provider returned usable data"
    )]
    NoDataAvailable {
        query: String,
        location: String,
        failed_providers: Vec<&'static str>,
    },
    #[error("unable to build provider HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
