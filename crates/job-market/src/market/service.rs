use super::aggregator::MarketAggregator;
use super::providers::{http_client, AdzunaClient, JobProvider, ReedClient};
use super::query::MarketQuery;
use super::report::views::MarketInsightsResponse;
use super::{stats, MarketError};
use crate::config::{MarketConfig, QueryDefaults};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::info;

/// Entry point for one fetch-and-compute cycle: fan out, merge, compute, assemble.
pub struct MarketInsightService {
    aggregator: MarketAggregator,
    defaults: QueryDefaults,
}

impl MarketInsightService {
    pub fn new(aggregator: MarketAggregator, defaults: QueryDefaults) -> Self {
        Self {
            aggregator,
            defaults,
        }
    }

    /// Registers the live providers. Missing credentials do not fail here.
    pub fn from_config(config: &MarketConfig) -> Result<Self, MarketError> {
        let http = http_client(config.fetch_timeout).map_err(MarketError::HttpClient)?;

        let providers: Vec<Arc<dyn JobProvider>> = vec![
            Arc::new(AdzunaClient::new(
                http.clone(),
                config.adzuna.clone(),
                config.results_per_provider,
            )),
            Arc::new(ReedClient::new(
                http,
                config.reed_api_key.clone(),
                config.results_per_provider,
            )),
        ];

        Ok(Self::new(
            MarketAggregator::new(providers, config.fetch_timeout),
            config.defaults.clone(),
        ))
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.aggregator.provider_names()
    }

    pub fn resolve_query(&self, query: Option<String>, location: Option<String>) -> MarketQuery {
        MarketQuery::resolve(query, location, &self.defaults)
    }

    pub async fn insights(
        &self,
        query: &MarketQuery,
    ) -> Result<MarketInsightsResponse, MarketError> {
        self.insights_at(query, Utc::now()).await
    }

    pub async fn insights_at(
        &self,
        query: &MarketQuery,
        now: DateTime<Utc>,
    ) -> Result<MarketInsightsResponse, MarketError> {
        let outcome = self.aggregator.collect(query, now).await?;
        let metrics = stats::compute(&outcome.listings, now);

        info!(
            query = %query.query,
            location = %query.location,
            jobs = metrics.jobs_count,
            salaried = metrics.salary.count,
            "market insights computed"
        );

        Ok(metrics.to_response())
    }
}
