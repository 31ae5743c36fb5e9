use super::fields::{posted_or_now, text};
use super::{read_json, JobProvider, ProviderError};
use crate::config::AdzunaCredentials;
use crate::market::listing::{salary_range_text, UnifiedListing};
use crate::market::query::MarketQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

const PROVIDER: &str = "adzuna";
const SEARCH_URL: &str = "https://api.adzuna.com/v1/api/jobs/gb/search/1";

/// Search response envelope. Items stay untyped until decoded one at a time.
#[derive(Debug, Default, Deserialize)]
pub struct AdzunaSearchResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct AdzunaJob {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub company: Option<AdzunaDisplayName>,
    #[serde(default)]
    pub location: Option<AdzunaDisplayName>,
    #[serde(default)]
    pub salary_min: Option<f64>,
    #[serde(default)]
    pub salary_max: Option<f64>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub created: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AdzunaDisplayName {
    #[serde(default)]
    pub display_name: Option<String>,
}

impl AdzunaJob {
    fn into_listing(self, now: DateTime<Utc>) -> UnifiedListing {
        UnifiedListing {
            title: text(self.title),
            company: text(self.company.and_then(|company| company.display_name)),
            location: text(self.location.and_then(|location| location.display_name)),
            salary_text: salary_range_text(self.salary_min, self.salary_max),
            contract_type: text(self.contract_type),
            description: text(self.description),
            posted_date: posted_or_now(self.created.as_deref(), now),
        }
    }
}

/// Converts an Adzuna search payload, skipping items that fail to decode.
pub fn normalize(payload: AdzunaSearchResponse, now: DateTime<Utc>) -> Vec<UnifiedListing> {
    payload
        .results
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<AdzunaJob>(item) {
            Ok(job) => Some(job.into_listing(now)),
            Err(err) => {
                debug!(provider = PROVIDER, error = %err, "skipping malformed listing");
                None
            }
        })
        .collect()
}

pub struct AdzunaClient {
    http: reqwest::Client,
    credentials: Option<AdzunaCredentials>,
    results_per_page: u32,
    search_url: String,
}

impl AdzunaClient {
    pub fn new(
        http: reqwest::Client,
        credentials: Option<AdzunaCredentials>,
        results_per_page: u32,
    ) -> Self {
        Self {
            http,
            credentials,
            results_per_page,
            search_url: SEARCH_URL.to_string(),
        }
    }

    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }

    fn query_params(
        &self,
        credentials: &AdzunaCredentials,
        query: &MarketQuery,
    ) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("app_id", credentials.app_id.clone()),
            ("app_key", credentials.app_key.clone()),
            ("results_per_page", self.results_per_page.to_string()),
            ("what", query.query.clone()),
            ("content-type", "application/json".to_string()),
        ];
        if !query.is_nationwide() {
            params.push(("where", query.location.clone()));
        }
        params
    }
}

#[async_trait]
impl JobProvider for AdzunaClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(
        &self,
        query: &MarketQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<UnifiedListing>, ProviderError> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(ProviderError::MissingCredentials { provider: PROVIDER })?;

        let response = self
            .http
            .get(&self.search_url)
            .query(&self.query_params(credentials, query))
            .send()
            .await?;

        let payload: AdzunaSearchResponse = read_json(PROVIDER, response).await?;
        Ok(normalize(payload, now))
    }
}
