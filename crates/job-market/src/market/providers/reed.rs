use super::fields::{posted_or_now, text};
use super::{read_json, JobProvider, ProviderError};
use crate::market::listing::{salary_range_text, UnifiedListing};
use crate::market::query::MarketQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

const PROVIDER: &str = "reed";
const SEARCH_URL: &str = "https://www.reed.co.uk/api/1.0/search";

#[derive(Debug, Default, Deserialize)]
pub struct ReedSearchResponse {
    #[serde(default)]
    pub results: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReedJob {
    #[serde(default)]
    pub job_title: Option<String>,
    #[serde(default)]
    pub employer_name: Option<String>,
    #[serde(default)]
    pub location_name: Option<String>,
    #[serde(default)]
    pub minimum_salary: Option<f64>,
    #[serde(default)]
    pub maximum_salary: Option<f64>,
    #[serde(default)]
    pub contract_type: Option<String>,
    #[serde(default)]
    pub job_description: Option<String>,
    /// `dd/mm/yyyy`
    #[serde(default)]
    pub date: Option<String>,
}

impl ReedJob {
    fn into_listing(self, now: DateTime<Utc>) -> UnifiedListing {
        UnifiedListing {
            title: text(self.job_title),
            company: text(self.employer_name),
            location: text(self.location_name),
            salary_text: salary_range_text(self.minimum_salary, self.maximum_salary),
            contract_type: text(self.contract_type),
            description: text(self.job_description),
            posted_date: posted_or_now(self.date.as_deref(), now),
        }
    }
}

pub fn normalize(payload: ReedSearchResponse, now: DateTime<Utc>) -> Vec<UnifiedListing> {
    payload
        .results
        .into_iter()
        .filter_map(|item| match serde_json::from_value::<ReedJob>(item) {
            Ok(job) => Some(job.into_listing(now)),
            Err(err) => {
                debug!(provider = PROVIDER, error = %err, "skipping malformed listing");
                None
            }
        })
        .collect()
}

/// Reed authenticates with HTTP Basic: the API key is the username, the password is empty.
pub struct ReedClient {
    http: reqwest::Client,
    api_key: Option<String>,
    results_to_take: u32,
    search_url: String,
}

impl ReedClient {
    pub fn new(http: reqwest::Client, api_key: Option<String>, results_to_take: u32) -> Self {
        Self {
            http,
            api_key,
            results_to_take,
            search_url: SEARCH_URL.to_string(),
        }
    }

    pub fn with_search_url(mut self, url: impl Into<String>) -> Self {
        self.search_url = url.into();
        self
    }
}

#[async_trait]
impl JobProvider for ReedClient {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    async fn fetch(
        &self,
        query: &MarketQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<UnifiedListing>, ProviderError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(ProviderError::MissingCredentials { provider: PROVIDER })?;

        let params = [
            ("keywords", query.query.clone()),
            ("locationName", query.location.clone()),
            ("resultsToTake", self.results_to_take.to_string()),
        ];

        let response = self
            .http
            .get(&self.search_url)
            .basic_auth(api_key, Some(""))
            .query(&params)
            .send()
            .await?;

        let payload: ReedSearchResponse = read_json(PROVIDER, response).await?;
        Ok(normalize(payload, now))
    }
}
