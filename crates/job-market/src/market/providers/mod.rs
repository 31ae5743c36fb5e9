//! Provider clients and the adapters that turn their payloads into [`UnifiedListing`]s.

pub mod adzuna;
pub(crate) mod fields;
pub mod reed;

use super::listing::UnifiedListing;
use super::query::MarketQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub use adzuna::AdzunaClient;
pub use reed::ReedClient;

/// One upstream job-listing source.
///
/// `now` is the processing instant adapters substitute for missing posting dates.
#[async_trait]
pub trait JobProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch(
        &self,
        query: &MarketQuery,
        now: DateTime<Utc>,
    ) -> Result<Vec<UnifiedListing>, ProviderError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("{provider} credentials are not configured")]
    MissingCredentials { provider: &'static str },
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{provider} responded with HTTP {status}")]
    Status { provider: &'static str, status: u16 },
    #[error("{provider} returned an unreadable body: {source}")]
    Decode {
        provider: &'static str,
        source: serde_json::Error,
    },
    #[error("{provider} did not respond before the deadline")]
    Timeout { provider: &'static str },
    #[error("{provider} task aborted: {reason}")]
    Aborted {
        provider: &'static str,
        reason: String,
    },
}

/// Builds the HTTP client shared by the live providers.
///
/// Idle connections are not pooled: each request starts and ends cleanly.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!("job-market/", env!("CARGO_PKG_VERSION")))
        .timeout(timeout)
        .pool_max_idle_per_host(0)
        .build()
}

async fn read_json<T>(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<T, ProviderError>
where
    T: serde::de::DeserializeOwned,
{
    let status = response.status();
    if !status.is_success() {
        return Err(ProviderError::Status {
            provider,
            status: status.as_u16(),
        });
    }

    let body = response.bytes().await?;
    serde_json::from_slice(&body).map_err(|source| ProviderError::Decode { provider, source })
}
