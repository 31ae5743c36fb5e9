use super::listing::UnifiedListing;
use super::providers::{JobProvider, ProviderError};
use super::query::MarketQuery;
use super::MarketError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, info, warn};

type ProviderResult = Result<Vec<UnifiedListing>, ProviderError>;

/// A provider that contributed nothing, and why.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: &'static str,
    pub error: ProviderError,
}

/// Concatenated listings from every provider that settled successfully.
#[derive(Debug, Default)]
pub struct FetchOutcome {
    pub listings: Vec<UnifiedListing>,
    pub provider_errors: Vec<ProviderFailure>,
}

impl FetchOutcome {
    pub fn failed_providers(&self) -> Vec<&'static str> {
        self.provider_errors
            .iter()
            .map(|failure| failure.provider)
            .collect()
    }
}

/// Fans a query out to every provider concurrently and waits for all of them.
pub struct MarketAggregator {
    providers: Vec<Arc<dyn JobProvider>>,
    timeout: Duration,
}

impl MarketAggregator {
    pub fn new(providers: Vec<Arc<dyn JobProvider>>, timeout: Duration) -> Self {
        Self { providers, timeout }
    }

    pub fn provider_names(&self) -> Vec<&'static str> {
        self.providers.iter().map(|provider| provider.name()).collect()
    }

    /// Never fails: a provider that errors, panics, or misses the deadline
    /// contributes zero listings and is recorded in `provider_errors`.
    ///
    /// Listings keep provider registration order. Dropping the returned future
    /// aborts any provider still in flight.
    pub async fn fetch_all(&self, query: &MarketQuery, now: DateTime<Utc>) -> FetchOutcome {
        let deadline = Instant::now() + self.timeout;

        let mut tasks = JoinSet::new();
        for (index, provider) in self.providers.iter().enumerate() {
            let provider = Arc::clone(provider);
            let query = query.clone();
            tasks.spawn(async move {
                let name = provider.name();
                let result =
                    match tokio::time::timeout_at(deadline, provider.fetch(&query, now)).await {
                        Ok(result) => result,
                        Err(_) => Err(ProviderError::Timeout { provider: name }),
                    };
                (index, result)
            });
        }

        let mut settled: Vec<Option<ProviderResult>> =
            self.providers.iter().map(|_| None).collect();
        let mut join_failures = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((index, result)) => settled[index] = Some(result),
                Err(join_error) => join_failures.push(join_error.to_string()),
            }
        }

        let mut outcome = FetchOutcome::default();
        for (provider, result) in self.providers.iter().zip(settled) {
            let provider = provider.name();
            // A slot left empty belongs to a task that panicked.
            let result = result.unwrap_or_else(|| {
                Err(ProviderError::Aborted {
                    provider,
                    reason: join_failures.join("; "),
                })
            });

            match result {
                Ok(listings) => {
                    debug!(provider, listings = listings.len(), "provider settled");
                    outcome.listings.extend(listings);
                }
                Err(error) => {
                    warn!(provider, error = %error, "provider failed; continuing without it");
                    outcome
                        .provider_errors
                        .push(ProviderFailure { provider, error });
                }
            }
        }

        info!(
            query = %query.query,
            location = %query.location,
            listings = outcome.listings.len(),
            failed = outcome.provider_errors.len(),
            "provider fan-out complete"
        );

        outcome
    }

    /// Like [`fetch_all`](Self::fetch_all), but an empty merged set is
    /// [`MarketError::NoDataAvailable`].
    pub async fn collect(
        &self,
        query: &MarketQuery,
        now: DateTime<Utc>,
    ) -> Result<FetchOutcome, MarketError> {
        let outcome = self.fetch_all(query, now).await;
        if outcome.listings.is_empty() {
            return Err(MarketError::NoDataAvailable {
                query: query.query.clone(),
                location: query.location.clone(),
                failed_providers: outcome.failed_providers(),
            });
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::TimeZone;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct FixedProvider {
        name: &'static str,
        titles: Vec<&'static str>,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl JobProvider for FixedProvider {
        fn name(&self) -> &'static str {
            self.name
        }

        async fn fetch(
            &self,
            _query: &MarketQuery,
            now: DateTime<Utc>,
        ) -> Result<Vec<UnifiedListing>, ProviderError> {
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            Ok(self
                .titles
                .iter()
                .map(|title| UnifiedListing {
                    title: title.to_string(),
                    company: self.name.to_string(),
                    location: "UK".to_string(),
                    salary_text: None,
                    contract_type: String::new(),
                    description: String::new(),
                    posted_date: now,
                })
                .collect())
        }
    }

    /// Flags `finished` only if its fetch runs to completion.
    struct TrackingProvider {
        finished: Arc<AtomicBool>,
    }

    #[async_trait]
    impl JobProvider for TrackingProvider {
        fn name(&self) -> &'static str {
            "tracking"
        }

        async fn fetch(
            &self,
            _query: &MarketQuery,
            _now: DateTime<Utc>,
        ) -> Result<Vec<UnifiedListing>, ProviderError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            self.finished.store(true, Ordering::SeqCst);
            Ok(Vec::new())
        }
    }

    struct PanickingProvider;

    #[async_trait]
    impl JobProvider for PanickingProvider {
        fn name(&self) -> &'static str {
            "panicking"
        }

        async fn fetch(
            &self,
            _query: &MarketQuery,
            _now: DateTime<Utc>,
        ) -> Result<Vec<UnifiedListing>, ProviderError> {
            panic!("provider bug");
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
    }

    fn fixed(name: &'static str, titles: Vec<&'static str>) -> Arc<dyn JobProvider> {
        Arc::new(FixedProvider {
            name,
            titles,
            delay: None,
        })
    }

    #[tokio::test]
    async fn listings_keep_provider_order() {
        let aggregator = MarketAggregator::new(
            vec![fixed("first", vec!["a", "b"]), fixed("second", vec!["c"])],
            Duration::from_secs(5),
        );

        let outcome = aggregator
            .fetch_all(&MarketQuery::new("electrician", "UK"), now())
            .await;
        let titles: Vec<_> = outcome.listings.iter().map(|l| l.title.as_str()).collect();
        assert_eq!(titles, vec!["a", "b", "c"]);
        assert!(outcome.provider_errors.is_empty());
        assert_eq!(aggregator.provider_names(), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn panicking_provider_is_isolated() {
        let aggregator = MarketAggregator::new(
            vec![
                Arc::new(PanickingProvider) as Arc<dyn JobProvider>,
                fixed("healthy", vec!["a"]),
            ],
            Duration::from_secs(5),
        );

        let outcome = aggregator
            .collect(&MarketQuery::new("electrician", "UK"), now())
            .await
            .expect("healthy provider carries the request");
        assert_eq!(outcome.listings.len(), 1);
        assert!(matches!(
            outcome.provider_errors[0].error,
            ProviderError::Aborted {
                provider: "panicking",
                ..
            }
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn slow_provider_is_dropped_at_the_deadline() {
        let slow: Arc<dyn JobProvider> = Arc::new(FixedProvider {
            name: "slow",
            titles: vec!["late"],
            delay: Some(Duration::from_secs(60)),
        });
        let aggregator = MarketAggregator::new(
            vec![slow, fixed("fast", vec!["on time"])],
            Duration::from_secs(10),
        );

        let outcome = aggregator
            .fetch_all(&MarketQuery::new("electrician", "UK"), now())
            .await;
        assert_eq!(outcome.listings.len(), 1);
        assert_eq!(outcome.listings[0].title, "on time");
        assert_eq!(outcome.failed_providers(), vec!["slow"]);
        assert!(matches!(
            outcome.provider_errors[0].error,
            ProviderError::Timeout { provider: "slow" }
        ));
    }

    #[tokio::test]
    async fn all_empty_providers_report_no_data() {
        let aggregator = MarketAggregator::new(
            vec![fixed("first", vec![]), fixed("second", vec![])],
            Duration::from_secs(5),
        );

        let error = aggregator
            .collect(&MarketQuery::new("electrician", "UK"), now())
            .await
            .expect_err("empty merged set is an error");
        match error {
            MarketError::NoDataAvailable {
                failed_providers, ..
            } => assert!(failed_providers.is_empty()),
            other => panic!("expected no-data error, got {other:?}"),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_the_fan_out_cancels_in_flight_providers() {
        let finished = Arc::new(AtomicBool::new(false));
        let tracking: Arc<dyn JobProvider> = Arc::new(TrackingProvider {
            finished: Arc::clone(&finished),
        });
        let aggregator = MarketAggregator::new(vec![tracking], Duration::from_secs(120));

        let abandoned = tokio::time::timeout(
            Duration::from_secs(1),
            aggregator.fetch_all(&MarketQuery::new("electrician", "UK"), now()),
        )
        .await;
        assert!(abandoned.is_err());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert!(!finished.load(Ordering::SeqCst));
    }
}
