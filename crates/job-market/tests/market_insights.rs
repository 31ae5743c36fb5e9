use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use job_market::config::QueryDefaults;
use job_market::market::{
    JobProvider, MarketAggregator, MarketError, MarketInsightService, MarketQuery, ProviderError,
    UnifiedListing,
};
use std::sync::Arc;

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 10, 1, 12, 0, 0).unwrap()
}

fn listing(title: &str, salary: Option<&str>, age_days: i64) -> UnifiedListing {
    UnifiedListing {
        title: title.to_string(),
        company: "Spark Services".to_string(),
        location: "UK".to_string(),
        salary_text: salary.map(str::to_string),
        contract_type: "permanent".to_string(),
        description: String::new(),
        posted_date: now() - Duration::days(age_days),
    }
}

struct StubProvider {
    name: &'static str,
    listings: Vec<UnifiedListing>,
}

#[async_trait]
impl JobProvider for StubProvider {
    fn name(&self) -> &'static str {
        self.name
    }

    async fn fetch(
        &self,
        _query: &MarketQuery,
        _now: DateTime<Utc>,
    ) -> Result<Vec<UnifiedListing>, ProviderError> {
        Ok(self.listings.clone())
    }
}

struct FailingProvider;

#[async_trait]
impl JobProvider for FailingProvider {
    fn name(&self) -> &'static str {
        "failing"
    }

    async fn fetch(
        &self,
        _query: &MarketQuery,
        _now: DateTime<Utc>,
    ) -> Result<Vec<UnifiedListing>, ProviderError> {
        Err(ProviderError::Status {
            provider: "failing",
            status: 502,
        })
    }
}

fn service(providers: Vec<Arc<dyn JobProvider>>) -> MarketInsightService {
    MarketInsightService::new(
        MarketAggregator::new(providers, std::time::Duration::from_secs(5)),
        QueryDefaults::default(),
    )
}

fn failing() -> Arc<dyn JobProvider> {
    Arc::new(FailingProvider)
}

fn stub(name: &'static str, listings: Vec<UnifiedListing>) -> Arc<dyn JobProvider> {
    Arc::new(StubProvider { name, listings })
}

#[tokio::test]
async fn electrician_scenario_matches_expected_distribution() {
    let provider_a = stub(
        "provider-a",
        vec![
            listing("Electrician", Some("£25,000"), 1),
            listing("Electrician", Some("£30,000 - £40,000"), 3),
            listing("Electrician", Some("£55,000"), 9),
        ],
    );
    let provider_b = stub("provider-b", Vec::new());
    let service = service(vec![provider_a, provider_b]);

    let query = service.resolve_query(None, None);
    assert_eq!(query, MarketQuery::new("electrician", "UK"));

    let response = service
        .insights_at(&query, now())
        .await
        .expect("one provider has data");

    assert_eq!(response.salary_stats.median, 35_000);
    assert_eq!(response.salary_stats.count, 3);
    assert_eq!(response.salary_stats.min, 25_000);
    assert_eq!(response.salary_stats.max, 55_000);

    let buckets: Vec<usize> = response.salary_buckets.iter().map(|b| b.count).collect();
    assert_eq!(buckets, vec![0, 1, 1, 1, 0]);
    assert_eq!(response.jobs_count, 3);

    assert_eq!(response.freshness.last_48h_pct, 33);
    assert_eq!(response.freshness.recent_7d_pct, 67);
    assert_eq!(response.freshness.median_days, 3);
    assert_eq!(response.job_type_mix.len(), 1);
    assert_eq!(response.job_type_mix[0].label, "permanent");
}

#[tokio::test]
async fn bucket_and_mix_totals_are_consistent() {
    let listings = vec![
        listing("Senior Electrician - remote design", Some("£61,000"), 0),
        listing("Electrical Apprentice", Some("£14,000 - £18,000"), 2),
        listing("Hybrid Intermediate Engineer", None, 4),
        listing("Junior Electrician", Some("Competitive"), 6),
        listing("Approved Electrician", Some("£38,000"), 40),
    ];
    let service = service(vec![stub("only", listings)]);

    let response = service
        .insights_at(&MarketQuery::new("electrician", "UK"), now())
        .await
        .expect("listings present");

    let bucket_total: usize = response.salary_buckets.iter().map(|b| b.count).sum();
    assert_eq!(bucket_total, response.salary_stats.count);
    assert_eq!(response.salary_stats.count, 3);

    let experience_total: usize = response.experience_mix.iter().map(|e| e.count).sum();
    let pattern_total: usize = response.working_pattern.iter().map(|p| p.count).sum();
    assert_eq!(experience_total, response.jobs_count);
    assert_eq!(pattern_total, response.jobs_count);

    let experience: Vec<(&str, usize)> = response
        .experience_mix
        .iter()
        .map(|entry| (entry.label.as_str(), entry.count))
        .collect();
    assert_eq!(
        experience,
        vec![
            ("Apprentice/Trainee", 1),
            ("Senior", 1),
            ("Mid", 1),
            ("Entry", 1),
            ("Unspecified", 1),
        ]
    );

    let patterns: Vec<(&str, usize)> = response
        .working_pattern
        .iter()
        .map(|entry| (entry.label.as_str(), entry.count))
        .collect();
    assert_eq!(patterns, vec![("Remote", 1), ("Hybrid", 1), ("On-site", 3)]);

    assert!(response.freshness.last_48h_pct <= 100);
    assert!(response.freshness.recent_7d_pct <= 100);
}

#[tokio::test]
async fn empty_providers_surface_no_data_instead_of_zero_metrics() {
    let service = service(vec![stub("a", Vec::new()), stub("b", Vec::new())]);

    let error = service
        .insights_at(&MarketQuery::new("electrician", "UK"), now())
        .await
        .expect_err("no listings anywhere");
    assert!(matches!(error, MarketError::NoDataAvailable { .. }));
}

#[tokio::test]
async fn failing_provider_does_not_affect_healthy_results() {
    let healthy: Vec<UnifiedListing> = (0..10)
        .map(|index| listing("Maintenance Electrician", Some("£36,000"), index))
        .collect();
    let service = service(vec![failing(), stub("healthy", healthy)]);

    let response = service
        .insights_at(&MarketQuery::new("electrician", "UK"), now())
        .await
        .expect("healthy provider carries the request");

    assert_eq!(response.jobs_count, 10);
    assert_eq!(response.salary_stats.count, 10);
    assert_eq!(response.top_companies.len(), 1);
    assert_eq!(response.top_companies[0].name, "Spark Services");
    assert_eq!(response.top_companies[0].count, 10);
    assert_eq!(response.top_skills[0].name, "Maintenance");
}

#[tokio::test]
async fn failing_providers_only_report_their_names() {
    let service = service(vec![failing(), stub("empty", Vec::new())]);

    match service
        .insights_at(&MarketQuery::new("electrician", "Leeds"), now())
        .await
    {
        Err(MarketError::NoDataAvailable {
            query,
            location,
            failed_providers,
        }) => {
            assert_eq!(query, "electrician");
            assert_eq!(location, "Leeds");
            assert_eq!(failed_providers, vec!["failing"]);
        }
        other => panic!("expected no-data error, got {other:?}"),
    }
}
