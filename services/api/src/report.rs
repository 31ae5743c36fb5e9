use chrono::Utc;
use clap::Args;
use job_market::config::AppConfig;
use job_market::error::AppError;
use job_market::market::snapshot::SnapshotProvider;
use job_market::market::{
    JobProvider, MarketAggregator, MarketInsightService, MarketInsightsResponse,
};
use job_market::telemetry;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct InsightsArgs {
    /// Search term (defaults to MARKET_DEFAULT_QUERY)
    #[arg(long)]
    pub(crate) query: Option<String>,
    /// Region to search (defaults to MARKET_DEFAULT_LOCATION)
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Replay listings from a CSV export instead of calling the live providers
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Print the JSON response instead of the text summary
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) async fn run_insights(args: InsightsArgs) -> Result<(), AppError> {
    let InsightsArgs {
        query,
        location,
        snapshot,
        json,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let now = Utc::now();
    let service = match snapshot {
        Some(path) => {
            let provider: Arc<dyn JobProvider> =
                Arc::new(SnapshotProvider::from_path(path, now)?);
            MarketInsightService::new(
                MarketAggregator::new(vec![provider], config.market.fetch_timeout),
                config.market.defaults.clone(),
            )
        }
        None => MarketInsightService::from_config(&config.market)?,
    };

    let query = service.resolve_query(query, location);
    let insights = service.insights_at(&query, now).await?;

    if json {
        match serde_json::to_string_pretty(&insights) {
            Ok(body) => println!("{body}"),
            Err(err) => println!("JSON output unavailable: {err}"),
        }
    } else {
        render_insights(&query.query, &query.location, &insights);
    }

    Ok(())
}

pub(crate) fn render_insights(query: &str, location: &str, insights: &MarketInsightsResponse) {
    println!("Job market summary: '{query}' in {location}");
    println!("{} listings analysed", insights.jobs_count);

    let salary = &insights.salary_stats;
    if salary.count == 0 {
        println!("\nSalary: no figures disclosed");
    } else {
        println!(
            "\nSalary ({} disclosed): median £{} | Q1 £{} | Q3 £{} | range £{} - £{}",
            salary.count, salary.median, salary.q1, salary.q3, salary.min, salary.max
        );
        for bucket in &insights.salary_buckets {
            println!("  - {}: {}", bucket.label, bucket.count);
        }
    }

    println!("\nContract types:");
    for entry in &insights.job_type_mix {
        println!("  - {}: {}", entry.label, entry.count);
    }

    println!("Experience levels:");
    for entry in &insights.experience_mix {
        println!("  - {}: {}", entry.label, entry.count);
    }

    println!("Working pattern:");
    for entry in &insights.working_pattern {
        println!("  - {}: {}", entry.label, entry.count);
    }

    let freshness = &insights.freshness;
    println!(
        "\nFreshness: {}% posted in the last 48h | {}% within 7 days | median age {} day(s)",
        freshness.last_48h_pct, freshness.recent_7d_pct, freshness.median_days
    );

    let rankings = [
        ("Top companies", &insights.top_companies),
        ("Top skills", &insights.top_skills),
        ("Top certifications", &insights.top_certs),
    ];
    for (heading, entries) in rankings {
        if entries.is_empty() {
            println!("{heading}: none");
            continue;
        }
        println!("{heading}:");
        for entry in entries {
            println!("  - {} ({})", entry.name, entry.count);
        }
    }
}
