pub mod views;

use super::stats::{MarketMetrics, RankedEntry};
use views::{FreshnessView, LabelCount, MarketInsightsResponse, NameCount, SalaryStatsView};

impl MarketMetrics {
    /// Maps the metrics onto the wire contract. Field mapping only.
    pub fn to_response(&self) -> MarketInsightsResponse {
        MarketInsightsResponse {
            salary_stats: SalaryStatsView {
                median: self.salary.median,
                q1: self.salary.q1,
                q3: self.salary.q3,
                min: self.salary.min,
                max: self.salary.max,
                count: self.salary.count,
            },
            salary_buckets: self
                .salary_bands
                .iter()
                .map(|(band, count)| LabelCount::new(band.label(), *count))
                .collect(),
            job_type_mix: self
                .contract_mix
                .iter()
                .map(|entry| LabelCount::new(entry.name.clone(), entry.count))
                .collect(),
            experience_mix: self
                .experience_mix
                .iter()
                .map(|(level, count)| LabelCount::new(level.label(), *count))
                .collect(),
            working_pattern: self
                .work_pattern_mix
                .iter()
                .map(|(pattern, count)| LabelCount::new(pattern.label(), *count))
                .collect(),
            freshness: FreshnessView {
                last_48h_pct: self.freshness.last_48h_pct,
                recent_7d_pct: self.freshness.recent_7d_pct,
                median_days: self.freshness.median_days,
            },
            top_companies: names(&self.top_companies),
            top_skills: names(&self.top_skills),
            top_certs: names(&self.top_certifications),
            jobs_count: self.jobs_count,
        }
    }
}

fn names(entries: &[RankedEntry]) -> Vec<NameCount> {
    entries
        .iter()
        .map(|entry| NameCount {
            name: entry.name.clone(),
            count: entry.count,
        })
        .collect()
}
