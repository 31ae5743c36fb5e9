use serde::{Deserialize, Serialize};

/// Response body for a market insights request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketInsightsResponse {
    pub salary_stats: SalaryStatsView,
    pub salary_buckets: Vec<LabelCount>,
    pub job_type_mix: Vec<LabelCount>,
    pub experience_mix: Vec<LabelCount>,
    pub working_pattern: Vec<LabelCount>,
    pub freshness: FreshnessView,
    pub top_companies: Vec<NameCount>,
    pub top_skills: Vec<NameCount>,
    pub top_certs: Vec<NameCount>,
    pub jobs_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryStatsView {
    pub median: u64,
    pub q1: u64,
    pub q3: u64,
    pub min: u64,
    pub max: u64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelCount {
    pub label: String,
    pub count: usize,
}

impl LabelCount {
    pub fn new(label: impl Into<String>, count: usize) -> Self {
        Self {
            label: label.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreshnessView {
    #[serde(rename = "last48hPct")]
    pub last_48h_pct: u8,
    #[serde(rename = "recent7dPct")]
    pub recent_7d_pct: u8,
    #[serde(rename = "medianDays")]
    pub median_days: u32,
}
