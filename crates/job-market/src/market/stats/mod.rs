//! Pure statistics over a merged listing set. No I/O; the reference instant is injected.

mod classify;
mod freshness;
mod keywords;
mod rankings;
mod salary;

use super::listing::UnifiedListing;
use chrono::{DateTime, Utc};

pub use classify::{classify, ExperienceLevel, KeywordRule, WorkPattern};
pub use freshness::Freshness;
pub use keywords::{CERTIFICATION_KEYWORDS, SKILL_KEYWORDS};
pub use rankings::RankedEntry;
pub use salary::{SalaryBand, SalaryStats};

pub const TOP_COMPANIES: usize = 5;
pub const TOP_KEYWORDS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct MarketMetrics {
    pub salary: SalaryStats,
    pub salary_bands: Vec<(SalaryBand, usize)>,
    pub contract_mix: Vec<RankedEntry>,
    pub experience_mix: Vec<(ExperienceLevel, usize)>,
    pub work_pattern_mix: Vec<(WorkPattern, usize)>,
    pub freshness: Freshness,
    pub top_companies: Vec<RankedEntry>,
    pub top_skills: Vec<RankedEntry>,
    pub top_certifications: Vec<RankedEntry>,
    pub jobs_count: usize,
}

/// Computes every metric for `listings` as of `now`.
///
/// An empty slice yields all-zero metrics with the fixed label sets still present.
pub fn compute(listings: &[UnifiedListing], now: DateTime<Utc>) -> MarketMetrics {
    let figures: Vec<u64> = listings
        .iter()
        .filter_map(UnifiedListing::salary_figure)
        .map(|figure| figure.pounds())
        .collect();

    let search_texts: Vec<String> = listings.iter().map(UnifiedListing::search_text).collect();

    let mut experience_mix: Vec<(ExperienceLevel, usize)> = ExperienceLevel::ordered()
        .into_iter()
        .map(|level| (level, 0))
        .collect();
    let mut work_pattern_mix: Vec<(WorkPattern, usize)> = WorkPattern::ordered()
        .into_iter()
        .map(|pattern| (pattern, 0))
        .collect();

    for text in &search_texts {
        let level = ExperienceLevel::classify(text);
        if let Some(entry) = experience_mix.iter_mut().find(|(label, _)| *label == level) {
            entry.1 += 1;
        }
        let pattern = WorkPattern::classify(text);
        if let Some(entry) = work_pattern_mix.iter_mut().find(|(label, _)| *label == pattern) {
            entry.1 += 1;
        }
    }

    MarketMetrics {
        salary: SalaryStats::from_figures(figures.clone()),
        salary_bands: SalaryBand::histogram(&figures),
        contract_mix: rankings::ranked(rankings::count_by(
            listings.iter().map(UnifiedListing::contract_label),
        )),
        experience_mix,
        work_pattern_mix,
        freshness: Freshness::measure(listings, now),
        top_companies: rankings::top_n(
            rankings::count_by(listings.iter().map(|listing| listing.company.as_str())),
            TOP_COMPANIES,
        ),
        top_skills: rankings::keyword_hits(&search_texts, SKILL_KEYWORDS, TOP_KEYWORDS),
        top_certifications: rankings::keyword_hits(
            &search_texts,
            CERTIFICATION_KEYWORDS,
            TOP_KEYWORDS,
        ),
        jobs_count: listings.len(),
    }
}
