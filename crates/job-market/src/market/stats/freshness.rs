use crate::market::listing::UnifiedListing;
use chrono::{DateTime, Utc};
use serde::Serialize;

const LAST_48H_HOURS: i64 = 48;
const RECENT_DAYS: i64 = 7;

/// How recently the listings were posted relative to the request instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Freshness {
    pub last_48h_pct: u8,
    pub recent_7d_pct: u8,
    pub median_days: u32,
}

impl Freshness {
    pub fn measure(listings: &[UnifiedListing], now: DateTime<Utc>) -> Self {
        let mut ages: Vec<i64> = listings
            .iter()
            .map(|listing| age_days(listing.posted_date, now))
            .collect();
        if ages.is_empty() {
            return Self::default();
        }
        ages.sort_unstable();

        let last_48h = ages
            .iter()
            .filter(|days| **days * 24 <= LAST_48H_HOURS)
            .count();
        let recent = ages.iter().filter(|days| **days <= RECENT_DAYS).count();

        Self {
            last_48h_pct: percentage(last_48h, ages.len()),
            recent_7d_pct: percentage(recent, ages.len()),
            median_days: u32::try_from(ages[ages.len() / 2]).unwrap_or(u32::MAX),
        }
    }
}

/// Whole days since posting, never negative.
fn age_days(posted: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - posted).num_days().max(0)
}

fn percentage(part: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round().clamp(0.0, 100.0) as u8
}
