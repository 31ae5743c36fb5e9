//! Offline replay of a listing export, served through the same provider seam.

use super::listing::UnifiedListing;
use super::providers::fields::{empty_string_as_none, posted_or_now, text};
use super::providers::{JobProvider, ProviderError};
use super::query::MarketQuery;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const PROVIDER: &str = "snapshot";

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read listing snapshot: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid listing snapshot CSV: {0}")]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Deserialize)]
struct SnapshotRow {
    #[serde(rename = "Title", default)]
    title: Option<String>,
    #[serde(rename = "Company", default)]
    company: Option<String>,
    #[serde(rename = "Location", default)]
    location: Option<String>,
    #[serde(rename = "Salary", default, deserialize_with = "empty_string_as_none")]
    salary: Option<String>,
    #[serde(rename = "Contract Type", default)]
    contract_type: Option<String>,
    #[serde(rename = "Description", default)]
    description: Option<String>,
    #[serde(rename = "Posted", default, deserialize_with = "empty_string_as_none")]
    posted: Option<String>,
}

impl SnapshotRow {
    fn into_listing(self, now: DateTime<Utc>) -> UnifiedListing {
        UnifiedListing {
            title: text(self.title),
            company: text(self.company),
            location: text(self.location),
            salary_text: self.salary.map(|salary| salary.trim().to_string()),
            contract_type: text(self.contract_type),
            description: text(self.description),
            posted_date: posted_or_now(self.posted.as_deref(), now),
        }
    }
}

/// Reads listings from CSV. Rows that fail to decode are skipped; I/O errors are not.
pub fn parse_listings<R: Read>(
    reader: R,
    now: DateTime<Utc>,
) -> Result<Vec<UnifiedListing>, SnapshotError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let mut listings = Vec::new();

    for (index, record) in csv_reader.deserialize::<SnapshotRow>().enumerate() {
        match record {
            Ok(row) => listings.push(row.into_listing(now)),
            Err(err) if matches!(err.kind(), csv::ErrorKind::Io(_)) => return Err(err.into()),
            Err(err) => {
                debug!(
                    provider = PROVIDER,
                    row = index + 1,
                    error = %err,
                    "skipping malformed row"
                );
            }
        }
    }

    Ok(listings)
}

/// Serves a fixed set of listings loaded once from an export.
#[derive(Debug, Clone)]
pub struct SnapshotProvider {
    listings: Vec<UnifiedListing>,
}

impl SnapshotProvider {
    pub fn new(listings: Vec<UnifiedListing>) -> Self {
        Self { listings }
    }

    pub fn from_path<P: AsRef<Path>>(path: P, now: DateTime<Utc>) -> Result<Self, SnapshotError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file, now)
    }

    pub fn from_reader<R: Read>(reader: R, now: DateTime<Utc>) -> Result<Self, SnapshotError> {
        parse_listings(reader, now).map(Self::new)
    }

    pub fn len(&self) -> usize {
        self.listings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.is_empty()
    }
}

#[async_trait]
impl JobProvider for SnapshotProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    /// The export already reflects a search, so the query is not re-applied.
    async fn fetch(
        &self,
        _query: &MarketQuery,
        _now: DateTime<Utc>,
    ) -> Result<Vec<UnifiedListing>, ProviderError> {
        Ok(self.listings.clone())
    }
}
