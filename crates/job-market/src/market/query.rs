use crate::config::QueryDefaults;

const NATIONWIDE_LOCATIONS: &[&str] = &["uk", "gb", "united kingdom", "great britain"];

/// Search term and region for one fetch-and-compute cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarketQuery {
    pub query: String,
    pub location: String,
}

impl MarketQuery {
    pub fn new(query: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: location.into(),
        }
    }

    /// Applies the configured defaults to blank or missing request fields.
    pub fn resolve(
        query: Option<String>,
        location: Option<String>,
        defaults: &QueryDefaults,
    ) -> Self {
        let pick = |value: Option<String>, fallback: &str| {
            value
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| fallback.to_string())
        };

        Self {
            query: pick(query, &defaults.query),
            location: pick(location, &defaults.location),
        }
    }

    /// True when the location names the whole country rather than a region in it.
    pub fn is_nationwide(&self) -> bool {
        let location = self.location.trim().to_ascii_lowercase();
        location.is_empty() || NATIONWIDE_LOCATIONS.contains(&location.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_falls_back_on_blank_fields() {
        let defaults = QueryDefaults::default();
        let query = MarketQuery::resolve(Some("  ".to_string()), None, &defaults);
        assert_eq!(query, MarketQuery::new("electrician", "UK"));

        let query = MarketQuery::resolve(
            Some(" plumber ".to_string()),
            Some("Bristol".to_string()),
            &defaults,
        );
        assert_eq!(query, MarketQuery::new("plumber", "Bristol"));
    }

    #[test]
    fn nationwide_detection_ignores_case() {
        assert!(MarketQuery::new("electrician", "uk").is_nationwide());
        assert!(MarketQuery::new("electrician", "United Kingdom").is_nationwide());
        assert!(!MarketQuery::new("electrician", "Manchester").is_nationwide());
    }
}
