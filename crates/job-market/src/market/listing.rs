use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

pub const UNSPECIFIED_LABEL: &str = "Unspecified";

/// Provider-agnostic job listing. Adapters build these; later stages only read them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedListing {
    pub title: String,
    pub company: String,
    pub location: String,
    pub salary_text: Option<String>,
    pub contract_type: String,
    pub description: String,
    pub posted_date: DateTime<Utc>,
}

impl UnifiedListing {
    /// Lower-cased `title + description`, the input to every keyword heuristic.
    pub fn search_text(&self) -> String {
        let mut text = String::with_capacity(self.title.len() + self.description.len() + 1);
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.description);
        text.to_lowercase()
    }

    pub fn salary_figure(&self) -> Option<SalaryFigure> {
        self.salary_text.as_deref().and_then(SalaryFigure::parse)
    }

    pub fn contract_label(&self) -> &str {
        let trimmed = self.contract_type.trim();
        if trimmed.is_empty() {
            UNSPECIFIED_LABEL
        } else {
            &self.contract_type
        }
    }
}

/// Single GBP estimate derived from free-text salary information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SalaryFigure(pub u64);

impl SalaryFigure {
    /// Takes the first one or two numbers in `text`; two are averaged.
    ///
    /// Thousands separators are ignored. Returns `None` when no digits are present.
    pub fn parse(text: &str) -> Option<Self> {
        let numbers = leading_numbers(text, 2);
        match numbers.as_slice() {
            [] => None,
            [single] => Some(Self(round_pounds(*single))),
            [low, high, ..] => Some(Self(round_pounds((low + high) / 2.0))),
        }
    }

    pub fn pounds(self) -> u64 {
        self.0
    }
}

fn salary_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\d+(?:\.\d+)?").expect("salary number pattern compiles")
    })
}

fn leading_numbers(text: &str, limit: usize) -> Vec<f64> {
    let stripped = text.replace(',', "");
    salary_number_pattern()
        .find_iter(&stripped)
        .filter_map(|found| found.as_str().parse::<f64>().ok())
        .take(limit)
        .collect()
}

fn round_pounds(value: f64) -> u64 {
    if value.is_finite() && value > 0.0 {
        value.round() as u64
    } else {
        0
    }
}

/// Formats a provider's min/max pair as `£min - £max` or a single `£figure`.
pub(crate) fn salary_range_text(min: Option<f64>, max: Option<f64>) -> Option<String> {
    let usable = |value: Option<f64>| value.filter(|value| value.is_finite() && *value > 0.0);

    match (usable(min), usable(max)) {
        (Some(min), Some(max)) => Some(format!(
            "£{} - £{}",
            with_thousands(round_pounds(min)),
            with_thousands(round_pounds(max))
        )),
        (Some(single), None) | (None, Some(single)) => {
            Some(format!("£{}", with_thousands(round_pounds(single))))
        }
        (None, None) => None,
    }
}

pub(crate) fn with_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            formatted.push(',');
        }
        formatted.push(ch);
    }
    formatted
}
