use serde::Serialize;

/// One row of a priority table: the first rule with a matching keyword wins.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<L> {
    pub label: L,
    pub keywords: &'static [&'static str],
}

impl<L: Copy> KeywordRule<L> {
    pub fn matches(&self, text: &str) -> bool {
        self.keywords.iter().any(|keyword| text.contains(*keyword))
    }
}

/// Walks `rules` in order against lower-cased `text`; `fallback` when nothing matches.
pub fn classify<L: Copy>(text: &str, rules: &[KeywordRule<L>], fallback: L) -> L {
    rules
        .iter()
        .find(|rule| rule.matches(text))
        .map(|rule| rule.label)
        .unwrap_or(fallback)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    ApprenticeTrainee,
    Senior,
    Mid,
    Entry,
    Unspecified,
}

impl ExperienceLevel {
    pub const RULES: &'static [KeywordRule<Self>] = &[
        KeywordRule {
            label: Self::ApprenticeTrainee,
            keywords: &["apprentice", "trainee"],
        },
        KeywordRule {
            label: Self::Senior,
            keywords: &["senior", "lead", "manager"],
        },
        KeywordRule {
            label: Self::Mid,
            keywords: &["mid", "intermediate"],
        },
        KeywordRule {
            label: Self::Entry,
            keywords: &["junior", "entry"],
        },
    ];

    pub const fn ordered() -> [Self; 5] {
        [
            Self::ApprenticeTrainee,
            Self::Senior,
            Self::Mid,
            Self::Entry,
            Self::Unspecified,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ApprenticeTrainee => "Apprentice/Trainee",
            Self::Senior => "Senior",
            Self::Mid => "Mid",
            Self::Entry => "Entry",
            Self::Unspecified => "Unspecified",
        }
    }

    pub fn classify(text: &str) -> Self {
        classify(text, Self::RULES, Self::Unspecified)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkPattern {
    Remote,
    Hybrid,
    OnSite,
}

impl WorkPattern {
    /// On-site has no keyword; it is the fallback.
    pub const RULES: &'static [KeywordRule<Self>] = &[
        KeywordRule {
            label: Self::Remote,
            keywords: &["remote"],
        },
        KeywordRule {
            label: Self::Hybrid,
            keywords: &["hybrid"],
        },
    ];

    pub const fn ordered() -> [Self; 3] {
        [Self::Remote, Self::Hybrid, Self::OnSite]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Remote => "Remote",
            Self::Hybrid => "Hybrid",
            Self::OnSite => "On-site",
        }
    }

    pub fn classify(text: &str) -> Self {
        classify(text, Self::RULES, Self::OnSite)
    }
}
