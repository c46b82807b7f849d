//! Labeled reference listings used as calibration examples.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Human label attached to a reference listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExampleCategory {
    /// A nature cottage ("ja").
    #[serde(rename = "ja")]
    Positive,

    /// Doubtful, leaning negative ("twijfel_nee").
    ///
    /// Loaded and counted, but not injected into composed queries.
    #[serde(rename = "twijfel_nee")]
    AmbiguousNegative,

    /// Not a nature cottage ("nee").
    #[serde(rename = "nee")]
    Negative,
}

impl ExampleCategory {
    /// All categories, in display order.
    pub const ALL: [ExampleCategory; 3] = [
        ExampleCategory::Positive,
        ExampleCategory::AmbiguousNegative,
        ExampleCategory::Negative,
    ];

    /// Wire tag used in the example store and in oracle replies.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Positive => "ja",
            Self::AmbiguousNegative => "twijfel_nee",
            Self::Negative => "nee",
        }
    }

    /// Parse a wire tag. Matching ignores case and surrounding whitespace.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_lowercase().as_str() {
            "ja" => Some(Self::Positive),
            "twijfel_nee" | "twijfel" => Some(Self::AmbiguousNegative),
            "nee" => Some(Self::Negative),
            _ => None,
        }
    }

    /// Short uppercase label (JA / TWIJFEL / NEE).
    pub fn short_label(self) -> &'static str {
        match self {
            Self::Positive => "JA",
            Self::AmbiguousNegative => "TWIJFEL",
            Self::Negative => "NEE",
        }
    }

    /// Whether examples of this category are injected into composed queries.
    pub fn is_calibration(self) -> bool {
        !matches!(self, Self::AmbiguousNegative)
    }
}

impl fmt::Display for ExampleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for ExampleCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| format!("unknown category: {s}"))
    }
}

/// A human-labeled reference listing. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledExample {
    pub url: String,
    pub category: ExampleCategory,
    /// Human score in [0, 100].
    pub score: f64,
    pub reasoning: String,
    pub key_features: Vec<String>,
}

impl LabeledExample {
    /// Create a new example with no reasoning or features.
    pub fn new(url: impl Into<String>, category: ExampleCategory, score: f64) -> Self {
        Self {
            url: url.into(),
            category,
            score,
            reasoning: String::new(),
            key_features: Vec::new(),
        }
    }

    /// Set the reasoning.
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Set the key features.
    pub fn with_features(mut self, features: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.key_features = features.into_iter().map(|f| f.into()).collect();
        self
    }

    /// Last path segment of the URL, for compact listings.
    pub fn slug(&self) -> &str {
        self.url
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or(&self.url)
    }
}
