//! Configuration for the scoring pipeline.

use serde::{Deserialize, Serialize};

use crate::defaults;

/// Tunables of the scoring pipeline.
///
/// The defaults reproduce the rubric exactly; see [`crate::defaults`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weighted total at or above which a listing classifies positive.
    ///
    /// Default: 60.0.
    pub positive_threshold: f64,

    /// Calibration examples injected per category.
    ///
    /// Only positive and negative categories are injected. Default: 2.
    pub examples_per_category: usize,

    /// Key features shown per injected example. Default: 3.
    pub features_per_example: usize,

    /// Character cap for description and location text inside a query.
    ///
    /// Default: 500.
    pub prompt_text_limit: usize,

    /// Character cap for extracted location text. Default: 1000.
    pub location_text_limit: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            positive_threshold: defaults::POSITIVE_THRESHOLD,
            examples_per_category: defaults::EXAMPLES_PER_CATEGORY,
            features_per_example: defaults::FEATURES_PER_EXAMPLE,
            prompt_text_limit: defaults::PROMPT_TEXT_LIMIT,
            location_text_limit: defaults::LOCATION_TEXT_LIMIT,
        }
    }
}

impl ScoringConfig {
    /// Create a new config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the positive threshold.
    pub fn with_positive_threshold(mut self, threshold: f64) -> Self {
        self.positive_threshold = threshold;
        self
    }

    /// Set the number of examples injected per category.
    pub fn with_examples_per_category(mut self, n: usize) -> Self {
        self.examples_per_category = n;
        self
    }

    /// Set the number of key features shown per example.
    pub fn with_features_per_example(mut self, n: usize) -> Self {
        self.features_per_example = n;
        self
    }

    /// Set the query text cap.
    pub fn with_prompt_text_limit(mut self, limit: usize) -> Self {
        self.prompt_text_limit = limit;
        self
    }

    /// Set the character cap for extracted location text.
    pub fn with_location_text_limit(mut self, limit: usize) -> Self {
        self.location_text_limit = limit;
        self
    }
}
