//! Every default and fallback value used by the scoring pipeline.
//!
//! Nothing in the pipeline invents a default inline; each stage reads
//! the value it needs from here (directly or through
//! [`ScoringConfig`](crate::types::config::ScoringConfig)), so fallback
//! behavior can be audited and tested in one place.

/// Subscore assumed for a criterion the oracle did not score.
///
/// Applied by the aggregator, not the parser. It is also the value every
/// criterion gets in the parser fallback.
pub const DEFAULT_SUBSCORE: u8 = 5;

/// Upper bound of a raw criterion subscore.
pub const MAX_SUBSCORE: u8 = 10;

/// Weighted total at or above which a listing is a nature cottage.
pub const POSITIVE_THRESHOLD: f64 = 60.0;

/// Sum every criterion registry must reach.
pub const REGISTRY_WEIGHT_SUM: f64 = 100.0;

/// Calibration examples injected per category.
pub const EXAMPLES_PER_CATEGORY: usize = 2;

/// Key features shown per injected calibration example.
pub const FEATURES_PER_EXAMPLE: usize = 3;

/// Characters of description and location text embedded in a query.
pub const PROMPT_TEXT_LIMIT: usize = 500;

/// Characters kept from the location section during extraction.
pub const LOCATION_TEXT_LIMIT: usize = 1000;

/// Score assigned to a labeled example whose score field is blank or
/// unparsable.
pub const EXAMPLE_SCORE_FALLBACK: f64 = 50.0;

/// Substrings that mark a template row in the example store.
pub const PLACEHOLDER_URL_TOKENS: &[&str] = &["XXXXX", "YYYYY"];

/// Delimiter between key features in the example store.
pub const FEATURE_DELIMITER: &str = "; ";

/// Reasoning attached to the parser fallback.
pub const FALLBACK_REASONING: &str = "Kon analyse niet voltooien";

/// Similarity tag attached to the parser fallback (the negative category).
pub const FALLBACK_SIMILARITY_TAG: &str = "nee";

/// Verdict label for listings at or above the threshold.
pub const POSITIVE_LABEL: &str = "✅ Natuurhuisje";

/// Verdict label for listings below the threshold.
pub const NEGATIVE_LABEL: &str = "❌ Geen natuurhuisje";

/// Rendered in a query when an extracted attribute is empty.
pub const UNKNOWN_TYPE: &str = "Onbekend";

/// Rendered in a query when extracted text is empty.
pub const NOT_AVAILABLE: &str = "Niet beschikbaar";

/// Score bands used by presentation layers.
pub const HIGH_BAND_MIN: f64 = 70.0;
pub const MEDIUM_BAND_MIN: f64 = 50.0;
