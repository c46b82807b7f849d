//! Weighted aggregation of raw subscores into a classification.
//!
//! Pure and deterministic: no I/O, no randomness.

use indexmap::IndexMap;

use crate::defaults::{DEFAULT_SUBSCORE, MAX_SUBSCORE, NEGATIVE_LABEL, POSITIVE_LABEL};
use crate::types::{
    config::ScoringConfig, criterion::CriterionRegistry, result::ScoringResult,
    scores::RawCriterionScores,
};

/// Aggregate with the default threshold.
pub fn aggregate(raw: &RawCriterionScores, registry: &CriterionRegistry) -> ScoringResult {
    aggregate_with(raw, registry, &ScoringConfig::default())
}

/// Weighted total over `registry`, classified against the configured
/// threshold.
///
/// Each criterion contributes `(subscore / 10) * weight`; a criterion the
/// oracle did not score counts as the midpoint. The breakdown records the
/// raw subscore, never the weighted contribution.
pub fn aggregate_with(
    raw: &RawCriterionScores,
    registry: &CriterionRegistry,
    config: &ScoringConfig,
) -> ScoringResult {
    let mut total = 0.0;
    let mut breakdown = IndexMap::with_capacity(registry.len());

    for criterion in registry.iter() {
        let subscore = raw.get(&criterion.name).unwrap_or(DEFAULT_SUBSCORE);
        total += f64::from(subscore) * criterion.weight / f64::from(MAX_SUBSCORE);
        breakdown.insert(criterion.name.clone(), subscore);
    }

    let is_positive = total >= config.positive_threshold;
    let category_label = if is_positive {
        POSITIVE_LABEL
    } else {
        NEGATIVE_LABEL
    };

    ScoringResult {
        is_positive,
        confidence_score: total,
        category_label: category_label.to_string(),
        reasoning: raw.reasoning.clone(),
        breakdown,
        similar_to: raw.similar_to.clone(),
        observations: raw.observations.clone(),
        used_fallback: raw.is_fallback,
    }
}
