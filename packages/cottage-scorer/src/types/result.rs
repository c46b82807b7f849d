//! Output of one analysis call.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_SUBSCORE, HIGH_BAND_MIN, MAX_SUBSCORE, MEDIUM_BAND_MIN};
use crate::types::criterion::CriterionRegistry;
use crate::types::example::ExampleCategory;

/// Final classification of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoringResult {
    pub is_positive: bool,

    /// Weighted total in [0, 100].
    pub confidence_score: f64,

    /// Fixed human label for the verdict.
    pub category_label: String,

    pub reasoning: String,

    /// Criterion name to the raw 0-10 subscore, in registry order.
    ///
    /// These are not weighted contributions; use
    /// [`ScoringResult::contributions`] to derive those.
    pub breakdown: IndexMap<String, u8>,

    /// Similarity tag exactly as the oracle returned it.
    pub similar_to: Option<String>,

    #[serde(default)]
    pub observations: Vec<String>,

    /// True when the oracle reply was unusable and the neutral fallback
    /// was scored instead.
    #[serde(default)]
    pub used_fallback: bool,
}

/// Weighted view of one breakdown entry, for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CriterionContribution {
    pub name: String,
    pub description: String,
    pub subscore: u8,
    pub weight: f64,
    /// `(subscore / 10) * weight`
    pub contribution: f64,
    /// Percentage above or below the midpoint, `None` at the midpoint.
    pub delta_vs_midpoint: Option<f64>,
}

/// Coarse band of a weighted total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub fn for_score(score: f64) -> Self {
        if score >= HIGH_BAND_MIN {
            Self::High
        } else if score >= MEDIUM_BAND_MIN {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl ScoringResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::for_score(self.confidence_score)
    }

    /// Known category behind `similar_to`, if the tag is recognised.
    pub fn similar_category(&self) -> Option<ExampleCategory> {
        self.similar_to.as_deref().and_then(ExampleCategory::from_tag)
    }

    /// Re-derive weighted contributions for breakdown entries present in
    /// `registry`.
    pub fn contributions(&self, registry: &CriterionRegistry) -> Vec<CriterionContribution> {
        self.breakdown
            .iter()
            .filter_map(|(name, &subscore)| {
                let spec = registry.get(name)?;
                let delta = (subscore != DEFAULT_SUBSCORE).then(|| {
                    let mid = f64::from(DEFAULT_SUBSCORE);
                    (f64::from(subscore) - mid) / mid * 100.0
                });
                Some(CriterionContribution {
                    name: name.clone(),
                    description: spec.description.clone(),
                    subscore,
                    weight: spec.weight,
                    contribution: f64::from(subscore) * spec.weight / f64::from(MAX_SUBSCORE),
                    delta_vs_midpoint: delta,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(breakdown: &[(&str, u8)], total: f64) -> ScoringResult {
        ScoringResult {
            is_positive: total >= 60.0,
            confidence_score: total,
            category_label: String::new(),
            reasoning: String::new(),
            breakdown: breakdown.iter().map(|(k, v)| (k.to_string(), *v)).collect(),
            similar_to: Some("ja".to_string()),
            observations: vec![],
            used_fallback: false,
        }
    }

    #[test]
    fn test_contributions_are_weighted_from_raw_breakdown() {
        let registry = CriterionRegistry::default();
        let result = result_with(&[("natuur_nabijheid", 8), ("bebouwing", 5)], 0.0);

        let contributions = result.contributions(&registry);
        assert_eq!(contributions.len(), 2);
        assert!((contributions[0].contribution - 24.0).abs() < 1e-9);
        assert_eq!(contributions[0].delta_vs_midpoint, Some(60.0));
        assert!((contributions[1].contribution - 5.0).abs() < 1e-9);
        assert_eq!(contributions[1].delta_vs_midpoint, None);
    }

    #[test]
    fn test_bands() {
        assert_eq!(ScoreBand::for_score(70.0), ScoreBand::High);
        assert_eq!(ScoreBand::for_score(69.9), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(50.0), ScoreBand::Medium);
        assert_eq!(ScoreBand::for_score(49.9), ScoreBand::Low);
    }

    #[test]
    fn test_similar_category() {
        let result = result_with(&[], 0.0);
        assert_eq!(result.similar_category(), Some(ExampleCategory::Positive));
    }
}
