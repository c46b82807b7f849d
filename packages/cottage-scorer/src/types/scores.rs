//! Per-criterion judgment parsed from an oracle reply.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::defaults::{DEFAULT_SUBSCORE, FALLBACK_REASONING, FALLBACK_SIMILARITY_TAG};
use crate::types::criterion::CriterionRegistry;

/// Raw subscores and free text from one oracle reply.
///
/// `scores` holds whatever criterion keys the reply carried, in reply
/// order. Missing criteria are resolved by the aggregator, not here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawCriterionScores {
    /// Criterion name to subscore in [0, 10].
    pub scores: IndexMap<String, u8>,

    pub reasoning: String,

    /// Which example category the oracle found most similar.
    pub similar_to: Option<String>,

    pub observations: Vec<String>,

    /// Set when the reply was unusable and these values are the fallback.
    #[serde(default)]
    pub is_fallback: bool,
}

impl RawCriterionScores {
    pub fn new() -> Self {
        Self::default()
    }

    /// The neutral result used when an oracle reply cannot be decoded.
    ///
    /// Every criterion of `registry` scores the midpoint, the reasoning is
    /// a fixed message and the listing is tagged as resembling the
    /// negative examples.
    pub fn fallback(registry: &CriterionRegistry) -> Self {
        Self {
            scores: registry
                .names()
                .map(|name| (name.to_string(), DEFAULT_SUBSCORE))
                .collect(),
            reasoning: FALLBACK_REASONING.to_string(),
            similar_to: Some(FALLBACK_SIMILARITY_TAG.to_string()),
            observations: Vec::new(),
            is_fallback: true,
        }
    }

    pub fn with_score(mut self, criterion: impl Into<String>, score: u8) -> Self {
        self.scores.insert(criterion.into(), score);
        self
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub fn with_similar_to(mut self, tag: impl Into<String>) -> Self {
        self.similar_to = Some(tag.into());
        self
    }

    pub fn with_observation(mut self, observation: impl Into<String>) -> Self {
        self.observations.push(observation.into());
        self
    }

    pub fn get(&self, criterion: &str) -> Option<u8> {
        self.scores.get(criterion).copied()
    }
}
