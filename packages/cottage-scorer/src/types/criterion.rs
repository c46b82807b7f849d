//! The weighted criterion rubric.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::defaults::REGISTRY_WEIGHT_SUM;
use crate::error::{Result, ScoringError};

/// One weighted axis of evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionSpec {
    pub name: String,
    pub weight: f64,
    pub description: String,
}

impl CriterionSpec {
    pub fn new(name: impl Into<String>, weight: f64, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            weight,
            description: description.into(),
        }
    }
}

/// Ordered, immutable table of criteria whose weights sum to 100.
///
/// Iteration follows insertion order, which is also the order used for
/// the query table, aggregation and display.
#[derive(Debug, Clone, PartialEq)]
pub struct CriterionRegistry {
    criteria: IndexMap<String, CriterionSpec>,
}

impl Default for CriterionRegistry {
    /// The five-criterion nature cottage rubric.
    fn default() -> Self {
        let specs = [
            CriterionSpec::new(
                "natuur_nabijheid",
                30.0,
                "Afstand tot en integratie met natuur",
            ),
            CriterionSpec::new(
                "privacy_rust",
                20.0,
                "Mate van privacy en rust (vrijstaand, kleinschalig)",
            ),
            CriterionSpec::new(
                "omgeving_kwaliteit",
                25.0,
                "Kwaliteit natuuromgeving (bos, strand, heide, bergen)",
            ),
            CriterionSpec::new(
                "authenticiteit",
                15.0,
                "Natuurhuisje gevoel vs. standaard vakantiepark",
            ),
            CriterionSpec::new(
                "bebouwing",
                10.0,
                "Afwezigheid van stedelijke bebouwing/massa toerisme",
            ),
        ];

        Self {
            criteria: specs.into_iter().map(|c| (c.name.clone(), c)).collect(),
        }
    }
}

impl CriterionRegistry {
    /// Build a registry, rejecting tables that break the load-time invariants.
    pub fn new(specs: impl IntoIterator<Item = CriterionSpec>) -> Result<Self> {
        let mut criteria = IndexMap::new();
        for spec in specs {
            if spec.name.trim().is_empty() {
                return Err(ScoringError::InvalidRegistry {
                    reason: "criterion name is empty".to_string(),
                });
            }
            if criteria.contains_key(&spec.name) {
                return Err(ScoringError::InvalidRegistry {
                    reason: format!("duplicate criterion: {}", spec.name),
                });
            }
            criteria.insert(spec.name.clone(), spec);
        }

        let registry = Self { criteria };
        registry.validate()?;
        Ok(registry)
    }

    /// Check that the weights are finite, non-negative and sum to 100.
    pub fn validate(&self) -> Result<()> {
        if let Some(spec) = self.criteria.values().find(|c| !c.weight.is_finite()) {
            return Err(ScoringError::InvalidRegistry {
                reason: format!("non-finite weight for {}", spec.name),
            });
        }
        if let Some(spec) = self.criteria.values().find(|c| c.weight < 0.0) {
            return Err(ScoringError::InvalidRegistry {
                reason: format!("negative weight for {}", spec.name),
            });
        }

        let total = self.total_weight();
        if (total - REGISTRY_WEIGHT_SUM).abs() > 1e-9 {
            return Err(ScoringError::InvalidRegistry {
                reason: format!("weights sum to {total}, expected {REGISTRY_WEIGHT_SUM}"),
            });
        }
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&CriterionSpec> {
        self.criteria.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &CriterionSpec> {
        self.criteria.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.criteria.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.criteria.len()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn total_weight(&self) -> f64 {
        self.criteria.values().map(|c| c.weight).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_is_valid_and_ordered() {
        let registry = CriterionRegistry::default();
        assert!(registry.validate().is_ok());
        assert_eq!(registry.len(), 5);

        let names: Vec<_> = registry.names().collect();
        assert_eq!(
            names,
            vec![
                "natuur_nabijheid",
                "privacy_rust",
                "omgeving_kwaliteit",
                "authenticiteit",
                "bebouwing"
            ]
        );
        assert_eq!(registry.get("privacy_rust").unwrap().weight, 20.0);
    }

    #[test]
    fn test_rejects_weights_not_summing_to_100() {
        let result = CriterionRegistry::new(vec![
            CriterionSpec::new("a", 50.0, "A"),
            CriterionSpec::new("b", 40.0, "B"),
        ]);
        assert!(matches!(result, Err(ScoringError::InvalidRegistry { .. })));
    }

    #[test]
    fn test_rejects_non_finite_weights() {
        for weight in [f64::NAN, f64::INFINITY] {
            let result = CriterionRegistry::new(vec![
                CriterionSpec::new("a", weight, "A"),
                CriterionSpec::new("b", 50.0, "B"),
            ]);
            assert!(matches!(result, Err(ScoringError::InvalidRegistry { .. })));
        }
    }

    #[test]
    fn test_rejects_duplicate_names() {
        let result = CriterionRegistry::new(vec![
            CriterionSpec::new("a", 50.0, "A"),
            CriterionSpec::new("a", 50.0, "A again"),
        ]);
        assert!(matches!(result, Err(ScoringError::InvalidRegistry { .. })));
    }

    #[test]
    fn test_accepts_custom_table() {
        let registry = CriterionRegistry::new(vec![
            CriterionSpec::new("rust", 60.0, "Rust"),
            CriterionSpec::new("bos", 40.0, "Bos"),
        ])
        .unwrap();
        assert_eq!(registry.total_weight(), 100.0);
    }
}
