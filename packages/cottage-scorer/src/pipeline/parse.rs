//! Parse oracle replies into raw criterion scores.
//!
//! The oracle answers in free text that should contain one JSON object.
//! Anything that prevents decoding it ends in the fixed fallback from
//! [`RawCriterionScores::fallback`]; parsing never fails.

use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::defaults::MAX_SUBSCORE;
use crate::pipeline::prompts::{
    MAX_OBSERVATIONS, OBSERVATIONS_KEY, REASONING_KEY, SIMILAR_TO_KEY,
};
use crate::types::{criterion::CriterionRegistry, scores::RawCriterionScores};

/// Parse a reply against the default rubric.
pub fn parse_oracle_reply(raw_reply: &str) -> RawCriterionScores {
    parse_oracle_reply_for(raw_reply, &CriterionRegistry::default())
}

/// Parse a reply; `registry` only shapes the fallback.
pub fn parse_oracle_reply_for(raw_reply: &str, registry: &CriterionRegistry) -> RawCriterionScores {
    let Some(span) = structured_span(raw_reply) else {
        warn!(
            reply_len = raw_reply.len(),
            "Oracle reply has no JSON object, using fallback scores"
        );
        return RawCriterionScores::fallback(registry);
    };

    match serde_json::from_str::<Map<String, Value>>(span) {
        Ok(object) => decode_reply(object),
        Err(e) => {
            warn!(error = %e, "Oracle reply JSON could not be decoded, using fallback scores");
            RawCriterionScores::fallback(registry)
        }
    }
}

/// Greedy span from the first `{` to the last `}`.
pub fn structured_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

fn decode_reply(mut object: Map<String, Value>) -> RawCriterionScores {
    let reasoning = object
        .remove(REASONING_KEY)
        .and_then(|v| v.as_str().map(str::to_string))
        .unwrap_or_default();

    let similar_to = object
        .remove(SIMILAR_TO_KEY)
        .and_then(|v| v.as_str().map(|s| s.trim().to_string()))
        .filter(|s| !s.is_empty());

    let observations = match object.remove(OBSERVATIONS_KEY) {
        Some(Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| item.as_str().map(str::to_string))
            .take(MAX_OBSERVATIONS)
            .collect(),
        _ => Vec::new(),
    };

    let mut raw = RawCriterionScores {
        reasoning,
        similar_to,
        observations,
        ..RawCriterionScores::default()
    };

    for (key, value) in object {
        match subscore(&value) {
            Some(score) => {
                raw.scores.insert(key, score);
            }
            None => debug!(key = %key, value = %value, "Ignoring non-numeric reply field"),
        }
    }

    raw
}

/// Coerce a reply value to an integer subscore in [0, 10].
fn subscore(value: &Value) -> Option<u8> {
    let number = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !number.is_finite() {
        return None;
    }

    let score = number.round().clamp(0.0, f64::from(MAX_SUBSCORE));
    if score != number {
        warn!(raw = number, score, "Subscore outside the 0-10 integer scale, coerced");
    }
    Some(score as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::defaults::{FALLBACK_REASONING, FALLBACK_SIMILARITY_TAG};

    const REPLY: &str = r#"Hier is mijn analyse:
```json
{
    "natuur_nabijheid": 8,
    "privacy_rust": 6,
    "omgeving_kwaliteit": 7,
    "authenticiteit": 5,
    "bebouwing": 4,
    "reasoning": "Ligt aan de bosrand, lijkt op {het eerste} JA voorbeeld.",
    "similar_to": "ja",
    "key_observations": ["Bosrand", "Vrijstaand", "Weinig buren"]
}
```
Succes!"#;

    #[test]
    fn test_parses_fenced_reply() {
        let raw = parse_oracle_reply(REPLY);
        assert!(!raw.is_fallback);
        assert_eq!(raw.get("natuur_nabijheid"), Some(8));
        assert_eq!(raw.get("bebouwing"), Some(4));
        assert_eq!(raw.scores.len(), 5);
        assert_eq!(raw.similar_to.as_deref(), Some("ja"));
        assert_eq!(raw.observations.len(), 3);
        assert!(raw.reasoning.starts_with("Ligt aan de bosrand"));
    }

    #[test]
    fn test_no_json_yields_fallback() {
        let raw = parse_oracle_reply("Sorry, ik kan deze pagina niet beoordelen.");
        assert!(raw.is_fallback);
        assert_eq!(raw.scores.len(), 5);
        assert!(raw.scores.values().all(|&s| s == 5));
        assert_eq!(raw.reasoning, FALLBACK_REASONING);
        assert_eq!(raw.similar_to.as_deref(), Some(FALLBACK_SIMILARITY_TAG));
        assert!(raw.observations.is_empty());
    }

    #[test]
    fn test_invalid_json_yields_fallback() {
        let raw = parse_oracle_reply("{ natuur_nabijheid: acht }");
        assert_eq!(raw, RawCriterionScores::fallback(&CriterionRegistry::default()));
    }

    #[test]
    fn test_reversed_braces_yield_fallback() {
        assert!(structured_span("} geen object {").is_none());
        assert!(parse_oracle_reply("} geen object {").is_fallback);
    }

    #[test]
    fn test_missing_and_unknown_keys_pass_through() {
        let raw = parse_oracle_reply(r#"{"natuur_nabijheid": 9, "uitzicht": 7, "reasoning": "ok"}"#);
        assert_eq!(raw.get("natuur_nabijheid"), Some(9));
        assert_eq!(raw.get("uitzicht"), Some(7));
        assert_eq!(raw.get("privacy_rust"), None);
        assert_eq!(raw.similar_to, None);
    }

    #[test]
    fn test_out_of_range_and_fractional_scores_are_coerced() {
        let raw = parse_oracle_reply(
            r#"{"natuur_nabijheid": 12, "privacy_rust": -3, "bebouwing": 6.6, "authenticiteit": "7"}"#,
        );
        assert_eq!(raw.get("natuur_nabijheid"), Some(10));
        assert_eq!(raw.get("privacy_rust"), Some(0));
        assert_eq!(raw.get("bebouwing"), Some(7));
        assert_eq!(raw.get("authenticiteit"), Some(7));
    }

    #[test]
    fn test_observations_are_capped() {
        let raw = parse_oracle_reply(
            r#"{"key_observations": ["bos", 4, "heide", "stilte", "sterren", "uitzicht"]}"#,
        );
        assert_eq!(raw.observations, vec!["bos", "heide", "stilte"]);
    }

    #[test]
    fn test_non_numeric_scores_are_dropped() {
        let raw = parse_oracle_reply(r#"{"natuur_nabijheid": "hoog", "privacy_rust": null}"#);
        assert!(raw.scores.is_empty());
        assert!(!raw.is_fallback);
    }
}
