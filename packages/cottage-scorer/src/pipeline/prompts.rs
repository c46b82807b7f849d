//! Query composition for the judgment oracle.
//!
//! A query always carries the base instructions, the criterion table and
//! the listing attributes. When the example store holds anything, a
//! calibration section with a few labeled examples is added so the oracle
//! can anchor its scale. The reply schema at the end is the contract the
//! response parser relies on.

use sha2::{Digest, Sha256};
use std::fmt::Write;

use crate::defaults::{MAX_SUBSCORE, NOT_AVAILABLE, UNKNOWN_TYPE};
use crate::stores::ExampleStore;
use crate::types::{
    config::ScoringConfig,
    criterion::CriterionRegistry,
    example::{ExampleCategory, LabeledExample},
    listing::{truncate_chars, ExtractedListing},
};

/// Reply key holding the free-text reasoning.
pub const REASONING_KEY: &str = "reasoning";

/// Reply key holding the similarity tag.
pub const SIMILAR_TO_KEY: &str = "similar_to";

/// Reply key holding the observation list.
pub const OBSERVATIONS_KEY: &str = "key_observations";

/// Observations requested from the oracle.
pub const MAX_OBSERVATIONS: usize = 3;

const INTRO: &str =
    "Analyseer deze vakantieaccommodatie en bepaal of het een echt \"natuurhuisje\" is.\n\n";

const CALIBRATION_INTRO: &str =
    "Ik heb al enkele voorbeelden gelabeld. Gebruik deze als referentie:\n\n";

const CALIBRATION_END: &str = "═══════════════════════════════════════════════\n\n";

const CRITERIA_HEADER: &str = "CRITERIA (gebruik de voorbeelden als kalibratie):\n\n";

const LISTING_HEADER: &str = "TE ANALYSEREN HUISJE:\n";

const SCORING_INSTRUCTION: &str = "Geef voor elk criterium een score van 0-10, en vermeld welk voorbeeld (JA/TWIJFEL/NEE) het meest lijkt.\n\nAntwoord in dit exacte JSON formaat:\n";

/// A composed oracle query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedQuery {
    pub text: String,

    /// SHA-256 hex digest of `text`; identical inputs give identical
    /// fingerprints.
    pub fingerprint: String,

    /// Calibration examples embedded in `text`.
    pub injected_examples: usize,
}

/// Compose the judgment query for one listing.
pub fn compose_query(
    listing: &ExtractedListing,
    store: &ExampleStore,
    registry: &CriterionRegistry,
    config: &ScoringConfig,
) -> ComposedQuery {
    let mut text = String::from(INTRO);
    let mut injected_examples = 0;

    if !store.is_empty() {
        text.push_str(CALIBRATION_INTRO);
        for category in ExampleCategory::ALL
            .into_iter()
            .filter(|c| c.is_calibration())
        {
            let examples = store.sample(category, config.examples_per_category);
            if examples.is_empty() {
                continue;
            }
            text.push_str(&calibration_header(category, config.positive_threshold));
            for example in examples {
                text.push_str(&format_example(example, config.features_per_example));
            }
            injected_examples += examples.len();
        }
        text.push_str(CALIBRATION_END);
    }

    text.push('\n');
    text.push_str(CRITERIA_HEADER);
    text.push_str(&format_criteria_table(registry));
    text.push('\n');

    text.push_str(LISTING_HEADER);
    text.push_str(&format_listing(listing, config.prompt_text_limit));
    text.push('\n');

    text.push_str(SCORING_INSTRUCTION);
    text.push_str(&format_reply_schema(registry));

    ComposedQuery {
        fingerprint: query_fingerprint(&text),
        text,
        injected_examples,
    }
}

/// SHA-256 hex digest of a query.
pub fn query_fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn calibration_header(category: ExampleCategory, threshold: f64) -> String {
    match category {
        ExampleCategory::Positive => {
            format!("═══ JA - NATUURHUISJE ({threshold:.0}-100 punten) ═══\n\n")
        }
        _ => format!(
            "═══ NEE - GEEN NATUURHUISJE (0-{:.0} punten) ═══\n\n",
            threshold - 1.0
        ),
    }
}

fn format_example(example: &LabeledExample, max_features: usize) -> String {
    let marker = match example.category {
        ExampleCategory::Positive => '✓',
        _ => '✗',
    };
    let features = example
        .key_features
        .iter()
        .take(max_features)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "{marker} Voorbeeld (Score: {:.1}/100):\n   Redenering: {}\n   Kenmerken: {}\n\n",
        example.score, example.reasoning, features
    )
}

/// Numbered criterion table in registry order.
pub fn format_criteria_table(registry: &CriterionRegistry) -> String {
    let mut table = String::new();
    for (i, criterion) in registry.iter().enumerate() {
        let _ = writeln!(
            table,
            "{}. {} ({}% gewicht): {}",
            i + 1,
            criterion.name,
            criterion.weight,
            criterion.description
        );
    }
    table
}

fn format_listing(listing: &ExtractedListing, limit: usize) -> String {
    let or_placeholder = |value: &str, placeholder: &'static str| -> String {
        if value.trim().is_empty() {
            placeholder.to_string()
        } else {
            truncate_chars(value, limit).to_string()
        }
    };

    format!(
        "Type: {}\nBeschrijving: {}\nOmgeving: {}\n",
        or_placeholder(&listing.kind, UNKNOWN_TYPE),
        or_placeholder(&listing.description, NOT_AVAILABLE),
        or_placeholder(&listing.location_info, NOT_AVAILABLE),
    )
}

/// The exact JSON shape the oracle is asked to reply with.
pub fn format_reply_schema(registry: &CriterionRegistry) -> String {
    let mut schema = String::from("{\n");
    for name in registry.names() {
        let _ = writeln!(schema, "    \"{name}\": <score 0-{MAX_SUBSCORE}>,");
    }
    let _ = writeln!(
        schema,
        "    \"{REASONING_KEY}\": \"<gedetailleerde uitleg, refereer naar voorbeelden als relevant>\","
    );
    let _ = writeln!(
        schema,
        "    \"{SIMILAR_TO_KEY}\": \"<'ja' of 'nee' - welke categorie lijkt het meest op>\","
    );
    let observations = (1..=MAX_OBSERVATIONS)
        .map(|i| format!("\"<observatie {i}>\""))
        .collect::<Vec<_>>()
        .join(", ");
    let _ = writeln!(schema, "    \"{OBSERVATIONS_KEY}\": [{observations}]");
    schema.push_str("}\n");
    schema
}
