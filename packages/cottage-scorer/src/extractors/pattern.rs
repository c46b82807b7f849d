//! Regex-based listing extraction.
//!
//! Works directly on the listing markup. Every rule degrades to an empty
//! field when its pattern is absent.

use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use crate::defaults::LOCATION_TEXT_LIMIT;
use crate::traits::extractor::ListingExtractor;
use crate::types::config::ScoringConfig;
use crate::types::listing::{truncate_chars, ExtractedListing};

static RE_DESCRIPTION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<h2>.*?</h2>\s*<p>(.*?)</p>").expect("description pattern is valid")
});

static RE_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]+>").expect("tag pattern is valid"));

/// Section heading that introduces the surroundings text.
pub const LOCATION_MARKER: &str = "Natuur en omgeving";

/// Marker that ends the surroundings block.
pub const BLOCK_END_MARKER: &str = "</div>";

/// Accommodation type labels, highest priority first.
pub const TYPE_LABELS: &[&str] = &[
    "Kleinschalig vakantiepark",
    "Vrijstaand",
    "Chalet",
    "Blokhut",
    "Boomhut",
];

/// Default [`ListingExtractor`] driven by string patterns.
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    location_marker: String,
    block_end_marker: String,
    type_labels: Vec<String>,
    location_limit: usize,
}

impl Default for PatternExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternExtractor {
    pub fn new() -> Self {
        Self {
            location_marker: LOCATION_MARKER.to_string(),
            block_end_marker: BLOCK_END_MARKER.to_string(),
            type_labels: TYPE_LABELS.iter().map(|s| s.to_string()).collect(),
            location_limit: LOCATION_TEXT_LIMIT,
        }
    }

    /// Extractor honouring the location cap of `config`.
    pub fn from_config(config: &ScoringConfig) -> Self {
        Self::new().with_location_limit(config.location_text_limit)
    }

    /// Use a different heading for the surroundings section.
    pub fn with_location_marker(mut self, marker: impl Into<String>) -> Self {
        self.location_marker = marker.into();
        self
    }

    /// Replace the type labels (highest priority first).
    pub fn with_type_labels(mut self, labels: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.type_labels = labels.into_iter().map(|l| l.into()).collect();
        self
    }

    /// Set the character cap for location text.
    pub fn with_location_limit(mut self, limit: usize) -> Self {
        self.location_limit = limit;
        self
    }

    /// Paragraphs that directly follow an `<h2>` heading, joined by a space.
    pub fn extract_description(&self, html: &str) -> String {
        RE_DESCRIPTION
            .captures_iter(html)
            .filter_map(|cap| cap.get(1))
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Markup-free text between the location marker and the end of its
    /// block, capped in length. Empty when the marker is absent.
    pub fn extract_location(&self, html: &str) -> String {
        let Some(start) = html.find(&self.location_marker) else {
            return String::new();
        };
        let section = &html[start + self.location_marker.len()..];
        let section = section
            .split(self.location_marker.as_str())
            .next()
            .unwrap_or_default();
        let section = section
            .split(self.block_end_marker.as_str())
            .next()
            .unwrap_or_default();

        let text = RE_TAG.replace_all(section, "");
        truncate_chars(&text, self.location_limit).to_string()
    }

    /// First type label that occurs anywhere in the markup.
    pub fn extract_kind(&self, html: &str) -> String {
        self.type_labels
            .iter()
            .find(|label| html.contains(label.as_str()))
            .cloned()
            .unwrap_or_default()
    }
}

impl ListingExtractor for PatternExtractor {
    fn extract(&self, raw: &str) -> ExtractedListing {
        let listing = ExtractedListing {
            kind: self.extract_kind(raw),
            description: self.extract_description(raw),
            location_info: self.extract_location(raw),
            facilities: Vec::new(),
        };

        debug!(
            kind = %listing.kind,
            description_len = listing.description.len(),
            location_len = listing.location_info.len(),
            "Extracted listing attributes"
        );

        listing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
<html><body>
<h1>Boshuisje De Specht</h1>
<span class="type">Vrijstaand</span> <span>Chalet</span>
<h2>Over het huisje</h2>
<p>Een knus houten huisje midden in het bos.</p>
<h2>Indeling</h2>
  <p>Twee slaapkamers en een houtkachel.</p>
<div class="env"><h3>Natuur en omgeving</h3><p>Direct aan de <b>Veluwe</b>, heide op loopafstand.</p></div>
<div>Overig</div>
</body></html>
"#;

    #[test]
    fn test_description_joins_heading_paragraphs() {
        let listing = PatternExtractor::new().extract(LISTING);
        assert_eq!(
            listing.description,
            "Een knus houten huisje midden in het bos. Twee slaapkamers en een houtkachel."
        );
    }

    #[test]
    fn test_location_is_stripped_of_markup() {
        let listing = PatternExtractor::new().extract(LISTING);
        assert_eq!(
            listing.location_info,
            "Direct aan de Veluwe, heide op loopafstand."
        );
    }

    #[test]
    fn test_type_follows_priority_order() {
        // Both "Vrijstaand" and "Chalet" occur; "Vrijstaand" has priority.
        let listing = PatternExtractor::new().extract(LISTING);
        assert_eq!(listing.kind, "Vrijstaand");

        let park = "<p>Chalet op een Kleinschalig vakantiepark</p>";
        assert_eq!(
            PatternExtractor::new().extract_kind(park),
            "Kleinschalig vakantiepark"
        );
    }

    #[test]
    fn test_missing_patterns_degrade_to_empty() {
        let listing = PatternExtractor::new().extract("<html><body>Niets hier</body></html>");
        assert!(listing.is_empty());
    }

    #[test]
    fn test_location_is_capped() {
        let long = format!("Natuur en omgeving<p>{}</p></div>", "bos ".repeat(600));
        let location = PatternExtractor::new().extract_location(&long);
        assert_eq!(location.chars().count(), 1000);

        let short = PatternExtractor::new()
            .with_location_limit(10)
            .extract_location(&long);
        assert_eq!(short.chars().count(), 10);

        let config = ScoringConfig {
            location_text_limit: 25,
            ..ScoringConfig::default()
        };
        let configured = PatternExtractor::from_config(&config).extract_location(&long);
        assert_eq!(configured.chars().count(), 25);
    }

    #[test]
    fn test_location_without_block_end_takes_rest() {
        let html = "Natuur en omgeving: <i>duinen</i> en zee";
        assert_eq!(
            PatternExtractor::new().extract_location(html),
            ": duinen en zee"
        );
    }
}
