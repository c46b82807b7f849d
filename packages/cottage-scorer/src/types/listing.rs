//! Attribute bag extracted from one listing page.

use serde::{Deserialize, Serialize};

/// Normalized attributes of a single listing.
///
/// Every field may be empty; extraction degrades instead of failing and
/// downstream stages render empty attributes with a placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedListing {
    /// Accommodation type label, e.g. "Vrijstaand".
    #[serde(rename = "type")]
    pub kind: String,

    /// Concatenated description paragraphs.
    pub description: String,

    /// Markup-free text of the surroundings section, bounded in length.
    pub location_info: String,

    #[serde(default)]
    pub facilities: Vec<String>,
}

impl ExtractedListing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_location_info(mut self, location_info: impl Into<String>) -> Self {
        self.location_info = location_info.into();
        self
    }

    /// True when nothing at all could be extracted.
    pub fn is_empty(&self) -> bool {
        self.kind.is_empty()
            && self.description.is_empty()
            && self.location_info.is_empty()
            && self.facilities.is_empty()
    }
}

/// Truncate to at most `max_chars` characters without splitting a code point.
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
