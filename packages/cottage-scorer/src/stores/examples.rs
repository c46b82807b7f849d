//! Labeled example store backed by a CSV file.
//!
//! The store is loaded once at startup and never mutated. Loading is
//! soft: a missing or unreadable file yields an empty store, and bad rows
//! are skipped one by one, so scoring can always continue with whatever
//! calibration context is available.

use indexmap::IndexMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::defaults::{EXAMPLE_SCORE_FALLBACK, FEATURE_DELIMITER, PLACEHOLDER_URL_TOKENS};
use crate::error::{StoreError, StoreResult};
use crate::types::example::{ExampleCategory, LabeledExample};

const URL_COLUMNS: &[&str] = &["URL"];
const CATEGORY_COLUMNS: &[&str] = &["Categorie", "Category"];
const SCORE_COLUMNS: &[&str] = &["Score"];
const REASONING_COLUMNS: &[&str] = &["Redenering", "Reasoning"];
const FEATURE_COLUMNS: &[&str] = &["Kenmerken", "Features"];

/// In-memory snapshot of labeled examples grouped by category.
///
/// Every category is always present in the mapping, possibly empty.
/// Examples keep the order in which they were loaded.
#[derive(Debug, Clone, PartialEq)]
pub struct ExampleStore {
    examples: IndexMap<ExampleCategory, Vec<LabeledExample>>,
}

impl Default for ExampleStore {
    fn default() -> Self {
        Self::empty()
    }
}

impl ExampleStore {
    /// A store with no examples in any category.
    pub fn empty() -> Self {
        Self {
            examples: ExampleCategory::ALL
                .into_iter()
                .map(|c| (c, Vec::new()))
                .collect(),
        }
    }

    /// Build a store from already constructed examples.
    pub fn from_examples(examples: impl IntoIterator<Item = LabeledExample>) -> Self {
        let mut store = Self::empty();
        for example in examples {
            store.push(example);
        }
        store
    }

    /// Load examples from a CSV file.
    ///
    /// Never fails: a missing or unreadable file is logged and yields an
    /// empty store.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            warn!(path = %path.display(), "No training data found, scoring without examples");
            return Self::empty();
        }

        let result = File::open(path)
            .map_err(StoreError::from)
            .and_then(Self::try_from_reader);

        match result {
            Ok(store) => {
                info!(path = %path.display(), examples = %store.summary(), "Loaded training data");
                store
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Could not load training data");
                Self::empty()
            }
        }
    }

    /// Load examples from any CSV source. Same soft-failure policy as
    /// [`ExampleStore::load`].
    pub fn from_reader<R: Read>(reader: R) -> Self {
        Self::try_from_reader(reader).unwrap_or_else(|e| {
            warn!(error = %e, "Could not read training data");
            Self::empty()
        })
    }

    /// Parse a CSV source, failing only when the header is unusable.
    fn try_from_reader<R: Read>(reader: R) -> StoreResult<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(reader);

        let headers = csv_reader.headers()?.clone();
        let find = |names: &[&str]| {
            headers
                .iter()
                .position(|h| names.iter().any(|n| h.eq_ignore_ascii_case(n)))
        };
        let required = |names: &[&str]| {
            find(names).ok_or_else(|| StoreError::MissingColumn {
                column: names[0].to_string(),
            })
        };

        let url_idx = required(URL_COLUMNS)?;
        let category_idx = required(CATEGORY_COLUMNS)?;
        let score_idx = find(SCORE_COLUMNS);
        let reasoning_idx = find(REASONING_COLUMNS);
        let features_idx = find(FEATURE_COLUMNS);

        let mut store = Self::empty();

        for (row, record) in csv_reader.records().enumerate() {
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    warn!(row = row + 1, error = %e, "Skipping malformed training row");
                    continue;
                }
            };
            let field = |idx: Option<usize>| idx.and_then(|i| record.get(i)).unwrap_or("");

            let url = field(Some(url_idx));
            if is_placeholder_url(url) {
                debug!(row = row + 1, url = %url, "Skipping template row");
                continue;
            }

            let raw_category = field(Some(category_idx));
            let Some(category) = ExampleCategory::from_tag(raw_category) else {
                warn!(row = row + 1, category = %raw_category, "Skipping row with unknown category");
                continue;
            };

            store.push(LabeledExample {
                url: url.to_string(),
                category,
                score: parse_example_score(field(score_idx)),
                reasoning: field(reasoning_idx).to_string(),
                key_features: split_features(field(features_idx)),
            });
        }

        Ok(store)
    }

    fn push(&mut self, example: LabeledExample) {
        self.examples
            .entry(example.category)
            .or_default()
            .push(example);
    }

    /// The first `max_n` examples of `category`, in stored order.
    ///
    /// Deterministic on purpose: the same data always yields the same
    /// composed query.
    pub fn sample(&self, category: ExampleCategory, max_n: usize) -> &[LabeledExample] {
        let examples = self.get(category);
        &examples[..examples.len().min(max_n)]
    }

    /// All examples of `category`.
    pub fn get(&self, category: ExampleCategory) -> &[LabeledExample] {
        self.examples
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The full category mapping.
    pub fn by_category(&self) -> &IndexMap<ExampleCategory, Vec<LabeledExample>> {
        &self.examples
    }

    /// Number of examples per category.
    pub fn counts(&self) -> IndexMap<ExampleCategory, usize> {
        self.examples.iter().map(|(c, v)| (*c, v.len())).collect()
    }

    pub fn total(&self) -> usize {
        self.examples.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// One-line count summary, e.g. `"5 total (JA: 2, TWIJFEL: 1, NEE: 2)"`.
    pub fn summary(&self) -> String {
        let parts = ExampleCategory::ALL
            .iter()
            .map(|c| format!("{}: {}", c.short_label(), self.get(*c).len()))
            .collect::<Vec<_>>()
            .join(", ");
        format!("{} total ({})", self.total(), parts)
    }
}

/// Whether a URL belongs to a template row.
pub fn is_placeholder_url(url: &str) -> bool {
    PLACEHOLDER_URL_TOKENS.iter().any(|t| url.contains(t))
}

/// Parse a human score, falling back to 50.0 when blank or unparsable.
pub fn parse_example_score(raw: &str) -> f64 {
    let raw = raw.trim();
    if raw.is_empty() {
        return EXAMPLE_SCORE_FALLBACK;
    }

    match raw.parse::<f64>() {
        Ok(score) if score.is_finite() => score.clamp(0.0, 100.0),
        _ => {
            warn!(score = %raw, fallback = EXAMPLE_SCORE_FALLBACK, "Unparsable example score");
            EXAMPLE_SCORE_FALLBACK
        }
    }
}

/// Split a `"; "`-delimited feature list. An empty field yields no features.
pub fn split_features(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(FEATURE_DELIMITER).map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const CSV: &str = "\
URL,Categorie,Score,Redenering,Kenmerken
https://www.natuurhuisje.nl/vakantiehuisje/XXXXX,ja,90,Template,Voorbeeld
https://www.natuurhuisje.nl/vakantiehuisje/101,ja,85,Midden in het bos,Bos; Vrijstaand; Geen buren; Veranda
https://www.natuurhuisje.nl/vakantiehuisje/102,nee,,Vakantiepark,
https://www.natuurhuisje.nl/vakantiehuisje/103,twijfel_nee,55,Rand van dorp,Dorp
https://www.natuurhuisje.nl/vakantiehuisje/104,nee,veel,Stad,Stad; Druk
https://www.natuurhuisje.nl/vakantiehuisje/105,misschien,40,Onbekend,
";

    fn store() -> ExampleStore {
        ExampleStore::from_reader(CSV.as_bytes())
    }

    #[test]
    fn test_skips_placeholder_rows() {
        let store = store();
        assert!(store
            .get(ExampleCategory::Positive)
            .iter()
            .all(|e| !e.url.contains("XXXXX")));
        assert_eq!(store.get(ExampleCategory::Positive).len(), 1);
    }

    #[test]
    fn test_blank_and_unparsable_scores_fall_back_to_50() {
        let store = store();
        let negatives = store.get(ExampleCategory::Negative);
        assert_eq!(negatives.len(), 2);
        assert_eq!(negatives[0].score, 50.0);
        assert_eq!(negatives[1].score, 50.0);
    }

    #[test]
    fn test_features_split_on_semicolon_space() {
        let store = store();
        let positive = &store.get(ExampleCategory::Positive)[0];
        assert_eq!(
            positive.key_features,
            vec!["Bos", "Vrijstaand", "Geen buren", "Veranda"]
        );
        assert!(store.get(ExampleCategory::Negative)[0].key_features.is_empty());
    }

    #[test]
    fn test_ambiguous_examples_are_loaded_and_counted() {
        let store = store();
        assert_eq!(store.get(ExampleCategory::AmbiguousNegative).len(), 1);
        assert_eq!(store.total(), 4);
        assert_eq!(store.summary(), "4 total (JA: 1, TWIJFEL: 1, NEE: 2)");
    }

    #[test]
    fn test_sample_returns_prefix_in_stored_order() {
        let store = ExampleStore::from_examples((0..5).map(|i| {
            LabeledExample::new(format!("https://x/{i}"), ExampleCategory::Positive, 80.0)
        }));
        let sample = store.sample(ExampleCategory::Positive, 2);
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[0].url, "https://x/0");
        assert_eq!(sample[1].url, "https://x/1");
        assert!(store.sample(ExampleCategory::Negative, 2).is_empty());
    }

    #[test]
    fn test_missing_file_yields_empty_store() {
        let store = ExampleStore::load("/definitely/not/here/training_data.csv");
        assert!(store.is_empty());
        assert_eq!(store.counts().len(), 3);
    }

    #[test]
    fn test_missing_required_column_yields_empty_store() {
        let store = ExampleStore::from_reader("Link,Score\nhttps://x,10\n".as_bytes());
        assert!(store.is_empty());
    }

    #[test]
    fn test_malformed_row_is_skipped_rest_loads() {
        let data = "\
URL,Categorie,Score,Redenering,Kenmerken
https://x/1,ja,80,Goed,Bos
https://x/2,nee
https://x/3,nee,20,Slecht,Park
";
        let store = ExampleStore::from_reader(data.as_bytes());
        assert_eq!(store.total(), 2);
    }

    #[test]
    fn test_load_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(CSV.as_bytes()).unwrap();

        let store = ExampleStore::load(file.path());
        assert_eq!(store.total(), 4);
    }

    #[test]
    fn test_quoted_fields_with_commas() {
        let data = "URL,Categorie,Score,Redenering,Kenmerken\nhttps://x/1,ja,70,\"Bos, heide en rust\",\"Bos; Heide\"\n";
        let store = ExampleStore::from_reader(data.as_bytes());
        let example = &store.get(ExampleCategory::Positive)[0];
        assert_eq!(example.reasoning, "Bos, heide en rust");
        assert_eq!(example.key_features, vec!["Bos", "Heide"]);
    }
}
