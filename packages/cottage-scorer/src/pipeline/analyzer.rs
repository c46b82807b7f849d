//! The Analyzer - main entry point for scoring a listing.
//!
//! The Analyzer is an immutable scoring context: example store, criterion
//! registry, configuration and collaborators are fixed at construction
//! and only read afterwards, so one instance can serve concurrent calls
//! behind an `Arc` without locking.
//!
//! One call runs fetch → extract → compose → judge → parse → aggregate.
//! Only the fetch and the oracle call can fail; every other stage
//! degrades to a documented default.

use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::extractors::PatternExtractor;
use crate::pipeline::{
    aggregate::aggregate_with,
    parse::parse_oracle_reply_for,
    prompts::{compose_query, ComposedQuery},
};
use crate::stores::ExampleStore;
use crate::traits::{extractor::ListingExtractor, fetcher::Fetcher, oracle::Oracle};
use crate::types::{
    config::ScoringConfig,
    criterion::CriterionRegistry,
    listing::{truncate_chars, ExtractedListing},
    result::ScoringResult,
};

/// Scores listings against the rubric.
///
/// # Example
///
/// ```rust,ignore
/// let store = ExampleStore::load("training_data.csv");
/// let analyzer = Analyzer::new(AnthropicOracle::from_env()?, HttpFetcher::new()?)
///     .with_store(store);
///
/// let result = analyzer.analyze_url("https://www.natuurhuisje.nl/vakantiehuisje/123").await?;
/// println!("{}", render_report(&result, analyzer.registry()));
/// ```
pub struct Analyzer<O: Oracle, F: Fetcher, E: ListingExtractor = PatternExtractor> {
    oracle: O,
    fetcher: F,
    extractor: E,
    store: ExampleStore,
    registry: CriterionRegistry,
    config: ScoringConfig,
}

impl<O: Oracle, F: Fetcher> Analyzer<O, F> {
    /// Create an analyzer with an empty store, the default rubric and the
    /// pattern extractor.
    pub fn new(oracle: O, fetcher: F) -> Self {
        Self {
            oracle,
            fetcher,
            // Location text is capped in `extract` from the config.
            extractor: PatternExtractor::new().with_location_limit(usize::MAX),
            store: ExampleStore::empty(),
            registry: CriterionRegistry::default(),
            config: ScoringConfig::default(),
        }
    }
}

impl<O: Oracle, F: Fetcher, E: ListingExtractor> Analyzer<O, F, E> {
    /// Use a loaded example store.
    pub fn with_store(mut self, store: ExampleStore) -> Self {
        self.store = store;
        self
    }

    /// Use a different criterion registry.
    pub fn with_registry(mut self, registry: CriterionRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Use custom configuration.
    pub fn with_config(mut self, config: ScoringConfig) -> Self {
        self.config = config;
        self
    }

    /// Swap the extraction strategy.
    pub fn with_extractor<E2: ListingExtractor>(self, extractor: E2) -> Analyzer<O, F, E2> {
        Analyzer {
            oracle: self.oracle,
            fetcher: self.fetcher,
            extractor,
            store: self.store,
            registry: self.registry,
            config: self.config,
        }
    }

    pub fn store(&self) -> &ExampleStore {
        &self.store
    }

    pub fn registry(&self) -> &CriterionRegistry {
        &self.registry
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    /// Extract listing attributes from raw markup.
    ///
    /// The location text is capped at `config.location_text_limit`
    /// whichever extractor is in use.
    pub fn extract(&self, html: &str) -> ExtractedListing {
        let mut listing = self.extractor.extract(html);
        let limit = self.config.location_text_limit;
        if listing.location_info.chars().count() > limit {
            listing.location_info = truncate_chars(&listing.location_info, limit).to_string();
        }
        listing
    }

    /// Compose the oracle query for raw markup without calling the oracle.
    pub fn compose_for(&self, html: &str) -> ComposedQuery {
        let listing = self.extract(html);
        compose_query(&listing, &self.store, &self.registry, &self.config)
    }

    /// Fetch a listing and score it.
    #[instrument(skip_all, fields(url = %url))]
    pub async fn analyze_url(&self, url: &str) -> Result<ScoringResult> {
        let html = self.fetcher.fetch(url).await?;
        debug!(html_len = html.len(), "Fetched listing");
        self.analyze_html(&html).await
    }

    /// Score already fetched listing markup.
    pub async fn analyze_html(&self, html: &str) -> Result<ScoringResult> {
        let query = self.compose_for(html);
        debug!(
            fingerprint = %query.fingerprint,
            injected_examples = query.injected_examples,
            query_len = query.text.len(),
            "Composed oracle query"
        );

        let reply = self.oracle.judge(&query.text).await?;
        debug!(reply_len = reply.len(), "Oracle replied");

        let raw = parse_oracle_reply_for(&reply, &self.registry);
        let result = aggregate_with(&raw, &self.registry, &self.config);

        info!(
            score = result.confidence_score,
            is_positive = result.is_positive,
            used_fallback = result.used_fallback,
            similar_to = result.similar_to.as_deref().unwrap_or("-"),
            "Listing scored"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockFetcher, MockOracle};
    use crate::types::example::{ExampleCategory, LabeledExample};

    #[tokio::test]
    async fn test_analyze_html_scores_reply() {
        let oracle = MockOracle::new().with_reply(
            r#"{"natuur_nabijheid": 10, "privacy_rust": 10, "omgeving_kwaliteit": 10,
                "authenticiteit": 10, "bebouwing": 10, "reasoning": "Perfect",
                "similar_to": "ja", "key_observations": []}"#,
        );
        let analyzer = Analyzer::new(oracle, MockFetcher::new());

        let result = analyzer.analyze_html("<h2>X</h2><p>Bos</p>").await.unwrap();
        assert!(result.is_positive);
        assert!((result.confidence_score - 100.0).abs() < 1e-9);
    }

    fn long_location_html(chars: usize) -> String {
        format!("<div>Natuur en omgeving<p>{}</p></div>", "b".repeat(chars))
    }

    #[test]
    fn test_configured_location_limit_applies() {
        let analyzer = Analyzer::new(MockOracle::new(), MockFetcher::new())
            .with_config(ScoringConfig::new().with_location_text_limit(10));

        let listing = analyzer.extract(&long_location_html(2400));
        assert_eq!(listing.location_info.chars().count(), 10);
    }

    #[test]
    fn test_location_limit_can_exceed_extractor_default() {
        let analyzer = Analyzer::new(MockOracle::new(), MockFetcher::new())
            .with_config(ScoringConfig::new().with_location_text_limit(2000));
        assert_eq!(analyzer.extract(&long_location_html(2400)).location_info.chars().count(), 2000);

        let default = Analyzer::new(MockOracle::new(), MockFetcher::new());
        assert_eq!(default.extract(&long_location_html(2400)).location_info.chars().count(), 1000);
    }

    #[test]
    fn test_location_limit_applies_to_custom_extractor() {
        let analyzer = Analyzer::new(MockOracle::new(), MockFetcher::new())
            .with_extractor(PatternExtractor::new().with_location_limit(usize::MAX))
            .with_config(ScoringConfig::new().with_location_text_limit(25));
        assert_eq!(analyzer.extract(&long_location_html(300)).location_info.chars().count(), 25);
    }

    #[tokio::test]
    async fn test_oracle_failure_propagates() {
        let analyzer = Analyzer::new(MockOracle::failing("unauthorized"), MockFetcher::new());
        assert!(analyzer.analyze_html("<p>x</p>").await.is_err());
    }

    #[tokio::test]
    async fn test_query_carries_store_examples() {
        let store = ExampleStore::from_examples(vec![LabeledExample::new(
            "https://x/1",
            ExampleCategory::Positive,
            90.0,
        )
        .with_reasoning("Midden in de duinen")]);
        let oracle = MockOracle::new().with_reply("{}");
        let analyzer = Analyzer::new(oracle, MockFetcher::new()).with_store(store);

        analyzer.analyze_html("").await.unwrap();
        let queries = analyzer.oracle().queries();
        assert_eq!(queries.len(), 1);
        assert!(queries[0].contains("Midden in de duinen"));
    }
}
