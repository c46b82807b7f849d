//! Nature Cottage Listing Scorer
//!
//! Decides whether a vacation-rental listing is a "natuurhuisje": a
//! cottage genuinely immersed in nature. A language-model oracle scores
//! five weighted criteria, calibrated by a handful of human-labeled
//! examples, and the library turns those subscores into a deterministic
//! weighted total and verdict.
//!
//! # Usage
//!
//! ```rust,ignore
//! use cottage_scorer::{Analyzer, ExampleStore, HttpFetcher, render_report};
//! use cottage_scorer::ai::AnthropicOracle;
//!
//! let analyzer = Analyzer::new(AnthropicOracle::from_env()?, HttpFetcher::new()?)
//!     .with_store(ExampleStore::load("training_data.csv"));
//!
//! let result = analyzer.analyze_url("https://www.natuurhuisje.nl/vakantiehuisje/123").await?;
//! println!("{}", render_report(&result, analyzer.registry()));
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Seams for the oracle, the page fetcher and extraction
//! - [`types`] - Examples, criteria, listings, scores and results
//! - [`pipeline`] - Composition, parsing, aggregation and the `Analyzer`
//! - [`stores`] - The labeled example store
//! - [`extractors`] - Pattern-based listing extraction
//! - [`fetchers`] - HTTP page fetching
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod defaults;
pub mod error;
pub mod extractors;
pub mod fetchers;
pub mod format;
pub mod pipeline;
pub mod security;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(any(feature = "anthropic", feature = "openai"))]
pub mod ai;

// Re-export core types at crate root
pub use error::{FetchError, ScoringError, StoreError};
pub use traits::{extractor::ListingExtractor, fetcher::Fetcher, oracle::Oracle};
pub use types::{
    config::ScoringConfig,
    criterion::{CriterionRegistry, CriterionSpec},
    example::{ExampleCategory, LabeledExample},
    listing::ExtractedListing,
    result::{CriterionContribution, ScoreBand, ScoringResult},
    scores::RawCriterionScores,
};

pub use pipeline::{
    aggregate, aggregate_with, compose_query, parse_oracle_reply, parse_oracle_reply_for,
    Analyzer, ComposedQuery,
};

pub use extractors::PatternExtractor;
pub use fetchers::HttpFetcher;
pub use format::{render_report, similarity_label};
pub use stores::ExampleStore;
