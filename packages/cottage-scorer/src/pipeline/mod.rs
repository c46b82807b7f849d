//! Scoring pipeline - the core of the library.
//!
//! The pipeline orchestrates:
//! - Query composition (criteria, calibration examples, listing attributes)
//! - Oracle reply parsing with a fixed fallback
//! - Weighted aggregation and classification
//! - The `Analyzer` context that runs one listing end to end

pub mod aggregate;
pub mod analyzer;
pub mod parse;
pub mod prompts;

pub use aggregate::{aggregate, aggregate_with};
pub use analyzer::Analyzer;
pub use parse::{parse_oracle_reply, parse_oracle_reply_for, structured_span};
pub use prompts::{
    compose_query, format_criteria_table, format_reply_schema, query_fingerprint, ComposedQuery,
};
