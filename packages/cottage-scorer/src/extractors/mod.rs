//! Listing extractor implementations.
//!
//! # Available Extractors
//!
//! - `PatternExtractor` - Regex and marker rules over raw listing markup

mod pattern;

pub use pattern::{PatternExtractor, BLOCK_END_MARKER, LOCATION_MARKER, TYPE_LABELS};

// Re-export from traits for convenience
pub use crate::traits::extractor::ListingExtractor;
