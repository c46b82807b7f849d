//! Seams to the external collaborators of the scoring pipeline.
//!
//! Applications implement these to plug in the judgment service, the
//! page source and, optionally, a different extraction strategy.

pub mod extractor;
pub mod fetcher;
pub mod oracle;
