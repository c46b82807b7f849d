//! Extraction strategy trait.

use crate::types::listing::ExtractedListing;

/// Reduces raw listing content to an [`ExtractedListing`].
///
/// Extraction never fails: anything that cannot be found is left empty.
pub trait ListingExtractor: Send + Sync {
    fn extract(&self, raw: &str) -> ExtractedListing;
}
