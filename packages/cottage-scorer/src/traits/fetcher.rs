//! Fetcher trait for retrieving raw listing markup.

use async_trait::async_trait;

use crate::error::FetchResult;

/// Source of raw listing markup.
///
/// No retry or backoff is expected at this boundary; a failure is fatal
/// to the analysis call that triggered it.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Fetch the raw markup behind `url`.
    async fn fetch(&self, url: &str) -> FetchResult<String>;
}

#[async_trait]
impl<T: Fetcher + ?Sized> Fetcher for std::sync::Arc<T> {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        (**self).fetch(url).await
    }
}
