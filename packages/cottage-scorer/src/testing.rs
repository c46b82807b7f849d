//! Testing utilities including mock implementations.
//!
//! These are useful for testing applications that use the scoring library
//! without making real oracle or network calls.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::{Arc, RwLock};

use crate::error::{FetchError, FetchResult, Result, ScoringError};
use crate::traits::{fetcher::Fetcher, oracle::Oracle};

/// A mock oracle for testing.
///
/// Replies come from a queue first, then from the fixed reply. With
/// neither configured it answers with an empty string, which the parser
/// turns into the fallback.
#[derive(Default, Clone)]
pub struct MockOracle {
    /// Replies consumed in order
    queued: Arc<RwLock<VecDeque<String>>>,

    /// Reply used once the queue is empty
    fixed: Option<String>,

    /// Transport failure to simulate on every call
    failure: Option<String>,

    /// Queries received, for assertions
    queries: Arc<RwLock<Vec<String>>>,
}

impl MockOracle {
    /// Create a new mock oracle with default behavior.
    pub fn new() -> Self {
        Self::default()
    }

    /// A mock whose every call fails with a transport error.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    /// Answer every call with `reply` once the queue is empty.
    pub fn with_reply(mut self, reply: impl Into<String>) -> Self {
        self.fixed = Some(reply.into());
        self
    }

    /// Queue replies, returned one per call in order.
    pub fn with_replies(self, replies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.queued
            .write()
            .unwrap()
            .extend(replies.into_iter().map(|r| r.into()));
        self
    }

    /// Get all queries sent to this mock.
    pub fn queries(&self) -> Vec<String> {
        self.queries.read().unwrap().clone()
    }

    /// Clear query history.
    pub fn clear_queries(&self) {
        self.queries.write().unwrap().clear();
    }
}

#[async_trait]
impl Oracle for MockOracle {
    async fn judge(&self, query: &str) -> Result<String> {
        self.queries.write().unwrap().push(query.to_string());

        if let Some(message) = &self.failure {
            return Err(ScoringError::Oracle(message.clone().into()));
        }

        let queued = self.queued.write().unwrap().pop_front();
        Ok(queued
            .or_else(|| self.fixed.clone())
            .unwrap_or_default())
    }
}

/// A mock fetcher serving predefined pages.
///
/// Unknown URLs answer HTTP 404.
#[derive(Default, Clone)]
pub struct MockFetcher {
    pages: Arc<RwLock<HashMap<String, String>>>,
    broken: Arc<RwLock<HashSet<String>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve `html` for `url`.
    pub fn with_page(self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.pages.write().unwrap().insert(url.into(), html.into());
        self
    }

    /// Fail with a transport error for `url`.
    pub fn with_broken(self, url: impl Into<String>) -> Self {
        self.broken.write().unwrap().insert(url.into());
        self
    }

    /// URLs fetched so far.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }
}

#[async_trait]
impl Fetcher for MockFetcher {
    async fn fetch(&self, url: &str) -> FetchResult<String> {
        self.calls.write().unwrap().push(url.to_string());

        if self.broken.read().unwrap().contains(url) {
            return Err(FetchError::Http("connection reset".into()));
        }

        self.pages
            .read()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| FetchError::Status {
                url: url.to_string(),
                status: 404,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_oracle_queue_then_fixed() {
        let oracle = MockOracle::new()
            .with_replies(["eerste", "tweede"])
            .with_reply("vast");

        assert_eq!(oracle.judge("a").await.unwrap(), "eerste");
        assert_eq!(oracle.judge("b").await.unwrap(), "tweede");
        assert_eq!(oracle.judge("c").await.unwrap(), "vast");
        assert_eq!(oracle.queries(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_mock_oracle_failure_and_clear_queries() {
        let oracle = MockOracle::failing("unauthorized");
        assert!(matches!(oracle.judge("a").await, Err(ScoringError::Oracle(_))));
        assert_eq!(oracle.queries().len(), 1);

        oracle.clear_queries();
        assert!(oracle.queries().is_empty());
    }

    #[tokio::test]
    async fn test_mock_fetcher_broken_url_is_transport_error() {
        let fetcher = MockFetcher::new()
            .with_page("https://x/1", "<p>hoi</p>")
            .with_broken("https://x/1");
        assert!(matches!(fetcher.fetch("https://x/1").await, Err(FetchError::Http(_))));
    }

    #[tokio::test]
    async fn test_mock_fetcher_unknown_url_is_404() {
        let fetcher = MockFetcher::new().with_page("https://x/1", "<p>hoi</p>");

        assert_eq!(fetcher.fetch("https://x/1").await.unwrap(), "<p>hoi</p>");
        assert!(matches!(
            fetcher.fetch("https://x/2").await,
            Err(FetchError::Status { status: 404, .. })
        ));
        assert_eq!(fetcher.calls().len(), 2);
    }
}
