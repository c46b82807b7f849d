//! Fetcher implementations for listing pages.
//!
//! # Available Fetchers
//!
//! - `HttpFetcher` - Plain HTTP(S) GET with a browser User-Agent
//! - `MockFetcher` - For testing (see [`crate::testing`])

mod http;

pub use http::{validate_url, HttpFetcher, DEFAULT_TIMEOUT_SECS};

// Re-export from traits for convenience
pub use crate::traits::fetcher::Fetcher;
