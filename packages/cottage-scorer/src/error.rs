//! Typed errors for the scoring library.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling.
//!
//! Only two failure kinds ever reach the caller of an analysis: the
//! listing could not be fetched, or the oracle could not be reached.
//! Store load problems, extraction misses and unusable oracle replies are
//! recovered where they happen.

use thiserror::Error;

/// Errors that can occur during an analysis call.
#[derive(Debug, Error)]
pub enum ScoringError {
    /// Fetching the listing failed
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),

    /// Oracle transport or authentication failure
    #[error("oracle error: {0}")]
    Oracle(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Criterion registry violates its load-time invariants
    #[error("invalid criterion registry: {reason}")]
    InvalidRegistry { reason: String },

    /// Configuration error
    #[error("config error: {0}")]
    Config(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Errors that can occur while fetching a listing page.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Invalid URL format or unsupported scheme
    #[error("invalid URL: {url}")]
    InvalidUrl { url: String },

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Server answered with a non-success status
    #[error("HTTP {status} for {url}")]
    Status { url: String, status: u16 },

    /// Connection timeout
    #[error("timeout fetching: {url}")]
    Timeout { url: String },
}

/// Errors raised while reading the example store.
///
/// These never cross [`ExampleStore::load`](crate::stores::ExampleStore::load);
/// they are logged and the store degrades to what could be read.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Source could not be opened or read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Tabular data could not be decoded
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row
    #[error("missing column: {column}")]
    MissingColumn { column: String },
}

/// Result type alias for scoring operations.
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Result type alias for fetch operations.
pub type FetchResult<T> = std::result::Result<T, FetchError>;

/// Result type alias for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
