//! Oracle trait for the external judgment service.

use async_trait::async_trait;

use crate::error::Result;

/// External text-generation service that judges a composed query.
///
/// Implementations wrap specific LLM providers (Anthropic, OpenAI, etc.).
/// A transport or authentication failure is an `Err`; a reply that
/// arrives but cannot be decoded is still `Ok` and is handled by the
/// response parser's fallback.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Send one query and return the free-form reply text.
    async fn judge(&self, query: &str) -> Result<String>;
}

#[async_trait]
impl<T: Oracle + ?Sized> Oracle for std::sync::Arc<T> {
    async fn judge(&self, query: &str) -> Result<String> {
        (**self).judge(query).await
    }
}
