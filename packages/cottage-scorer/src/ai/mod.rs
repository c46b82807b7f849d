//! Oracle implementations backed by hosted language models.
//!
//! Each provider sits behind its own feature flag.

#[cfg(feature = "anthropic")]
mod anthropic;
#[cfg(feature = "openai")]
mod openai;

#[cfg(feature = "anthropic")]
pub use anthropic::AnthropicOracle;
#[cfg(feature = "openai")]
pub use openai::OpenAIOracle;

/// Token cap for one judgement.
pub const MAX_REPLY_TOKENS: u32 = 1000;
