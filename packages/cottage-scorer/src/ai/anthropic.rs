//! Anthropic Messages API implementation of the Oracle trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use cottage_scorer::ai::AnthropicOracle;
//!
//! let oracle = AnthropicOracle::new("sk-ant-...").with_model("claude-sonnet-4-20250514");
//! let analyzer = Analyzer::new(oracle, HttpFetcher::new()?);
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::MAX_REPLY_TOKENS;
use crate::error::{Result, ScoringError};
use crate::security::{OracleCredentials, SecretString};
use crate::traits::oracle::Oracle;

const DEFAULT_MODEL: &str = "claude-sonnet-4-20250514";
const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Oracle that sends the query as a single user message.
#[derive(Clone)]
pub struct AnthropicOracle {
    client: Client,
    credentials: OracleCredentials,
    max_tokens: u32,
}

impl AnthropicOracle {
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: Client::new(),
            credentials: OracleCredentials::new(api_key, DEFAULT_MODEL, DEFAULT_BASE_URL),
            max_tokens: MAX_REPLY_TOKENS,
        }
    }

    /// Create from environment variable `ANTHROPIC_API_KEY`.
    pub fn from_env() -> Result<Self> {
        let credentials =
            OracleCredentials::from_env("ANTHROPIC_API_KEY", DEFAULT_MODEL, DEFAULT_BASE_URL)?;
        Ok(Self {
            client: Client::new(),
            credentials,
            max_tokens: MAX_REPLY_TOKENS,
        })
    }

    /// Set the model (default: claude-sonnet-4-20250514).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.credentials.model = model.into();
        self
    }

    /// Set a custom base URL (for proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.credentials.base_url = url.into();
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    pub fn model(&self) -> &str {
        &self.credentials.model
    }

    pub fn base_url(&self) -> &str {
        &self.credentials.base_url
    }
}

#[async_trait]
impl Oracle for AnthropicOracle {
    async fn judge(&self, query: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.credentials.model,
            max_tokens: self.max_tokens,
            messages: vec![Message {
                role: "user",
                content: query,
            }],
        };

        let response = self
            .client
            .post(self.credentials.endpoint("v1/messages"))
            .header("x-api-key", self.credentials.api_key.expose())
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ScoringError::Oracle(e.to_string().into()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScoringError::Oracle(
                format!("Anthropic API error ({}): {}", status, error_text).into(),
            ));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| ScoringError::Oracle(e.to_string().into()))?;

        let text = body.text();
        debug!(model = %self.credentials.model, reply_len = text.len(), "Anthropic reply received");
        Ok(text)
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: Vec<Message<'a>>,
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// Concatenated text blocks; other block kinds are skipped.
    fn text(self) -> String {
        self.content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builders() {
        let oracle = AnthropicOracle::new("sk-ant-test");
        assert_eq!(oracle.model(), DEFAULT_MODEL);
        assert_eq!(oracle.base_url(), DEFAULT_BASE_URL);

        let oracle = oracle
            .with_model("claude-3-5-haiku-latest")
            .with_base_url("http://localhost:8080");
        assert_eq!(oracle.model(), "claude-3-5-haiku-latest");
        assert_eq!(oracle.base_url(), "http://localhost:8080");
    }

    #[test]
    fn test_max_tokens_and_client_builders() {
        let oracle = AnthropicOracle::new("sk-ant-test");
        assert_eq!(oracle.max_tokens, MAX_REPLY_TOKENS);

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .unwrap();
        let oracle = oracle.with_max_tokens(400).with_client(client);
        assert_eq!(oracle.max_tokens, 400);
        assert_eq!(oracle.model(), DEFAULT_MODEL);
    }

    #[test]
    fn test_response_text_joins_text_blocks() {
        let body: MessagesResponse = serde_json::from_str(
            r#"{"content": [
                {"type": "text", "text": "{\"natuur_nabijheid\": 9,"},
                {"type": "tool_use", "id": "x"},
                {"type": "text", "text": " \"bebouwing\": 8}"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(body.text(), r#"{"natuur_nabijheid": 9, "bebouwing": 8}"#);
    }

    #[test]
    fn test_request_shape() {
        let request = MessagesRequest {
            model: DEFAULT_MODEL,
            max_tokens: MAX_REPLY_TOKENS,
            messages: vec![Message {
                role: "user",
                content: "Beoordeel",
            }],
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["max_tokens"], 1000);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
