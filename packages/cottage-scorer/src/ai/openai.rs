//! OpenAI chat completions implementation of the Oracle trait.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::MAX_REPLY_TOKENS;
use crate::error::{Result, ScoringError};
use crate::security::{OracleCredentials, SecretString};
use crate::traits::oracle::Oracle;

const DEFAULT_MODEL: &str = "gpt-4o";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// OpenAI-based oracle.
///
/// Runs at temperature 0 so repeated judgements of one listing stay close.
#[derive(Clone)]
pub struct OpenAIOracle {
    client: Client,
    credentials: OracleCredentials,
}

impl OpenAIOracle {
    pub fn new(api_key: impl Into<SecretString>) -> Self {
        Self {
            client: Client::new(),
            credentials: OracleCredentials::new(api_key, DEFAULT_MODEL, DEFAULT_BASE_URL),
        }
    }

    /// Create from environment variable `OPENAI_API_KEY`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            credentials: OracleCredentials::from_env(
                "OPENAI_API_KEY",
                DEFAULT_MODEL,
                DEFAULT_BASE_URL,
            )?,
        })
    }

    /// Set the chat model (default: gpt-4o).
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.credentials.model = model.into();
        self
    }

    /// Set a custom base URL (for Azure, proxies, etc.).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.credentials.base_url = url.into();
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
impl Oracle for OpenAIOracle {
    async fn judge(&self, query: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.credentials.model,
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: query.to_string(),
            }],
            temperature: 0.0,
            max_tokens: MAX_REPLY_TOKENS,
        };

        let response = self
            .client
            .post(self.credentials.endpoint("chat/completions"))
            .header(
                "Authorization",
                format!("Bearer {}", self.credentials.api_key.expose()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| ScoringError::Oracle(e.to_string().into()))?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ScoringError::Oracle(
                format!("OpenAI API error: {}", error_text).into(),
            ));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ScoringError::Oracle(e.to_string().into()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ScoringError::Oracle("No response from OpenAI".into()))?;

        debug!(model = %self.credentials.model, reply_len = content.len(), "OpenAI reply received");
        Ok(content)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    #[serde(default)]
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let oracle = OpenAIOracle::new("sk-test")
            .with_model("gpt-4o-mini")
            .with_base_url("http://localhost:1234/v1");
        assert_eq!(oracle.model(), "gpt-4o-mini");
        assert_eq!(oracle.base_url(), "http://localhost:1234/v1");
    }

    #[test]
    fn test_response_parsing() {
        let response: ChatResponse = serde_json::from_str(
            r#"{"choices": [{"message": {"role": "assistant", "content": "{\"bebouwing\": 7}"}}]}"#,
        )
        .unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some(r#"{"bebouwing": 7}"#)
        );
    }
}
