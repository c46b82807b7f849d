use anyhow::{bail, Context, Result};
use clap::ValueEnum;
use cottage_scorer::security::SecretString;
use dotenvy::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Hosted model behind the oracle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Provider {
    Anthropic,
    Openai,
}

impl Provider {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "anthropic" | "claude" => Ok(Self::Anthropic),
            "openai" => Ok(Self::Openai),
            other => bail!("ORACLE_PROVIDER must be 'anthropic' or 'openai', got '{other}'"),
        }
    }
}

/// CLI configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub provider: Provider,
    pub anthropic_api_key: Option<SecretString>,
    pub openai_api_key: Option<SecretString>,
    pub model: Option<String>,
    pub training_data: PathBuf,
    pub fetch_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        let _ = dotenv();

        let provider = match env::var("ORACLE_PROVIDER") {
            Ok(value) => Provider::parse(&value)?,
            Err(_) => Provider::Anthropic,
        };

        Ok(Self {
            provider,
            anthropic_api_key: secret_var("ANTHROPIC_API_KEY"),
            openai_api_key: secret_var("OPENAI_API_KEY"),
            model: env::var("ORACLE_MODEL").ok().filter(|m| !m.trim().is_empty()),
            training_data: env::var("TRAINING_DATA")
                .unwrap_or_else(|_| "training_data.csv".to_string())
                .into(),
            fetch_timeout: Duration::from_secs(
                env::var("FETCH_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "10".to_string())
                    .parse()
                    .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }

    /// Apply command-line flags on top of the environment.
    pub fn with_overrides(
        mut self,
        training_data: Option<PathBuf>,
        provider: Option<Provider>,
        model: Option<String>,
    ) -> Self {
        if let Some(path) = training_data {
            self.training_data = path;
        }
        if let Some(provider) = provider {
            self.provider = provider;
        }
        if model.is_some() {
            self.model = model;
        }
        self
    }

    /// API key for the selected provider.
    pub fn api_key(&self) -> Result<SecretString> {
        let (key, var) = match self.provider {
            Provider::Anthropic => (&self.anthropic_api_key, "ANTHROPIC_API_KEY"),
            Provider::Openai => (&self.openai_api_key, "OPENAI_API_KEY"),
        };
        key.clone().with_context(|| format!("{var} must be set"))
    }
}

fn secret_var(name: &str) -> Option<SecretString> {
    env::var(name)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(SecretString::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(provider: Provider) -> Config {
        Config {
            provider,
            anthropic_api_key: Some("sk-ant-test".into()),
            openai_api_key: None,
            model: None,
            training_data: "training_data.csv".into(),
            fetch_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_provider_parse() {
        assert_eq!(Provider::parse("Anthropic").unwrap(), Provider::Anthropic);
        assert_eq!(Provider::parse(" openai ").unwrap(), Provider::Openai);
        assert!(Provider::parse("llama").is_err());
    }

    #[test]
    fn test_api_key_for_selected_provider() {
        assert_eq!(config(Provider::Anthropic).api_key().unwrap().expose(), "sk-ant-test");

        let err = config(Provider::Openai).api_key().unwrap_err();
        assert!(err.to_string().contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_flags_override_environment() {
        let config = config(Provider::Anthropic).with_overrides(
            Some("labels.csv".into()),
            Some(Provider::Openai),
            Some("gpt-4o-mini".to_string()),
        );
        assert_eq!(config.provider, Provider::Openai);
        assert_eq!(config.training_data, PathBuf::from("labels.csv"));
        assert_eq!(config.model.as_deref(), Some("gpt-4o-mini"));
    }

    #[test]
    fn test_absent_flags_keep_environment() {
        let config = config(Provider::Anthropic).with_overrides(None, None, None);
        assert_eq!(config.provider, Provider::Anthropic);
        assert_eq!(config.training_data, PathBuf::from("training_data.csv"));
    }
}
