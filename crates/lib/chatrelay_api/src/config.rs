//! API server configuration.

use std::path::PathBuf;

use chatrelay_core::completion::gemini;
use chatrelay_core::quote::yahoo;
use thiserror::Error;

/// Configuration errors. Any of these halts startup.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),
}

/// Credentials and endpoints for the remote services.
#[derive(Clone)]
pub struct UpstreamConfig {
    /// Google Generative Language API key.
    pub google_api_key: String,
    /// Gemini model name.
    pub gemini_model: String,
    /// Gemini API base URL.
    pub gemini_base_url: String,
    /// Yahoo Finance API base URL.
    pub quote_base_url: String,
}

impl std::fmt::Debug for UpstreamConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamConfig")
            .field("google_api_key", &"<redacted>")
            .field("gemini_model", &self.gemini_model)
            .field("gemini_base_url", &self.gemini_base_url)
            .field("quote_base_url", &self.quote_base_url)
            .finish()
    }
}

impl UpstreamConfig {
    /// Reads configuration from environment variables.
    ///
    /// | Variable              | Default                                            |
    /// |-----------------------|----------------------------------------------------|
    /// | `GOOGLE_API_KEY`      | required                                           |
    /// | `GEMINI_MODEL`        | `gemini-1.5-pro`                                   |
    /// | `GEMINI_API_BASE_URL` | `https://generativelanguage.googleapis.com/v1beta` |
    /// | `QUOTE_API_BASE_URL`  | `https://query1.finance.yahoo.com`                 |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`from_env`](Self::from_env), reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let google_api_key = var("GOOGLE_API_KEY").ok_or(ConfigError::MissingVar("GOOGLE_API_KEY"))?;

        Ok(Self {
            google_api_key,
            gemini_model: var("GEMINI_MODEL").unwrap_or_else(|| gemini::DEFAULT_MODEL.into()),
            gemini_base_url: var("GEMINI_API_BASE_URL")
                .unwrap_or_else(|| gemini::DEFAULT_BASE_URL.into()),
            quote_base_url: var("QUOTE_API_BASE_URL")
                .unwrap_or_else(|| yahoo::DEFAULT_BASE_URL.into()),
        })
    }
}

/// Configuration for the API server.
#[derive(Clone, Debug)]
pub struct ApiConfig {
    /// Address to bind the HTTP listener (e.g. "127.0.0.1:3000").
    pub bind_addr: String,
    /// Path of the knowledge JSON file.
    pub knowledge_path: PathBuf,
    /// Remote service settings.
    pub upstream: UpstreamConfig,
}
