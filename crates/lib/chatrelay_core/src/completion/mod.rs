//! AI completion relay for free-form messages.
//!
//! Each call is a single turn: no history, no caching, no retry.
//!
//! # Providers
//!
//! - [`gemini::GeminiProvider`] — Google Generative Language API

pub mod gemini;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;

/// Upper bound on generated output, in tokens.
pub const MAX_OUTPUT_TOKENS: u32 = 2048;

/// Errors that can occur while requesting a completion.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Request(String),

    #[error("Completion service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Completion response parse error: {0}")]
    Parse(String),

    #[error("Completion blocked: {0}")]
    Blocked(String),

    #[error("Completion service returned no text")]
    EmptyResponse,
}

/// A single-turn completion request.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub prompt: &'a str,
    pub max_output_tokens: u32,
}

/// Remote text-completion capability.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: &CompletionRequest<'_>) -> Result<String, CompletionError>;
}

/// Sends user messages to a completion provider.
#[derive(Clone)]
pub struct CompletionClient {
    provider: Arc<dyn CompletionProvider>,
    max_output_tokens: u32,
}

impl CompletionClient {
    pub fn new(provider: Arc<dyn CompletionProvider>) -> Self {
        Self {
            provider,
            max_output_tokens: MAX_OUTPUT_TOKENS,
        }
    }

    /// Complete `message`, sent verbatim.
    pub async fn complete(&self, message: &str) -> Result<String, CompletionError> {
        let request = CompletionRequest {
            prompt: message,
            max_output_tokens: self.max_output_tokens,
        };
        let text = self.provider.complete(&request).await?;
        if text.trim().is_empty() {
            return Err(CompletionError::EmptyResponse);
        }
        debug!(chars = text.len(), "AI response received");
        Ok(text)
    }
}
