//! Answer resolution — picks which source answers a message.
//!
//! Resolution walks an ordered list of [`ResolveStrategy`]s. Each one either
//! declines (`Ok(None)`) or claims the message. A claim ends the walk whether
//! it produced a reply or an error; there is no fallthrough to later
//! strategies once one has claimed.
//!
//! The standard order is knowledge table → stock quote → AI completion.
//! New sources (weather, currency conversion, ...) are added by inserting a
//! strategy, not by editing the others.

pub mod completion;
pub mod knowledge;
pub mod stock;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{debug, info};

use crate::completion::{CompletionClient, CompletionError};
use crate::knowledge::KnowledgeStore;
use crate::quote::QuoteClient;

pub use completion::CompletionStrategy;
pub use knowledge::KnowledgeStrategy;
pub use stock::StockQuoteStrategy;

/// Errors that end resolution without a reply.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// The message was absent or blank.
    #[error("{0}")]
    Input(String),

    /// A remote service the chosen strategy depends on failed.
    #[error(transparent)]
    Upstream(#[from] CompletionError),

    #[error("No strategy produced an answer")]
    Unanswered,
}

/// A user message in raw and normalized form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    /// Exactly as received.
    pub raw: String,
    /// Trimmed and lowercased.
    pub normalized: String,
}

impl Query {
    /// Build a query, rejecting absent or blank messages.
    pub fn parse(raw: Option<&str>) -> Result<Self, ResolveError> {
        let raw = raw.unwrap_or_default();
        let normalized = raw.trim().to_lowercase();
        if normalized.is_empty() {
            return Err(ResolveError::Input("No message provided".into()));
        }
        Ok(Self {
            raw: raw.to_string(),
            normalized,
        })
    }
}

/// A reply together with the strategy that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub reply: String,
    pub source: String,
}

/// One way of answering a message.
#[async_trait]
pub trait ResolveStrategy: Send + Sync {
    /// Return `Ok(None)` to let the next strategy try.
    async fn try_resolve(&self, query: &Query) -> Result<Option<String>, ResolveError>;

    /// Strategy identifier for logging.
    fn name(&self) -> &str;
}

/// Ordered list of strategies; the first to claim a message answers it.
#[derive(Clone)]
pub struct AnswerResolver {
    strategies: Vec<Arc<dyn ResolveStrategy>>,
}

impl AnswerResolver {
    pub fn new(strategies: Vec<Arc<dyn ResolveStrategy>>) -> Self {
        Self { strategies }
    }

    /// Knowledge table first, then stock quotes, then AI completion.
    pub fn standard(
        knowledge: Arc<KnowledgeStore>,
        quotes: QuoteClient,
        completions: CompletionClient,
    ) -> Self {
        Self::new(vec![
            Arc::new(KnowledgeStrategy::new(knowledge)),
            Arc::new(StockQuoteStrategy::new(quotes)),
            Arc::new(CompletionStrategy::new(completions)),
        ])
    }

    /// Answer `raw`, or fail with [`ResolveError::Input`] if it is absent or blank.
    pub async fn resolve(&self, raw: Option<&str>) -> Result<Answer, ResolveError> {
        let query = Query::parse(raw)?;

        for strategy in &self.strategies {
            if let Some(reply) = strategy.try_resolve(&query).await? {
                info!(source = strategy.name(), "message answered");
                return Ok(Answer {
                    reply,
                    source: strategy.name().to_string(),
                });
            }
            debug!(source = strategy.name(), "strategy declined");
        }

        Err(ResolveError::Unanswered)
    }
}
