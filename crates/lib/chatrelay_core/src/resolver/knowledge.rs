//! Knowledge table strategy.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{Query, ResolveError, ResolveStrategy};
use crate::knowledge::KnowledgeStore;

/// Answers from the static knowledge table; declines on a miss.
pub struct KnowledgeStrategy {
    store: Arc<KnowledgeStore>,
}

impl KnowledgeStrategy {
    pub fn new(store: Arc<KnowledgeStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ResolveStrategy for KnowledgeStrategy {
    async fn try_resolve(&self, query: &Query) -> Result<Option<String>, ResolveError> {
        let answer = self.store.lookup(&query.normalized);
        if let Some(answer) = answer {
            debug!(answer, "found answer in knowledge file");
        }
        Ok(answer.map(str::to_string))
    }

    fn name(&self) -> &str {
        "knowledge"
    }
}
