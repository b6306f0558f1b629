//! Catch-all strategy: relay to the AI completion service.

use async_trait::async_trait;

use super::{Query, ResolveError, ResolveStrategy};
use crate::completion::CompletionClient;

/// Relays the raw message to the completion service. Always claims; a
/// service failure is a hard error.
pub struct CompletionStrategy {
    client: CompletionClient,
}

impl CompletionStrategy {
    pub fn new(client: CompletionClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ResolveStrategy for CompletionStrategy {
    async fn try_resolve(&self, query: &Query) -> Result<Option<String>, ResolveError> {
        let text = self.client.complete(&query.raw).await?;
        Ok(Some(text))
    }

    fn name(&self) -> &str {
        "completion"
    }
}
