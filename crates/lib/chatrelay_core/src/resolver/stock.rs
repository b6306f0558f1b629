//! Stock quote strategy.
//!
//! Claims every message containing "stock price of". The ticker is the last
//! word of the message, whatever it is: "stock price of msft today" asks for
//! `TODAY`.

use async_trait::async_trait;

use super::{Query, ResolveError, ResolveStrategy};
use crate::quote::{Quote, QuoteClient};

const TRIGGER: &str = "stock price of";

/// Answers "stock price of X" with a live quote. A failed lookup is still a
/// reply, never an error.
pub struct StockQuoteStrategy {
    quotes: QuoteClient,
}

impl StockQuoteStrategy {
    pub fn new(quotes: QuoteClient) -> Self {
        Self { quotes }
    }
}

fn ticker(normalized: &str) -> Option<&str> {
    normalized.split_whitespace().last()
}

fn format_reply(quote: &Quote) -> String {
    format!(
        "🚀 {}: {} (Change: {}, {})",
        quote.symbol, quote.price, quote.change, quote.percent_change
    )
}

#[async_trait]
impl ResolveStrategy for StockQuoteStrategy {
    async fn try_resolve(&self, query: &Query) -> Result<Option<String>, ResolveError> {
        if !query.normalized.contains(TRIGGER) {
            return Ok(None);
        }

        let symbol = ticker(&query.normalized).unwrap_or_default();
        let reply = match self.quotes.fetch_quote(symbol).await {
            Ok(quote) => format_reply(&quote),
            Err(unavailable) => format!("⚠️ {unavailable}"),
        };
        Ok(Some(reply))
    }

    fn name(&self) -> &str {
        "stock_quote"
    }
}
