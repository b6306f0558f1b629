//! Stock quote lookup.
//!
//! [`QuoteClient`] wraps a remote [`QuoteProvider`] and turns its raw numbers
//! into display strings. Provider failures never reach the caller: they are
//! logged and collapsed into a user-safe [`QuoteUnavailable`].
//!
//! # Providers
//!
//! - [`yahoo::YahooQuoteProvider`] — Yahoo Finance chart API

pub mod yahoo;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use thiserror::Error;
use tracing::{debug, error};

/// Message shown to users whenever a quote cannot be produced.
pub const QUOTE_UNAVAILABLE_MESSAGE: &str = "Stock data unavailable or invalid symbol";

/// Errors a quote provider can report.
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("Quote request failed: {0}")]
    Request(String),

    #[error("Quote service returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Quote response parse error: {0}")]
    Parse(String),

    #[error("Invalid stock data received: {0}")]
    InvalidData(String),
}

/// Raw market numbers as reported by a provider.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MarketQuote {
    pub price: Option<f64>,
    pub change: Option<f64>,
    pub percent_change: Option<f64>,
}

/// Remote source of market quotes.
#[async_trait]
pub trait QuoteProvider: Send + Sync {
    /// Fetch the current quote for an uppercased ticker symbol.
    async fn quote(&self, symbol: &str) -> Result<MarketQuote, QuoteError>;
}

/// A formatted quote, ready for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quote {
    pub symbol: String,
    /// e.g. `$150.25`
    pub price: String,
    /// e.g. `1.10`, or `0` when the provider had no change figure.
    pub change: String,
    /// e.g. `0.74%`
    pub percent_change: String,
    /// ISO-8601 UTC time the quote was produced.
    pub timestamp: String,
}

/// The quote could not be produced; carries a message safe to show users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuoteUnavailable {
    pub error_message: String,
}

impl Default for QuoteUnavailable {
    fn default() -> Self {
        Self {
            error_message: QUOTE_UNAVAILABLE_MESSAGE.to_string(),
        }
    }
}

impl fmt::Display for QuoteUnavailable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.error_message)
    }
}

pub type QuoteResult = Result<Quote, QuoteUnavailable>;

/// Quote lookups against a single provider.
#[derive(Clone)]
pub struct QuoteClient {
    provider: Arc<dyn QuoteProvider>,
}

impl QuoteClient {
    pub fn new(provider: Arc<dyn QuoteProvider>) -> Self {
        Self { provider }
    }

    /// Fetch and format a quote for `symbol` (uppercased before use).
    pub async fn fetch_quote(&self, symbol: &str) -> QuoteResult {
        let symbol = symbol.trim().to_uppercase();
        if symbol.is_empty() {
            error!("stock price error: empty symbol");
            return Err(QuoteUnavailable::default());
        }

        debug!(symbol = %symbol, "fetching stock data");
        let result = self
            .provider
            .quote(&symbol)
            .await
            .and_then(|raw| format_quote(&symbol, raw));

        result.map_err(|e| {
            error!(symbol = %symbol, "stock price error: {e}");
            QuoteUnavailable::default()
        })
    }
}

/// A price of zero, NaN or infinity is as good as no price.
fn usable_price(price: Option<f64>) -> Option<f64> {
    price.filter(|p| p.is_finite() && *p != 0.0)
}

fn format_quote(symbol: &str, raw: MarketQuote) -> Result<Quote, QuoteError> {
    let price = usable_price(raw.price)
        .ok_or_else(|| QuoteError::InvalidData(format!("no current price for {symbol}")))?;

    let change = match raw.change.filter(|c| c.is_finite()) {
        Some(c) => format!("{c:.2}"),
        None => "0".to_string(),
    };
    let percent_change = raw.percent_change.filter(|p| p.is_finite()).unwrap_or(0.0);

    Ok(Quote {
        symbol: symbol.to_string(),
        price: format!("${price:.2}"),
        change,
        percent_change: format!("{percent_change:.2}%"),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    struct FixedProvider {
        result: Mutex<Option<Result<MarketQuote, QuoteError>>>,
        seen: Mutex<Vec<String>>,
    }

    impl FixedProvider {
        fn new(result: Result<MarketQuote, QuoteError>) -> Arc<Self> {
            Arc::new(Self {
                result: Mutex::new(Some(result)),
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl QuoteProvider for FixedProvider {
        async fn quote(&self, symbol: &str) -> Result<MarketQuote, QuoteError> {
            self.seen.lock().unwrap().push(symbol.to_string());
            self.result
                .lock()
                .unwrap()
                .take()
                .unwrap_or_else(|| Err(QuoteError::Request("called twice".into())))
        }
    }

    #[tokio::test]
    async fn formats_full_quote() {
        let provider = FixedProvider::new(Ok(MarketQuote {
            price: Some(150.25),
            change: Some(1.1),
            percent_change: Some(0.74),
        }));
        let client = QuoteClient::new(provider.clone());

        let q = client.fetch_quote("aapl").await.unwrap();
        assert_eq!(q.symbol, "AAPL");
        assert_eq!(q.price, "$150.25");
        assert_eq!(q.change, "1.10");
        assert_eq!(q.percent_change, "0.74%");
        assert!(chrono::DateTime::parse_from_rfc3339(&q.timestamp).is_ok());
        assert!(q.timestamp.ends_with('Z'));
        assert_eq!(*provider.seen.lock().unwrap(), vec!["AAPL".to_string()]);
    }

    #[tokio::test]
    async fn missing_change_figures_use_defaults() {
        let provider = FixedProvider::new(Ok(MarketQuote {
            price: Some(10.0),
            change: None,
            percent_change: None,
        }));
        let q = QuoteClient::new(provider).fetch_quote("X").await.unwrap();
        assert_eq!(q.price, "$10.00");
        assert_eq!(q.change, "0");
        assert_eq!(q.percent_change, "0.00%");
    }

    #[tokio::test]
    async fn negative_change_keeps_sign() {
        let provider = FixedProvider::new(Ok(MarketQuote {
            price: Some(99.999),
            change: Some(-2.346),
            percent_change: Some(-2.3),
        }));
        let q = QuoteClient::new(provider).fetch_quote("X").await.unwrap();
        assert_eq!(q.price, "$100.00");
        assert_eq!(q.change, "-2.35");
        assert_eq!(q.percent_change, "-2.30%");
    }

    #[tokio::test]
    async fn missing_price_is_unavailable() {
        let provider = FixedProvider::new(Ok(MarketQuote::default()));
        let err = QuoteClient::new(provider).fetch_quote("X").await.unwrap_err();
        assert_eq!(err.error_message, QUOTE_UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn zero_price_is_unavailable() {
        let provider = FixedProvider::new(Ok(MarketQuote {
            price: Some(0.0),
            ..Default::default()
        }));
        assert!(QuoteClient::new(provider).fetch_quote("X").await.is_err());
    }

    #[tokio::test]
    async fn provider_error_is_masked() {
        let provider = FixedProvider::new(Err(QuoteError::Status {
            status: 404,
            body: "secret upstream detail".into(),
        }));
        let err = QuoteClient::new(provider).fetch_quote("ZZZZ").await.unwrap_err();
        assert_eq!(err.to_string(), "Stock data unavailable or invalid symbol");
    }

    #[tokio::test]
    async fn empty_symbol_skips_provider() {
        let provider = FixedProvider::new(Ok(MarketQuote {
            price: Some(1.0),
            ..Default::default()
        }));
        let client = QuoteClient::new(provider.clone());
        assert!(client.fetch_quote("   ").await.is_err());
        assert!(provider.seen.lock().unwrap().is_empty());
    }
}
