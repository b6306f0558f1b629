//! Yahoo Finance quote provider.
//!
//! Calls the chart API (`/v8/finance/chart/{symbol}`) and derives the day's
//! change from the previous close.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use url::Url;

use super::{MarketQuote, QuoteError, QuoteProvider};

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

// The chart API rejects requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

#[derive(Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Deserialize)]
struct ChartResult {
    meta: ChartMeta,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    regular_market_price: Option<f64>,
    chart_previous_close: Option<f64>,
    previous_close: Option<f64>,
}

#[derive(Deserialize)]
struct ChartError {
    code: Option<String>,
    description: Option<String>,
}

/// Quote provider backed by the Yahoo Finance chart API.
pub struct YahooQuoteProvider {
    http: Client,
    base_url: String,
}

impl YahooQuoteProvider {
    pub fn new(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    fn chart_url(&self, symbol: &str) -> Result<Url, QuoteError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| QuoteError::Request(format!("invalid base URL {}: {e}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| QuoteError::Request(format!("base URL cannot be a base: {}", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", symbol]);
        Ok(url)
    }
}

#[async_trait]
impl QuoteProvider for YahooQuoteProvider {
    async fn quote(&self, symbol: &str) -> Result<MarketQuote, QuoteError> {
        let url = self.chart_url(symbol)?;

        let resp = self
            .http
            .get(url)
            .query(&[("interval", "1d"), ("range", "1d")])
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(|e| QuoteError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| QuoteError::Request(format!("failed to read body: {e}")))?;

        if !status.is_success() {
            return Err(QuoteError::Status {
                status: status.as_u16(),
                body,
            });
        }

        parse_chart(&body)
    }
}

/// Extract price and change figures from a chart API response body.
fn parse_chart(body: &str) -> Result<MarketQuote, QuoteError> {
    let envelope: ChartEnvelope =
        serde_json::from_str(body).map_err(|e| QuoteError::Parse(e.to_string()))?;

    if let Some(err) = envelope.chart.error {
        return Err(QuoteError::InvalidData(format!(
            "{}: {}",
            err.code.unwrap_or_else(|| "error".into()),
            err.description.unwrap_or_default()
        )));
    }

    let meta = envelope
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .map(|r| r.meta)
        .ok_or_else(|| QuoteError::InvalidData("empty chart result".into()))?;

    let price = meta.regular_market_price;
    let previous = meta
        .chart_previous_close
        .or(meta.previous_close)
        .filter(|p| *p != 0.0);

    let (change, percent_change) = match (price, previous) {
        (Some(price), Some(prev)) => {
            let change = price - prev;
            (Some(change), Some(change / prev * 100.0))
        }
        _ => (None, None),
    };

    Ok(MarketQuote {
        price,
        change,
        percent_change,
    })
}
