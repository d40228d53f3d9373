//! Binance aggregate-trades REST client.
//!
//! Pages through `/api/v3/aggTrades` for a symbol and time window by
//! advancing the window start past the last received trade until a short
//! or empty page signals the end.

use chrono::{Duration, Utc};
use serde::Deserialize;
use thiserror::Error;
use tickbars_core::Trade;
use tracing::{debug, info};

const BASE_URL: &str = "https://api.binance.com/api/v3";

/// Trades per page; the exchange caps aggTrades responses at 1000.
const PAGE_LIMIT: usize = 1000;

/// Errors from the ingestion boundary.
#[derive(Error, Debug)]
pub enum IngestionError {
    /// Transport or HTTP-status failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response parsed as JSON but a field did not convert.
    #[error("Malformed aggTrade payload: {0}")]
    Payload(String),
}

/// One aggregate trade as returned by the exchange.
///
/// Price and quantity arrive as decimal strings; `T` is the trade time in
/// milliseconds.
#[derive(Debug, Deserialize)]
pub(crate) struct AggTrade {
    #[serde(rename = "p")]
    price: String,
    #[serde(rename = "q")]
    quantity: String,
    #[serde(rename = "T")]
    timestamp: i64,
}

impl AggTrade {
    pub(crate) fn into_trade(self) -> Result<Trade, IngestionError> {
        let price: f64 = self.price.parse().map_err(|_| {
            IngestionError::Payload(format!("unparseable price '{}'", self.price))
        })?;
        let quantity: f64 = self.quantity.parse().map_err(|_| {
            IngestionError::Payload(format!("unparseable quantity '{}'", self.quantity))
        })?;
        Ok(Trade::new(price, quantity, self.timestamp))
    }
}

/// REST client for a single symbol.
pub struct BinanceClient {
    client: reqwest::Client,
    symbol: String,
}

impl BinanceClient {
    /// Create a client for the given symbol (e.g. "BTCUSDT").
    pub fn new(symbol: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            symbol: symbol.into(),
        }
    }

    /// Fetch all aggregate trades for the past `days_back` days, in
    /// exchange timestamp order.
    pub async fn fetch_agg_trades(&self, days_back: i64) -> Result<Vec<Trade>, IngestionError> {
        let end_time = Utc::now().timestamp_millis();
        let mut start_time = end_time - Duration::days(days_back).num_milliseconds();
        let mut trades = Vec::new();

        loop {
            let page: Vec<AggTrade> = self
                .client
                .get(format!("{BASE_URL}/aggTrades"))
                .query(&[("symbol", self.symbol.as_str())])
                .query(&[
                    ("limit", PAGE_LIMIT as i64),
                    ("startTime", start_time),
                    ("endTime", end_time),
                ])
                .send()
                .await?
                .error_for_status()?
                .json()
                .await?;

            if page.is_empty() {
                break;
            }
            let short_page = page.len() < PAGE_LIMIT;
            let last_ts = page.last().map(|t| t.timestamp).unwrap_or(start_time);

            for agg in page {
                trades.push(agg.into_trade()?);
            }
            debug!(total = trades.len(), symbol = %self.symbol, "fetched aggTrades page");

            if short_page {
                break;
            }
            // Next window starts just after the last trade received.
            start_time = last_ts + 1;
        }

        info!(trades = trades.len(), symbol = %self.symbol, days_back, "aggTrades fetch complete");
        Ok(trades)
    }

    /// Symbol this client fetches.
    pub fn symbol(&self) -> &str {
        &self.symbol
    }
}
