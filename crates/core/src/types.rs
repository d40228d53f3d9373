//! Core data types for the tickbars pipeline.

use serde::{Deserialize, Serialize};

/// Timestamp in milliseconds since Unix epoch (UTC).
pub type TimestampMs = i64;

/// Align a timestamp to the start of its bucket for a given interval.
#[inline]
pub fn ts_to_bucket(ts_ms: TimestampMs, interval_ms: i64) -> TimestampMs {
    (ts_ms / interval_ms) * interval_ms
}

/// A single aggregate trade (print) from the exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    /// Trade price.
    pub price: f64,
    /// Trade quantity (base asset units).
    pub quantity: f64,
    /// Exchange timestamp in milliseconds.
    pub timestamp: TimestampMs,
}

impl Trade {
    /// Create a new trade.
    pub fn new(price: f64, quantity: f64, timestamp: TimestampMs) -> Self {
        Self {
            price,
            quantity,
            timestamp,
        }
    }

    /// Notional value transacted: price × quantity.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.price * self.quantity
    }

    /// Check the record-level invariants: positive price, non-negative
    /// quantity and timestamp, all fields finite.
    pub fn is_valid(&self) -> bool {
        self.price.is_finite()
            && self.price > 0.0
            && self.quantity.is_finite()
            && self.quantity >= 0.0
            && self.timestamp >= 0
    }
}

/// A bar sampled by accumulated notional value (activity clock).
///
/// `dollar_volume` is the cumulative notional (Σ price×quantity) of the
/// constituent trades. Every bar except possibly the last in a series
/// satisfies `dollar_volume >= target_notional`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DollarBar {
    /// Timestamp of the first constituent trade (ms).
    pub start_time: TimestampMs,
    /// Timestamp of the last constituent trade (ms).
    pub end_time: TimestampMs,
    /// Price of the first trade.
    pub open: f64,
    /// Maximum trade price.
    pub high: f64,
    /// Minimum trade price.
    pub low: f64,
    /// Price of the last trade.
    pub close: f64,
    /// Cumulative notional value of the constituent trades.
    pub dollar_volume: f64,
    /// Number of constituent trades.
    pub trade_count: u32,
}

impl DollarBar {
    /// Bar duration in milliseconds.
    #[inline]
    pub fn duration_ms(&self) -> i64 {
        self.end_time - self.start_time
    }

    /// Intrabar price range (high − low).
    #[inline]
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

/// A fixed-interval OHLCV bar.
///
/// `timestamp` is the left-closed bucket boundary; `volume` is the
/// cumulative traded quantity. Empty buckets produce no bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeBar {
    /// Bucket boundary timestamp (ms).
    pub timestamp: TimestampMs,
    /// Price of the first trade in the bucket.
    pub open: f64,
    /// Maximum trade price in the bucket.
    pub high: f64,
    /// Minimum trade price in the bucket.
    pub low: f64,
    /// Price of the last trade in the bucket.
    pub close: f64,
    /// Sum of trade quantities in the bucket.
    pub volume: f64,
}
