//! Fixed-interval OHLCV bar construction.
//!
//! Partitions chronologically ordered trades into non-overlapping,
//! left-closed buckets aligned to epoch multiples of the interval and
//! reduces each non-empty bucket to one bar. Empty buckets are omitted.

use std::collections::BTreeMap;
use tickbars_core::{ts_to_bucket, Interval, Result, TimeBar, TimestampMs, Trade};
use tracing::debug;

use crate::check_order;

/// A bucket that is currently accumulating trades.
#[derive(Debug, Clone)]
struct BucketInProgress {
    open: Option<f64>,
    high: f64,
    low: f64,
    close: f64,
    volume: f64,
}

impl BucketInProgress {
    fn new() -> Self {
        Self {
            open: None,
            high: f64::NEG_INFINITY,
            low: f64::INFINITY,
            close: 0.0,
            volume: 0.0,
        }
    }

    fn add_trade(&mut self, price: f64, quantity: f64) {
        if self.open.is_none() {
            self.open = Some(price);
        }
        self.high = self.high.max(price);
        self.low = self.low.min(price);
        self.close = price;
        self.volume += quantity;
    }

    fn into_bar(self, timestamp: TimestampMs) -> Option<TimeBar> {
        let open = self.open?;
        Some(TimeBar {
            timestamp,
            open,
            high: self.high,
            low: self.low,
            close: self.close,
            volume: self.volume,
        })
    }
}

/// Aggregate an ordered trade sequence into fixed-interval OHLCV bars.
///
/// An empty input yields an empty series. Bars come out ordered by bucket
/// timestamp with at most one bar per bucket.
pub fn aggregate_time_bars<I>(trades: I, interval: Interval) -> Result<Vec<TimeBar>>
where
    I: IntoIterator<Item = Trade>,
{
    let interval_ms = interval.millis();
    let mut buckets: BTreeMap<TimestampMs, BucketInProgress> = BTreeMap::new();
    let mut prev_ts: Option<TimestampMs> = None;

    for (index, trade) in trades.into_iter().enumerate() {
        check_order(index, prev_ts, &trade)?;
        prev_ts = Some(trade.timestamp);

        let bucket_ts = ts_to_bucket(trade.timestamp, interval_ms);
        buckets
            .entry(bucket_ts)
            .or_insert_with(BucketInProgress::new)
            .add_trade(trade.price, trade.quantity);
    }

    let bars: Vec<TimeBar> = buckets
        .into_iter()
        .filter_map(|(ts, bucket)| bucket.into_bar(ts))
        .collect();

    debug!(bars = bars.len(), interval = %interval, "time-bar aggregation complete");
    Ok(bars)
}
