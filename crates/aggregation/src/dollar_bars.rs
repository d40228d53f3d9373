//! Dollar-bar construction.
//!
//! Emits a bar each time the accumulated notional value (Σ price×quantity)
//! of consecutive trades reaches a fixed threshold. Single pass over the
//! input, constant auxiliary state, no lookahead. The trade that crosses
//! the threshold belongs to the bar it completes, so a bar may overshoot
//! the target by at most one trade's notional; only the trailing bar may
//! close below it.

use tickbars_core::{DollarBar, Error, Result, TimestampMs, Trade};
use tracing::debug;

/// A dollar bar that is still accumulating trades.
#[derive(Debug, Clone)]
struct BarInProgress {
    start_time: TimestampMs,
    last_ts: TimestampMs,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    notional: f64,
    trade_count: u32,
}

impl BarInProgress {
    fn open_with(trade: &Trade) -> Self {
        Self {
            start_time: trade.timestamp,
            last_ts: trade.timestamp,
            open: trade.price,
            high: trade.price,
            low: trade.price,
            close: trade.price,
            notional: trade.notional(),
            trade_count: 1,
        }
    }

    fn add_trade(&mut self, trade: &Trade) {
        self.last_ts = trade.timestamp;
        self.high = self.high.max(trade.price);
        self.low = self.low.min(trade.price);
        self.close = trade.price;
        self.notional += trade.notional();
        self.trade_count += 1;
    }

    fn into_bar(self, end_time: TimestampMs) -> DollarBar {
        DollarBar {
            start_time: self.start_time,
            end_time,
            open: self.open,
            high: self.high,
            low: self.low,
            close: self.close,
            dollar_volume: self.notional,
            trade_count: self.trade_count,
        }
    }
}

/// Streaming dollar-bar state machine.
///
/// Feed trades in timestamp order with [`update`](Self::update); each call
/// returns the completed bar if that trade crossed the notional threshold.
/// A trade that steps backwards in time is rejected without touching the
/// accumulator state. Call [`finish`](Self::finish) once the input is
/// exhausted to flush the trailing partial bar, if any.
pub struct DollarBarAggregator {
    target_notional: f64,
    current: Option<BarInProgress>,
    accumulated: f64,
    last_ts: Option<TimestampMs>,
    trades_seen: usize,
}

impl DollarBarAggregator {
    /// Create a new aggregator for a strictly positive notional threshold.
    pub fn new(target_notional: f64) -> Result<Self> {
        if !(target_notional > 0.0) {
            return Err(Error::invalid_configuration(format!(
                "target notional must be positive, got {target_notional}"
            )));
        }
        Ok(Self {
            target_notional,
            current: None,
            accumulated: 0.0,
            last_ts: None,
            trades_seen: 0,
        })
    }

    /// Apply one trade, returning the bar it completed, if any.
    pub fn update(&mut self, trade: &Trade) -> Result<Option<DollarBar>> {
        if let Some(prev) = self.last_ts {
            if trade.timestamp < prev {
                return Err(Error::OutOfOrderTrade {
                    index: self.trades_seen,
                    prev,
                    ts: trade.timestamp,
                });
            }
        }
        self.last_ts = Some(trade.timestamp);
        self.trades_seen += 1;

        match self.current.as_mut() {
            None => self.current = Some(BarInProgress::open_with(trade)),
            Some(bar) => bar.add_trade(trade),
        }
        self.accumulated += trade.notional();

        if self.accumulated >= self.target_notional {
            self.accumulated = 0.0;
            // A bar is always in progress here: the trade above either
            // opened one or extended one.
            Ok(self.current.take().map(|bar| bar.into_bar(trade.timestamp)))
        } else {
            Ok(None)
        }
    }

    /// Flush the trailing partial bar. Returns `None` when the last trade
    /// completed a bar exactly or no trade was ever seen.
    pub fn finish(mut self) -> Option<DollarBar> {
        self.current.take().map(|bar| {
            let end_time = bar.last_ts;
            bar.into_bar(end_time)
        })
    }

    /// Whether a bar is currently accumulating.
    pub fn has_pending_bar(&self) -> bool {
        self.current.is_some()
    }

    /// Notional accumulated toward the next bar.
    pub fn accumulated(&self) -> f64 {
        self.accumulated
    }
}

/// Aggregate an ordered trade sequence into dollar bars.
///
/// The trailing partial bar is always emitted, even when it holds a single
/// trade. An empty input yields an empty series.
pub fn aggregate_dollar_bars<I>(trades: I, target_notional: f64) -> Result<Vec<DollarBar>>
where
    I: IntoIterator<Item = Trade>,
{
    let mut aggregator = DollarBarAggregator::new(target_notional)?;
    let mut bars = Vec::new();

    for trade in trades {
        if let Some(bar) = aggregator.update(&trade)? {
            bars.push(bar);
        }
    }

    if let Some(bar) = aggregator.finish() {
        bars.push(bar);
    }

    debug!(bars = bars.len(), target_notional, "dollar-bar aggregation complete");
    Ok(bars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn make_trade(price: f64, quantity: f64, timestamp: i64) -> Trade {
        Trade::new(price, quantity, timestamp)
    }

    #[test]
    fn test_three_trades_one_bar() {
        // accumulated = 30 >= 25 on the third trade
        let trades = vec![
            make_trade(10.0, 1.0, 1_000),
            make_trade(10.0, 1.0, 2_000),
            make_trade(10.0, 1.0, 3_000),
        ];

        let bars = aggregate_dollar_bars(trades, 25.0).unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].start_time, 1_000);
        assert_eq!(bars[0].end_time, 3_000);
        assert_relative_eq!(bars[0].dollar_volume, 30.0);
        assert_eq!(bars[0].trade_count, 3);
    }

    #[test]
    fn test_trailing_partial_bar() {
        // accumulated never reaches 25 -> one final partial bar
        let trades = vec![make_trade(10.0, 1.0, 1_000), make_trade(10.0, 1.0, 2_000)];

        let bars = aggregate_dollar_bars(trades, 25.0).unwrap();

        assert_eq!(bars.len(), 1);
        assert_relative_eq!(bars[0].dollar_volume, 20.0);
        assert_eq!(bars[0].trade_count, 2);
        assert_eq!(bars[0].end_time, 2_000);
    }

    #[test]
    fn test_empty_input() {
        let bars = aggregate_dollar_bars(Vec::new(), 25.0).unwrap();
        assert!(bars.is_empty());
    }

    #[test]
    fn test_single_trade_at_or_above_target() {
        let bars = aggregate_dollar_bars(vec![make_trade(100.0, 1.0, 5_000)], 100.0).unwrap();

        assert_eq!(bars.len(), 1);
        assert_eq!(bars[0].start_time, 5_000);
        assert_eq!(bars[0].end_time, 5_000);
        assert_eq!(bars[0].trade_count, 1);
        assert_relative_eq!(bars[0].dollar_volume, 100.0);
    }

    #[test]
    fn test_crossing_trade_belongs_to_completed_bar() {
        // Second trade crosses the threshold; third opens a new bar.
        let trades = vec![
            make_trade(10.0, 1.0, 1_000),
            make_trade(10.0, 2.0, 2_000),
            make_trade(10.0, 1.0, 3_000),
        ];

        let bars = aggregate_dollar_bars(trades, 25.0).unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].trade_count, 2);
        assert_relative_eq!(bars[0].dollar_volume, 30.0);
        assert_eq!(bars[0].end_time, 2_000);
        // Trailing single-trade partial bar
        assert_eq!(bars[1].trade_count, 1);
        assert_relative_eq!(bars[1].dollar_volume, 10.0);
        assert_eq!(bars[1].start_time, 3_000);
    }

    #[test]
    fn test_ohlc_tracking() {
        let trades = vec![
            make_trade(100.0, 1.0, 1_000),
            make_trade(105.0, 1.0, 2_000),
            make_trade(95.0, 1.0, 3_000),
            make_trade(101.0, 1.0, 4_000),
        ];

        let bars = aggregate_dollar_bars(trades, 1_000_000.0).unwrap();

        assert_eq!(bars.len(), 1);
        assert_relative_eq!(bars[0].open, 100.0);
        assert_relative_eq!(bars[0].high, 105.0);
        assert_relative_eq!(bars[0].low, 95.0);
        assert_relative_eq!(bars[0].close, 101.0);
    }

    #[test]
    fn test_conservation_laws() {
        // Irregular sizes so bars overshoot by varying amounts.
        let trades: Vec<Trade> = (0..100)
            .map(|i| make_trade(100.0 + (i % 7) as f64, 0.1 + (i % 3) as f64 * 0.25, i * 500))
            .collect();
        let total_notional: f64 = trades.iter().map(Trade::notional).sum();

        let bars = aggregate_dollar_bars(trades.clone(), 75.0).unwrap();

        // Every bar except possibly the last meets the threshold.
        for bar in &bars[..bars.len() - 1] {
            assert!(bar.dollar_volume >= 75.0);
        }
        // No trade is dropped or double-counted.
        let bar_notional: f64 = bars.iter().map(|b| b.dollar_volume).sum();
        assert_relative_eq!(bar_notional, total_notional, max_relative = 1e-12);
        let bar_trades: u32 = bars.iter().map(|b| b.trade_count).sum();
        assert_eq!(bar_trades as usize, trades.len());
    }

    #[test]
    fn test_idempotence() {
        let trades: Vec<Trade> = (0..50)
            .map(|i| make_trade(50.0 + (i % 5) as f64, 1.0, i * 1_000))
            .collect();

        let first = aggregate_dollar_bars(trades.clone(), 200.0).unwrap();
        let second = aggregate_dollar_bars(trades, 200.0).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_rejects_non_positive_target() {
        assert!(DollarBarAggregator::new(0.0).is_err());
        assert!(DollarBarAggregator::new(-100.0).is_err());
        assert!(DollarBarAggregator::new(f64::NAN).is_err());
    }

    #[test]
    fn test_rejects_out_of_order_input() {
        let trades = vec![make_trade(10.0, 1.0, 2_000), make_trade(10.0, 1.0, 1_000)];

        let err = aggregate_dollar_bars(trades, 25.0).unwrap_err();
        assert!(matches!(err, Error::OutOfOrderTrade { index: 1, .. }));
    }

    #[test]
    fn test_streaming_rejects_out_of_order_input() {
        let mut aggregator = DollarBarAggregator::new(25.0).unwrap();
        assert!(aggregator
            .update(&make_trade(10.0, 1.0, 2_000))
            .unwrap()
            .is_none());

        let err = aggregator
            .update(&make_trade(10.0, 1.0, 1_000))
            .unwrap_err();
        assert!(matches!(err, Error::OutOfOrderTrade { index: 1, .. }));

        // The rejected trade must not have touched the accumulator.
        assert_relative_eq!(aggregator.accumulated(), 10.0);
        let bar = aggregator.finish().unwrap();
        assert_eq!(bar.trade_count, 1);
        assert_eq!(bar.end_time, 2_000);
    }

    #[test]
    fn test_streaming_matches_batch() {
        let trades: Vec<Trade> = (0..30)
            .map(|i| make_trade(10.0, 0.7, i * 100))
            .collect();

        let mut aggregator = DollarBarAggregator::new(20.0).unwrap();
        let mut streamed = Vec::new();
        for trade in &trades {
            if let Some(bar) = aggregator.update(trade).unwrap() {
                streamed.push(bar);
            }
        }
        // 30 trades of notional 7 close a bar every 3 trades, leaving nothing pending.
        assert!(!aggregator.has_pending_bar());
        assert_relative_eq!(aggregator.accumulated(), 0.0);
        if let Some(bar) = aggregator.finish() {
            streamed.push(bar);
        }

        let batch = aggregate_dollar_bars(trades, 20.0).unwrap();
        assert_eq!(streamed, batch);
    }
}
