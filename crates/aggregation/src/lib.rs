//! Bar construction for the tickbars pipeline.
//!
//! This crate handles:
//! - Dollar-bar construction (activity-clock sampling by notional value)
//! - Fixed-interval OHLCV bar construction
//!
//! Both aggregators consume a chronologically ordered trade sequence in a
//! single pass and reject out-of-order input.

pub mod dollar_bars;
pub mod time_bars;

pub use dollar_bars::{aggregate_dollar_bars, DollarBarAggregator};
pub use time_bars::aggregate_time_bars;

use tickbars_core::{Error, Result, TimestampMs, Trade};

/// Check that a trade does not step backwards in time.
fn check_order(index: usize, prev: Option<TimestampMs>, trade: &Trade) -> Result<()> {
    match prev {
        Some(prev) if trade.timestamp < prev => Err(Error::OutOfOrderTrade {
            index,
            prev,
            ts: trade.timestamp,
        }),
        _ => Ok(()),
    }
}
