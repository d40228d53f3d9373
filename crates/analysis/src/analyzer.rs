//! Dollar-bar series analysis.
//!
//! Derives the temporal, volume, price and structural statistics for a
//! completed dollar-bar series against the notional target it was built
//! with.

use chrono::{DateTime, Timelike, Utc};
use ordered_float::OrderedFloat;
use tickbars_core::{DollarBar, Error, Result};
use tracing::debug;

use crate::stats;

/// Fraction of the target below which a bar counts as undersized.
///
/// This is a heuristic carried over from the original report: it conflates
/// the genuinely partial trailing bar with bars that merely closed slightly
/// under target, and is kept for output compatibility.
pub const UNDERSIZED_FRACTION_OF_TARGET: f64 = 0.99;

/// Temporal characteristics of a bar series.
#[derive(Debug, Clone)]
pub struct TemporalStats {
    /// Mean bar duration in seconds.
    pub mean_duration_secs: f64,
    /// 25th percentile of bar duration (seconds).
    pub duration_p25_secs: f64,
    /// Median bar duration (seconds).
    pub duration_p50_secs: f64,
    /// 75th percentile of bar duration (seconds).
    pub duration_p75_secs: f64,
    /// UTC hour of day (from bar close) with the highest bar count.
    pub peak_activity_hour: u32,
}

/// Volume dynamics of a bar series.
#[derive(Debug, Clone)]
pub struct VolumeStats {
    /// Mean number of trades per bar.
    pub mean_trade_count: f64,
    /// Fraction of bars with notional below 99% of the target.
    pub undersized_fraction: f64,
    /// Skewness of the dollar-volume distribution.
    pub volume_skewness: f64,
}

/// Price behavior of a bar series.
#[derive(Debug, Clone)]
pub struct PriceStats {
    /// Mean intrabar range (high − low).
    pub mean_intrabar_range: f64,
    /// Lag-1 autocorrelation of close-to-close returns. `None` when the
    /// series is too short to define it (fewer than 3 bars).
    pub lag1_return_autocorrelation: Option<f64>,
    /// Largest single-bar high−low range. The report labels this "max
    /// drawdown" for compatibility with the original output; it is not a
    /// true peak-to-trough drawdown.
    pub max_intrabar_range: f64,
}

/// Structural observations on a bar series.
#[derive(Debug, Clone)]
pub struct StructureStats {
    /// Mean absolute deviation of dollar volume from the target.
    pub mean_abs_deviation_from_target: f64,
    /// Fraction of bars (excluding the first) whose open differs from the
    /// previous bar's close.
    pub gap_frequency: f64,
}

/// Complete analysis of a dollar-bar series.
#[derive(Debug, Clone)]
pub struct BarAnalysis {
    /// Number of bars analyzed.
    pub bar_count: usize,
    /// Notional target the series was generated with.
    pub target_size: f64,
    pub temporal: TemporalStats,
    pub volume: VolumeStats,
    pub price: PriceStats,
    pub structure: StructureStats,
}

/// Analyze a completed dollar-bar series.
///
/// Requires at least 2 bars (return-based statistics are undefined below
/// that) and a strictly positive target size.
pub fn analyze_bars(bars: &[DollarBar], target_size: f64) -> Result<BarAnalysis> {
    if !(target_size > 0.0) {
        return Err(Error::invalid_configuration(format!(
            "target size must be positive, got {target_size}"
        )));
    }
    if bars.len() < 2 {
        return Err(Error::insufficient_data(format!(
            "at least 2 bars are required for return-based statistics, got {}",
            bars.len()
        )));
    }

    let analysis = BarAnalysis {
        bar_count: bars.len(),
        target_size,
        temporal: temporal_stats(bars),
        volume: volume_stats(bars, target_size),
        price: price_stats(bars),
        structure: structure_stats(bars, target_size),
    };
    debug!(bars = bars.len(), target_size, "bar analysis complete");
    Ok(analysis)
}

fn temporal_stats(bars: &[DollarBar]) -> TemporalStats {
    let durations: Vec<f64> = bars
        .iter()
        .map(|b| b.duration_ms() as f64 / 1_000.0)
        .collect();
    let mean_duration_secs = stats::mean(&durations).unwrap_or(0.0);
    let (duration_p25_secs, duration_p50_secs, duration_p75_secs) =
        stats::quartiles(&durations).unwrap_or((0.0, 0.0, 0.0));

    let mut bars_per_hour = [0u32; 24];
    for bar in bars {
        let hour = DateTime::<Utc>::from_timestamp_millis(bar.end_time)
            .map(|dt| dt.hour())
            .unwrap_or(0);
        bars_per_hour[hour as usize] += 1;
    }
    let peak_activity_hour = bars_per_hour
        .iter()
        .enumerate()
        .max_by_key(|(_, count)| **count)
        .map(|(hour, _)| hour as u32)
        .unwrap_or(0);

    TemporalStats {
        mean_duration_secs,
        duration_p25_secs,
        duration_p50_secs,
        duration_p75_secs,
        peak_activity_hour,
    }
}

fn volume_stats(bars: &[DollarBar], target_size: f64) -> VolumeStats {
    let trade_counts: Vec<f64> = bars.iter().map(|b| b.trade_count as f64).collect();
    let volumes: Vec<f64> = bars.iter().map(|b| b.dollar_volume).collect();

    let undersized = bars
        .iter()
        .filter(|b| b.dollar_volume < UNDERSIZED_FRACTION_OF_TARGET * target_size)
        .count();

    VolumeStats {
        mean_trade_count: stats::mean(&trade_counts).unwrap_or(0.0),
        undersized_fraction: undersized as f64 / bars.len() as f64,
        volume_skewness: stats::skewness(&volumes).unwrap_or(0.0),
    }
}

fn price_stats(bars: &[DollarBar]) -> PriceStats {
    let ranges: Vec<f64> = bars.iter().map(DollarBar::range).collect();

    // Close-to-close simple returns; undefined for the first bar.
    let returns: Vec<f64> = bars
        .windows(2)
        .map(|pair| pair[1].close / pair[0].close - 1.0)
        .collect();

    let max_intrabar_range = ranges
        .iter()
        .map(|r| OrderedFloat(*r))
        .max()
        .map(OrderedFloat::into_inner)
        .unwrap_or(0.0);

    PriceStats {
        mean_intrabar_range: stats::mean(&ranges).unwrap_or(0.0),
        lag1_return_autocorrelation: stats::lag1_autocorrelation(&returns),
        max_intrabar_range,
    }
}

fn structure_stats(bars: &[DollarBar], target_size: f64) -> StructureStats {
    let volumes: Vec<f64> = bars.iter().map(|b| b.dollar_volume).collect();

    let gaps = bars
        .windows(2)
        .filter(|pair| pair[1].open != pair[0].close)
        .count();

    StructureStats {
        mean_abs_deviation_from_target: stats::mean_abs_deviation_from(&volumes, target_size)
            .unwrap_or(0.0),
        gap_frequency: gaps as f64 / (bars.len() - 1) as f64,
    }
}
