//! Scalar statistics over f64 series.
//!
//! Percentiles come from statrs; the moment-based statistics are computed
//! directly since they need specific degenerate-case handling (constant
//! series yield 0, not NaN).

use statrs::statistics::{Data, OrderStatistics};

/// Arithmetic mean. `None` for an empty slice.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Empirical 25th/50th/75th percentiles. `None` for an empty slice.
pub fn quartiles(values: &[f64]) -> Option<(f64, f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let mut data = Data::new(values.to_vec());
    Some((data.percentile(25), data.percentile(50), data.percentile(75)))
}

/// Skewness as the third standardized moment (population form).
///
/// Returns 0 for a constant series and `None` for fewer than 2 values.
pub fn skewness(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let m2 = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let m3 = values.iter().map(|v| (v - mean).powi(3)).sum::<f64>() / n;

    if m2 <= 0.0 {
        Some(0.0)
    } else {
        Some(m3 / m2.powf(1.5))
    }
}

/// Lag-1 autocorrelation (Pearson form with the series mean).
///
/// Returns 0 for a constant series and `None` for fewer than 2 values.
pub fn lag1_autocorrelation(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let denominator: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();

    if denominator <= 0.0 {
        return Some(0.0);
    }
    let numerator: f64 = values
        .windows(2)
        .map(|pair| (pair[0] - mean) * (pair[1] - mean))
        .sum();
    Some(numerator / denominator)
}

/// Mean absolute deviation from a fixed reference value.
pub fn mean_abs_deviation_from(values: &[f64], reference: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().map(|v| (v - reference).abs()).sum::<f64>() / values.len() as f64)
}
