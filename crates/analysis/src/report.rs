//! Plain-text rendering of a bar analysis.
//!
//! Section names, metric order and units are part of the output contract
//! and must not be reordered.

use std::fmt::Write;

use crate::analyzer::BarAnalysis;

impl BarAnalysis {
    /// Render the fixed-format four-section report.
    pub fn render(&self) -> String {
        let mut out = String::new();

        // Infallible: writing to a String cannot fail.
        let _ = writeln!(out, "Dollar Bar Analysis");
        let _ = writeln!(out, "Bars analyzed: {}", group_thousands(self.bar_count as u64));
        let _ = writeln!(out, "Target bar size: {}", format_currency(self.target_size));
        let _ = writeln!(out);

        let _ = writeln!(out, "=== Temporal Characteristics ===");
        let _ = writeln!(
            out,
            "Mean bar duration: {:.2} seconds",
            self.temporal.mean_duration_secs
        );
        let _ = writeln!(
            out,
            "Duration percentiles (25/50/75): {:.2} / {:.2} / {:.2} seconds",
            self.temporal.duration_p25_secs,
            self.temporal.duration_p50_secs,
            self.temporal.duration_p75_secs
        );
        let _ = writeln!(
            out,
            "Peak activity hour (UTC): {:02}:00",
            self.temporal.peak_activity_hour
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "=== Volume Dynamics ===");
        let _ = writeln!(
            out,
            "Mean trades per bar: {:.2}",
            self.volume.mean_trade_count
        );
        let _ = writeln!(
            out,
            "Bars below 99% of target: {:.2}%",
            self.volume.undersized_fraction * 100.0
        );
        let _ = writeln!(
            out,
            "Dollar volume skewness: {:.2}",
            self.volume.volume_skewness
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "=== Price Behavior ===");
        let _ = writeln!(
            out,
            "Mean intrabar range: {}",
            format_currency(self.price.mean_intrabar_range)
        );
        match self.price.lag1_return_autocorrelation {
            Some(autocorr) => {
                let _ = writeln!(out, "Lag-1 return autocorrelation: {autocorr:.2}");
            }
            None => {
                let _ = writeln!(out, "Lag-1 return autocorrelation: undefined");
            }
        }
        let _ = writeln!(
            out,
            "Max drawdown (largest intrabar range): {}",
            format_currency(self.price.max_intrabar_range)
        );
        let _ = writeln!(out);

        let _ = writeln!(out, "=== Structural Observations ===");
        let _ = writeln!(
            out,
            "Mean absolute deviation from target: {}",
            format_currency(self.structure.mean_abs_deviation_from_target)
        );
        let _ = writeln!(
            out,
            "Gap frequency: {:.2}%",
            self.structure.gap_frequency * 100.0
        );

        out
    }
}

/// Format a dollar amount with thousands separators and 2 decimals.
fn format_currency(value: f64) -> String {
    let sign = if value < 0.0 { "-" } else { "" };
    let abs = value.abs();
    let mut whole = abs.trunc() as u64;
    let mut cents = ((abs - abs.trunc()) * 100.0).round() as u64;
    if cents == 100 {
        whole += 1;
        cents = 0;
    }
    format!("{sign}${}.{cents:02}", group_thousands(whole))
}

/// Group a non-negative integer into comma-separated thousands.
fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
