//! Descriptive analysis of dollar-bar series.
//!
//! This crate handles:
//! - Temporal, volume, price and structural bar statistics
//! - Rendering the fixed-format analysis report

pub mod analyzer;
pub mod report;
pub mod stats;

pub use analyzer::{analyze_bars, BarAnalysis, PriceStats, StructureStats, TemporalStats, VolumeStats};
