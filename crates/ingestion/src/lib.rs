//! Trade ingestion for the tickbars pipeline.
//!
//! This crate handles:
//! - Paginated aggregate-trade download from the Binance REST API
//!
//! The rest of the pipeline consumes the result as a plain ordered trade
//! sequence and never depends on this crate.

pub mod binance;

pub use binance::{BinanceClient, IngestionError};
