//! Core types and configuration for the tickbars pipeline.
//!
//! This crate provides shared types used across all other crates:
//! - Market data types (trades, time bars, dollar bars)
//! - Bar interval configuration
//! - Common error types

pub mod config;
pub mod error;
pub mod types;

pub use config::Interval;
pub use error::{Error, Result};
pub use types::*;
