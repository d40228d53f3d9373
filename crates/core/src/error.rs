//! Error types for the tickbars pipeline.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the tickbars pipeline.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid configuration (bad interval string, non-positive threshold).
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Unparseable or invariant-violating row in an input file.
    #[error("Malformed record in {path} at row {row}: {detail}")]
    MalformedRecord {
        path: String,
        row: usize,
        detail: String,
    },

    /// Input trade sequence is not chronologically ordered.
    #[error("Out-of-order trade at index {index}: timestamp {ts} precedes previous timestamp {prev}")]
    OutOfOrderTrade {
        index: usize,
        prev: i64,
        ts: i64,
    },

    /// Insufficient data for computation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// I/O failure with the offending path attached.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a configuration error.
    pub fn invalid_configuration(msg: impl Into<String>) -> Self {
        Error::InvalidConfiguration(msg.into())
    }

    /// Create a malformed-record error.
    pub fn malformed_record(
        path: impl Into<String>,
        row: usize,
        detail: impl Into<String>,
    ) -> Self {
        Error::MalformedRecord {
            path: path.into(),
            row,
            detail: detail.into(),
        }
    }

    /// Create an insufficient-data error.
    pub fn insufficient_data(msg: impl Into<String>) -> Self {
        Error::InsufficientData(msg.into())
    }

    /// Create an I/O error carrying the offending path.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_message() {
        let err = Error::malformed_record("trades.csv", 7, "invalid float literal");
        assert_eq!(
            err.to_string(),
            "Malformed record in trades.csv at row 7: invalid float literal"
        );
    }

    #[test]
    fn test_out_of_order_message_has_context() {
        let err = Error::OutOfOrderTrade {
            index: 3,
            prev: 2_000,
            ts: 1_500,
        };
        let msg = err.to_string();
        assert!(msg.contains("index 3"));
        assert!(msg.contains("1500"));
        assert!(msg.contains("2000"));
    }
}
