//! CSV adapters for the tickbars pipeline.
//!
//! This crate handles:
//! - Reading trade records from CSV (column matching by header name)
//! - Writing trade, time-bar and dollar-bar CSVs with fixed header rows
//!
//! Header names and field order are part of the persisted contract. Reads
//! fail fast: a malformed row aborts the whole pass with its row index
//! rather than being skipped, since silently dropped trades would corrupt
//! downstream accumulator totals.

pub mod bars;
pub mod trades;

pub use bars::{read_dollar_bars_csv, write_dollar_bars_csv, write_time_bars_csv};
pub use trades::{read_trades_csv, write_trades_csv};

use tickbars_core::Error;

/// Map a csv-crate error to our taxonomy, attaching the file path and the
/// 1-based file row the error occurred on. I/O failures stay `Io`; record
/// failures (parse, shape) become `MalformedRecord`.
fn map_csv_error(path: &str, row: usize, err: csv::Error) -> Error {
    let detail = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(source) => Error::io(path, source),
        _ => Error::malformed_record(path, row, detail),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_io_csv_error_maps_to_malformed_record() {
        // A record of the wrong width is a record error, not an I/O error.
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.write_record(["a", "b"]).unwrap();
        let err = writer.write_record(["only_one"]).unwrap_err();

        let mapped = map_csv_error("out.csv", 2, err);
        match mapped {
            Error::MalformedRecord { path, row, .. } => {
                assert_eq!(path, "out.csv");
                assert_eq!(row, 2);
            }
            other => panic!("expected MalformedRecord, got {other}"),
        }
    }
}
