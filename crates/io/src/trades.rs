//! CSV adapter for trade records.

use std::fs::File;
use std::path::Path;

use tickbars_core::{Error, Result, Trade};
use tracing::debug;

use crate::map_csv_error;

/// Column order of the persisted trade file.
const TRADE_HEADERS: [&str; 3] = ["price", "quantity", "timestamp"];

/// Read trades from a CSV file with a `price,quantity,timestamp` header.
///
/// Columns are matched by name; extra columns are tolerated. A row that
/// fails to parse or violates the trade invariants aborts the read with
/// its 1-based file row index.
pub fn read_trades_csv<P: AsRef<Path>>(path: P) -> Result<Vec<Trade>> {
    let path_str = path.as_ref().display().to_string();
    let file = File::open(path.as_ref()).map_err(|e| Error::io(&path_str, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let mut trades = Vec::new();
    for (i, record) in reader.deserialize::<Trade>().enumerate() {
        // Row 1 is the header; data starts at row 2.
        let row = i + 2;
        let trade = record.map_err(|e| map_csv_error(&path_str, row, e))?;
        if !trade.is_valid() {
            return Err(Error::malformed_record(
                &path_str,
                row,
                format!(
                    "invariant violation: price={} quantity={} timestamp={}",
                    trade.price, trade.quantity, trade.timestamp
                ),
            ));
        }
        trades.push(trade);
    }

    debug!(trades = trades.len(), path = %path_str, "read trades");
    Ok(trades)
}

/// Write trades to CSV with the fixed `price,quantity,timestamp` header.
pub fn write_trades_csv<P: AsRef<Path>>(path: P, trades: &[Trade]) -> Result<()> {
    let path_str = path.as_ref().display().to_string();
    let file = File::create(path.as_ref()).map_err(|e| Error::io(&path_str, e))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(TRADE_HEADERS)
        .map_err(|e| map_csv_error(&path_str, 1, e))?;
    for (i, trade) in trades.iter().enumerate() {
        writer
            .write_record(&[
                trade.price.to_string(),
                trade.quantity.to_string(),
                trade.timestamp.to_string(),
            ])
            .map_err(|e| map_csv_error(&path_str, i + 2, e))?;
    }
    writer.flush().map_err(|e| Error::io(&path_str, e))?;

    debug!(trades = trades.len(), path = %path_str, "wrote trades");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write as _;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");

        let trades = vec![
            Trade::new(50000.5, 0.1, 1_000),
            Trade::new(49999.0, 0.25, 2_000),
        ];
        write_trades_csv(&path, &trades).unwrap();

        let read_back = read_trades_csv(&path).unwrap();
        assert_eq!(read_back, trades);
    }

    #[test]
    fn test_extra_columns_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "trade_id,price,quantity,timestamp,is_buyer_maker").unwrap();
        writeln!(file, "1,100.5,0.2,1000,true").unwrap();
        drop(file);

        let trades = read_trades_csv(&path).unwrap();
        assert_eq!(trades.len(), 1);
        assert_relative_eq!(trades[0].price, 100.5);
        assert_eq!(trades[0].timestamp, 1_000);
    }

    #[test]
    fn test_malformed_field_reports_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "price,quantity,timestamp").unwrap();
        writeln!(file, "100.0,1.0,1000").unwrap();
        writeln!(file, "not_a_number,1.0,2000").unwrap();
        drop(file);

        let err = read_trades_csv(&path).unwrap_err();
        match err {
            Error::MalformedRecord { row, .. } => assert_eq!(row, 3),
            other => panic!("expected MalformedRecord, got {other}"),
        }
    }

    #[test]
    fn test_invariant_violation_reports_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        let mut file = File::create(&path).unwrap();
        writeln!(file, "price,quantity,timestamp").unwrap();
        writeln!(file, "-5.0,1.0,1000").unwrap();
        drop(file);

        let err = read_trades_csv(&path).unwrap_err();
        assert!(matches!(err, Error::MalformedRecord { row: 2, .. }));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = read_trades_csv("/nonexistent/trades.csv").unwrap_err();
        match err {
            Error::Io { path, .. } => assert!(path.contains("trades.csv")),
            other => panic!("expected Io, got {other}"),
        }
    }

    #[test]
    fn test_header_contract() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trades.csv");
        write_trades_csv(&path, &[Trade::new(10.0, 1.0, 0)]).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("price,quantity,timestamp\n"));
    }
}
