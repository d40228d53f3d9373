//! CSV adapters for bar records.

use std::fs::File;
use std::path::Path;

use tickbars_core::{DollarBar, Error, Result, TimeBar};
use tracing::debug;

use crate::map_csv_error;

/// Column order of the persisted dollar-bar file.
const DOLLAR_BAR_HEADERS: [&str; 8] = [
    "start_time",
    "end_time",
    "open",
    "high",
    "low",
    "close",
    "dollar_volume",
    "trade_count",
];

/// Column order of the persisted time-bar file.
const TIME_BAR_HEADERS: [&str; 6] = ["timestamp", "open", "high", "low", "close", "volume"];

/// Write dollar bars to CSV with the fixed eight-column header.
pub fn write_dollar_bars_csv<P: AsRef<Path>>(path: P, bars: &[DollarBar]) -> Result<()> {
    let path_str = path.as_ref().display().to_string();
    let file = File::create(path.as_ref()).map_err(|e| Error::io(&path_str, e))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(DOLLAR_BAR_HEADERS)
        .map_err(|e| map_csv_error(&path_str, 1, e))?;
    for (i, bar) in bars.iter().enumerate() {
        writer
            .write_record(&[
                bar.start_time.to_string(),
                bar.end_time.to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.dollar_volume.to_string(),
                bar.trade_count.to_string(),
            ])
            .map_err(|e| map_csv_error(&path_str, i + 2, e))?;
    }
    writer.flush().map_err(|e| Error::io(&path_str, e))?;

    debug!(bars = bars.len(), path = %path_str, "wrote dollar bars");
    Ok(())
}

/// Read dollar bars back from CSV, matching columns by header name.
pub fn read_dollar_bars_csv<P: AsRef<Path>>(path: P) -> Result<Vec<DollarBar>> {
    let path_str = path.as_ref().display().to_string();
    let file = File::open(path.as_ref()).map_err(|e| Error::io(&path_str, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(file);

    let mut bars = Vec::new();
    for (i, record) in reader.deserialize::<DollarBar>().enumerate() {
        let row = i + 2;
        let bar = record.map_err(|e| map_csv_error(&path_str, row, e))?;
        bars.push(bar);
    }

    debug!(bars = bars.len(), path = %path_str, "read dollar bars");
    Ok(bars)
}

/// Write time bars to CSV with the fixed six-column header.
pub fn write_time_bars_csv<P: AsRef<Path>>(path: P, bars: &[TimeBar]) -> Result<()> {
    let path_str = path.as_ref().display().to_string();
    let file = File::create(path.as_ref()).map_err(|e| Error::io(&path_str, e))?;
    let mut writer = csv::Writer::from_writer(file);

    writer
        .write_record(TIME_BAR_HEADERS)
        .map_err(|e| map_csv_error(&path_str, 1, e))?;
    for (i, bar) in bars.iter().enumerate() {
        writer
            .write_record(&[
                bar.timestamp.to_string(),
                bar.open.to_string(),
                bar.high.to_string(),
                bar.low.to_string(),
                bar.close.to_string(),
                bar.volume.to_string(),
            ])
            .map_err(|e| map_csv_error(&path_str, i + 2, e))?;
    }
    writer.flush().map_err(|e| Error::io(&path_str, e))?;

    debug!(bars = bars.len(), path = %path_str, "wrote time bars");
    Ok(())
}
