//! CSV candle input for a replay.

use crate::error::ReplayError;
use chrono::{DateTime, Duration, Utc};
use core_types::Kline;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

#[derive(Debug, Deserialize)]
struct CandleRow {
    /// Open time in milliseconds since the epoch.
    timestamp: i64,
    #[serde(with = "rust_decimal::serde::str")]
    open: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    high: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    low: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    close: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    volume: Decimal,
}

/// Parses an interval such as `15m`, `1h`, `4h` or `1d`.
pub fn parse_interval(interval: &str) -> Result<Duration, ReplayError> {
    let invalid = || ReplayError::Data(format!("Invalid interval '{}'", interval));
    let split = interval.len().checked_sub(1).ok_or_else(invalid)?;
    let (amount, unit) = interval.split_at_checked(split).ok_or_else(invalid)?;
    let amount: i64 = amount.parse().map_err(|_| invalid())?;
    if amount <= 0 {
        return Err(invalid());
    }
    match unit {
        "s" => Ok(Duration::seconds(amount)),
        "m" => Ok(Duration::minutes(amount)),
        "h" => Ok(Duration::hours(amount)),
        "d" => Ok(Duration::days(amount)),
        "w" => Ok(Duration::weeks(amount)),
        _ => Err(invalid()),
    }
}

/// Loads candles from a CSV file with `timestamp,open,high,low,close,volume` columns.
pub fn load_klines_csv(path: &Path, interval: &str) -> Result<Vec<Kline>, ReplayError> {
    let file = BufReader::new(File::open(path)?);
    read_klines(file, interval)
}

fn read_klines<R: Read>(reader: R, interval: &str) -> Result<Vec<Kline>, ReplayError> {
    let step = parse_interval(interval)?;
    let mut reader = csv::Reader::from_reader(reader);
    let mut klines: Vec<Kline> = Vec::new();

    for (line, row) in reader.deserialize::<CandleRow>().enumerate() {
        let row = row?;
        let open_time = DateTime::<Utc>::from_timestamp_millis(row.timestamp)
            .ok_or_else(|| ReplayError::Data(format!("Row {}: timestamp {} is out of range", line + 1, row.timestamp)))?;
        if let Some(previous) = klines.last().filter(|previous| previous.open_time >= open_time) {
            return Err(ReplayError::Data(format!(
                "Row {}: candles must be in ascending time order ({} follows {})",
                line + 1,
                open_time,
                previous.open_time
            )));
        }
        klines.push(Kline {
            open_time,
            open: row.open,
            high: row.high,
            low: row.low,
            close: row.close,
            volume: row.volume,
            close_time: open_time + step - Duration::milliseconds(1),
            interval: interval.to_string(),
        });
    }

    tracing::debug!(candles = klines.len(), interval, "Loaded candles");
    Ok(klines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::io::Write;

    const CANDLES: &str = "timestamp,open,high,low,close,volume
1672531200000,100.5,101,99.75,100.25,12.5
1672534800000,100.25,102,100,101.75,8
";

    #[test]
    fn test_parse_interval() {
        assert_eq!(parse_interval("15m").unwrap(), Duration::minutes(15));
        assert_eq!(parse_interval("4h").unwrap(), Duration::hours(4));
        assert_eq!(parse_interval("1d").unwrap(), Duration::days(1));
        assert!(parse_interval("").is_err());
        assert!(parse_interval("h").is_err());
        assert!(parse_interval("0h").is_err());
        assert!(parse_interval("3x").is_err());
    }

    #[test]
    fn test_read_klines() {
        let klines = read_klines(CANDLES.as_bytes(), "1h").unwrap();
        assert_eq!(klines.len(), 2);
        let first = &klines[0];
        assert_eq!(first.open_time, Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(first.open, dec!(100.5));
        assert_eq!(first.low, dec!(99.75));
        assert_eq!(first.close, dec!(100.25));
        assert_eq!(first.close_time, klines[1].open_time - Duration::milliseconds(1));
        assert_eq!(first.interval, "1h");
    }

    #[test]
    fn test_out_of_order_rows_are_rejected() {
        let swapped = "timestamp,open,high,low,close,volume
1672534800000,1,1,1,1,1
1672531200000,1,1,1,1,1
";
        assert!(matches!(read_klines(swapped.as_bytes(), "1h"), Err(ReplayError::Data(_))));
    }

    #[test]
    fn test_malformed_price_is_a_csv_error() {
        let bad = "timestamp,open,high,low,close,volume
1672531200000,abc,1,1,1,1
";
        assert!(matches!(read_klines(bad.as_bytes(), "1h"), Err(ReplayError::Csv(_))));
    }

    #[test]
    fn test_load_file() {
        let mut candles = tempfile::NamedTempFile::new().unwrap();
        candles.write_all(CANDLES.as_bytes()).unwrap();
        assert_eq!(load_klines_csv(candles.path(), "1h").unwrap().len(), 2);

        let missing = candles.path().with_extension("missing");
        assert!(matches!(load_klines_csv(&missing, "1h"), Err(ReplayError::Io(_))));
    }
}
