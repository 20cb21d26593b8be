//! CSV price file data adapter.
//!
//! Reads one `<symbol>.csv` per symbol from a base directory. The expected
//! header is `date,open,high,low,close`; extra columns are ignored. Rows may
//! arrive in any order and are sorted by date before the series is built,
//! but every price must be a positive finite number and each row must keep
//! open and close inside the low..high range. One dirty row fails the load.

use crate::domain::error::StratsimError;
use crate::domain::series::{Candle, PriceSeries};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

#[derive(Debug)]
pub struct CsvDataAdapter {
    prices_dir: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(prices_dir: impl Into<PathBuf>) -> Self {
        Self {
            prices_dir: prices_dir.into(),
        }
    }

    /// Builds the adapter from the `[data]` section of a config source.
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, StratsimError> {
        match config.get_string("data", "prices_dir") {
            Some(dir) if !dir.trim().is_empty() => Ok(Self::new(dir)),
            _ => Err(StratsimError::ConfigMissing {
                section: "data".to_string(),
                key: "prices_dir".to_string(),
            }),
        }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.prices_dir.join(format!("{symbol}.csv"))
    }

    fn read_candles(&self, symbol: &str) -> Result<Vec<Candle>, StratsimError> {
        let path = self.csv_path(symbol);
        let content = fs::read_to_string(&path).map_err(|e| StratsimError::Data {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut candles = Vec::new();

        for (i, result) in rdr.records().enumerate() {
            // the header occupies line 1
            let line = i + 2;
            let record =
                result.map_err(|e| row_error(symbol, line, &format!("parse error: {e}")))?;

            let date_str = record
                .get(0)
                .ok_or_else(|| row_error(symbol, line, "missing date column"))?;
            let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").map_err(|_| {
                row_error(
                    symbol,
                    line,
                    &format!("invalid date {date_str:?}, expected YYYY-MM-DD"),
                )
            })?;

            let open = price_column(&record, symbol, line, 1, "open")?;
            let high = price_column(&record, symbol, line, 2, "high")?;
            let low = price_column(&record, symbol, line, 3, "low")?;
            let close = price_column(&record, symbol, line, 4, "close")?;

            if low > open.min(close) || open.max(close) > high {
                return Err(row_error(
                    symbol,
                    line,
                    &format!(
                        "inconsistent range on {date}: low {low}, open {open}, close {close}, high {high}"
                    ),
                ));
            }

            candles.push(Candle {
                date,
                open,
                high,
                low,
                close,
            });
        }

        candles.sort_by_key(|c| c.date);
        Ok(candles)
    }
}

fn row_error(symbol: &str, line: usize, reason: &str) -> StratsimError {
    StratsimError::Data {
        reason: format!("{symbol}.csv row {line}: {reason}"),
    }
}

fn price_column(
    record: &csv::StringRecord,
    symbol: &str,
    line: usize,
    idx: usize,
    name: &str,
) -> Result<f64, StratsimError> {
    let raw = record
        .get(idx)
        .ok_or_else(|| row_error(symbol, line, &format!("missing {name} column")))?;
    let value: f64 = raw
        .parse()
        .map_err(|_| row_error(symbol, line, &format!("invalid {name} value {raw:?}")))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(row_error(
            symbol,
            line,
            &format!("{name} must be a positive finite number, got {raw}"),
        ));
    }
    Ok(value)
}

impl DataPort for CsvDataAdapter {
    fn fetch_series(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<PriceSeries, StratsimError> {
        let mut candles = self.read_candles(symbol)?;
        if let Some(start) = start {
            candles.retain(|c| c.date >= start);
        }
        if let Some(end) = end {
            candles.retain(|c| c.date <= end);
        }
        PriceSeries::new(symbol, candles)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StratsimError> {
        let entries = fs::read_dir(&self.prices_dir).map_err(|e| StratsimError::Data {
            reason: format!(
                "failed to read directory {}: {}",
                self.prices_dir.display(),
                e
            ),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StratsimError::Data {
                reason: format!("directory entry error: {e}"),
            })?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".csv") {
                symbols.push(stem.to_string());
            }
        }

        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StratsimError> {
        if !self.csv_path(symbol).exists() {
            return Ok(None);
        }
        let candles = self.read_candles(symbol)?;
        match (candles.first(), candles.last()) {
            (Some(first), Some(last)) => Ok(Some((first.date, last.date, candles.len()))),
            _ => Ok(None),
        }
    }
}
