//! Daily OHLC price series for a single symbol.

use crate::domain::error::StratsimError;
use chrono::NaiveDate;

/// A single daily OHLC candle.
///
/// Callers are expected to supply positive finite prices with
/// `low <= min(open, close)` and `max(open, close) <= high`; the CSV
/// adapter enforces this on the way in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candle {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// One symbol's candles in strictly increasing date order.
///
/// Immutable once built; downstream stages read it by reference and
/// attach derived columns to their own frames, never back into the series.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSeries {
    symbol: String,
    candles: Vec<Candle>,
}

impl PriceSeries {
    /// Build a series, checking structure: at least one candle and
    /// strictly increasing dates (duplicates rejected).
    pub fn new(symbol: impl Into<String>, candles: Vec<Candle>) -> Result<Self, StratsimError> {
        let symbol = symbol.into();
        if candles.is_empty() {
            return Err(StratsimError::InsufficientData {
                symbol,
                have: 0,
                need: 1,
            });
        }
        for pair in candles.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(StratsimError::InvalidSeries {
                    symbol,
                    reason: format!("dates not strictly increasing at {}", pair[1].date),
                });
            }
        }
        Ok(Self { symbol, candles })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Close prices in date order.
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }

    pub fn start_date(&self) -> NaiveDate {
        self.candles[0].date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.candles[self.candles.len() - 1].date
    }
}
