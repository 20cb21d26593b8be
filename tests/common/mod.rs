#![allow(dead_code)]

use chrono::NaiveDate;
use std::collections::HashMap;
use stratsim::domain::error::StratsimError;
use stratsim::domain::series::{Candle, PriceSeries};
use stratsim::ports::data_port::DataPort;

pub struct MockDataPort {
    pub series: HashMap<String, Vec<Candle>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            series: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_candles(mut self, symbol: &str, candles: Vec<Candle>) -> Self {
        self.series.insert(symbol.to_string(), candles);
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn fetch_series(
        &self,
        symbol: &str,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<PriceSeries, StratsimError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StratsimError::Data {
                reason: reason.clone(),
            });
        }
        let mut candles = self.series.get(symbol).cloned().unwrap_or_default();
        if let Some(start) = start {
            candles.retain(|c| c.date >= start);
        }
        if let Some(end) = end {
            candles.retain(|c| c.date <= end);
        }
        PriceSeries::new(symbol, candles)
    }

    fn list_symbols(&self) -> Result<Vec<String>, StratsimError> {
        let mut symbols: Vec<String> = self.series.keys().cloned().collect();
        symbols.sort();
        Ok(symbols)
    }

    fn data_range(
        &self,
        symbol: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate, usize)>, StratsimError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(StratsimError::Data {
                reason: reason.clone(),
            });
        }
        match self.series.get(symbol) {
            Some(candles) if !candles.is_empty() => {
                let min = candles.iter().map(|c| c.date).min().unwrap();
                let max = candles.iter().map(|c| c.date).max().unwrap();
                Ok(Some((min, max, candles.len())))
            }
            _ => Ok(None),
        }
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn make_candle(date: &str, close: f64) -> Candle {
    Candle {
        date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
    }
}

/// Series with the given closes on consecutive days from 2024-01-01.
pub fn make_series(symbol: &str, closes: &[f64]) -> PriceSeries {
    let start = date(2024, 1, 1);
    let candles = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| Candle {
            date: start + chrono::Days::new(i as u64),
            open: close,
            high: close + 1.0,
            low: close - 1.0,
            close,
        })
        .collect();
    PriceSeries::new(symbol, candles).unwrap()
}

pub fn generate_candles(start_date: &str, count: usize, start_price: f64) -> Vec<Candle> {
    let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").unwrap();
    (0..count)
        .map(|i| Candle {
            date: start + chrono::Days::new(i as u64),
            open: start_price + i as f64,
            high: start_price + i as f64 + 1.0,
            low: start_price + i as f64 - 1.0,
            close: start_price + i as f64,
        })
        .collect()
}
