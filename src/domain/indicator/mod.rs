//! Technical indicator columns over a price series.
//!
//! This module provides the columnar indicator layer:
//! - `IndicatorColumn`: typed column identity + parameters (serves as HashMap key)
//! - `IndicatorFrame`: an owned `PriceSeries` plus its computed columns
//!
//! Warmup rows hold `f64::NAN`; a window longer than the series produces an
//! all-NaN column rather than an error.

pub mod ma;
pub mod macd;
pub mod rsi;

use crate::domain::series::PriceSeries;
use std::collections::HashMap;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IndicatorColumn {
    Ma(usize),
    Ema(usize),
    Dif,
    Dea,
    Macd,
    Rsi(usize),
}

impl fmt::Display for IndicatorColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorColumn::Ma(window) => write!(f, "MA{}", window),
            IndicatorColumn::Ema(span) => write!(f, "EMA{}", span),
            IndicatorColumn::Dif => write!(f, "DIF"),
            IndicatorColumn::Dea => write!(f, "DEA"),
            IndicatorColumn::Macd => write!(f, "MACD"),
            IndicatorColumn::Rsi(period) => write!(f, "RSI{}", period),
        }
    }
}

/// A price series with named indicator columns, one `f64` per candle row.
///
/// Owns a clone of the series it was computed from, so the original input
/// stays untouched between pipeline stages.
#[derive(Debug, Clone)]
pub struct IndicatorFrame {
    series: PriceSeries,
    columns: HashMap<IndicatorColumn, Vec<f64>>,
}

impl IndicatorFrame {
    pub fn new(series: PriceSeries) -> Self {
        Self {
            series,
            columns: HashMap::new(),
        }
    }

    pub fn series(&self) -> &PriceSeries {
        &self.series
    }

    /// Number of rows, same as the underlying series.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Attach a column. Callers must supply exactly one value per candle row.
    pub fn insert(&mut self, column: IndicatorColumn, values: Vec<f64>) {
        debug_assert_eq!(values.len(), self.len());
        self.columns.insert(column, values);
    }

    pub fn column(&self, column: IndicatorColumn) -> Option<&[f64]> {
        self.columns.get(&column).map(Vec::as_slice)
    }
}
