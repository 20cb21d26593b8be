//! MACD (Moving Average Convergence Divergence) indicator.
//!
//! Exponential means use smoothing alpha = 2/(span+1), seeded with the
//! first observation so every row from index 0 is defined:
//!   EMA[0] = close[0];  EMA[i] = close[i]*alpha + EMA[i-1]*(1-alpha)
//!   DIF  = EMA(fast) - EMA(slow)
//!   DEA  = exponential mean of DIF with span `signal`
//!   MACD = 2 * (DIF - DEA)
//!
//! Default parameters: fast=12, slow=26, signal=9. A constant close series
//! keeps DIF, DEA and MACD at exactly zero.

use crate::domain::error::StratsimError;
use crate::domain::indicator::{IndicatorColumn, IndicatorFrame};
use crate::domain::series::PriceSeries;

pub const DEFAULT_FAST: usize = 12;
pub const DEFAULT_SLOW: usize = 26;
pub const DEFAULT_SIGNAL: usize = 9;

/// Compute EMA(fast), EMA(slow), DIF, DEA and MACD columns.
pub fn calculate_macd(
    series: &PriceSeries,
    fast: usize,
    slow: usize,
    signal: usize,
) -> Result<IndicatorFrame, StratsimError> {
    for (param, span) in [("fast", fast), ("slow", slow), ("signal", signal)] {
        if span == 0 {
            return Err(StratsimError::InvalidParameter {
                param: param.into(),
                reason: "MACD span must be positive".into(),
            });
        }
    }

    let columns = macd_columns(&series.closes(), fast, slow, signal);
    let mut frame = IndicatorFrame::new(series.clone());
    columns.insert_into(&mut frame, fast, slow);
    Ok(frame)
}

pub fn calculate_macd_default(series: &PriceSeries) -> Result<IndicatorFrame, StratsimError> {
    calculate_macd(series, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL)
}

/// The five MACD-family columns for one close series.
pub(crate) struct MacdColumns {
    pub(crate) ema_fast: Vec<f64>,
    pub(crate) ema_slow: Vec<f64>,
    pub(crate) dif: Vec<f64>,
    pub(crate) dea: Vec<f64>,
    pub(crate) macd: Vec<f64>,
}

impl MacdColumns {
    pub(crate) fn insert_into(self, frame: &mut IndicatorFrame, fast: usize, slow: usize) {
        frame.insert(IndicatorColumn::Ema(fast), self.ema_fast);
        frame.insert(IndicatorColumn::Ema(slow), self.ema_slow);
        frame.insert(IndicatorColumn::Dif, self.dif);
        frame.insert(IndicatorColumn::Dea, self.dea);
        frame.insert(IndicatorColumn::Macd, self.macd);
    }
}

pub(crate) fn macd_columns(closes: &[f64], fast: usize, slow: usize, signal: usize) -> MacdColumns {
    let ema_fast = ewm_mean(closes, fast);
    let ema_slow = ewm_mean(closes, slow);
    let dif: Vec<f64> = ema_fast.iter().zip(&ema_slow).map(|(f, s)| f - s).collect();
    let dea = ewm_mean(&dif, signal);
    let macd: Vec<f64> = dif.iter().zip(&dea).map(|(d, e)| 2.0 * (d - e)).collect();
    MacdColumns {
        ema_fast,
        ema_slow,
        dif,
        dea,
        macd,
    }
}

/// Exponential mean seeded with the first observation; no warmup rows.
pub(crate) fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    let alpha = 2.0 / (span as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let Some(&first) = values.first() else {
        return out;
    };
    let mut ema = first;
    out.push(ema);
    for &value in &values[1..] {
        ema = value * alpha + ema * (1.0 - alpha);
        out.push(ema);
    }
    out
}
