//! Signal-generating strategies.
//!
//! Each strategy is a pure function over a price series: it computes the
//! indicator columns it needs, keeps them in the returned frame, and adds
//! exactly its documented signal column.

use crate::domain::error::StratsimError;
use crate::domain::indicator::ma::rolling_mean;
use crate::domain::indicator::macd::{DEFAULT_FAST, DEFAULT_SIGNAL, DEFAULT_SLOW, macd_columns};
use crate::domain::indicator::rsi::{DEFAULT_PERIOD, rsi_values};
use crate::domain::indicator::{IndicatorColumn, IndicatorFrame};
use crate::domain::series::PriceSeries;
use crate::domain::signal::{Signal, SignalFrame};
use std::fmt;

pub const DEFAULT_SHORT_WINDOW: usize = 5;
pub const DEFAULT_LONG_WINDOW: usize = 20;
pub const DEFAULT_OVERSOLD: f64 = 30.0;
pub const DEFAULT_OVERBOUGHT: f64 = 70.0;

/// A configured strategy choice, resolvable from the config file.
#[derive(Debug, Clone, PartialEq)]
pub enum StrategySpec {
    MaCross {
        short: usize,
        long: usize,
    },
    MacdCross,
    RsiThreshold {
        period: usize,
        oversold: f64,
        overbought: f64,
    },
}

impl StrategySpec {
    pub fn generate(&self, series: &PriceSeries) -> Result<SignalFrame, StratsimError> {
        match *self {
            StrategySpec::MaCross { short, long } => ma_cross(series, short, long),
            StrategySpec::MacdCross => macd_cross(series),
            StrategySpec::RsiThreshold {
                period,
                oversold,
                overbought,
            } => rsi_threshold(series, period, oversold, overbought),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategySpec::MaCross { .. } => "ma-cross",
            StrategySpec::MacdCross => "macd-cross",
            StrategySpec::RsiThreshold { .. } => "rsi",
        }
    }
}

impl fmt::Display for StrategySpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategySpec::MaCross { short, long } => write!(f, "ma-cross({},{})", short, long),
            StrategySpec::MacdCross => write!(
                f,
                "macd-cross({},{},{})",
                DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL
            ),
            StrategySpec::RsiThreshold {
                period,
                oversold,
                overbought,
            } => write!(f, "rsi({},{},{})", period, oversold, overbought),
        }
    }
}

/// Golden/death cross of two moving averages.
///
/// An internal in-trend state is 1 while MA(short) > MA(long), 0 below,
/// undefined while either average is warming up. The exported `position`
/// column is its day-over-day difference: Buy on a fresh golden cross,
/// Sell on a fresh death cross, Hold otherwise. Row 0 and rows touching
/// undefined state are `None`, so the first defined value sits at index
/// `long`.
pub fn ma_cross(
    series: &PriceSeries,
    short: usize,
    long: usize,
) -> Result<SignalFrame, StratsimError> {
    if short == 0 {
        return Err(StratsimError::InvalidParameter {
            param: "short_window".into(),
            reason: "moving average window must be positive".into(),
        });
    }
    if short >= long {
        return Err(StratsimError::InvalidParameter {
            param: "short_window".into(),
            reason: format!("short window {short} must be less than long window {long}"),
        });
    }

    let closes = series.closes();
    let short_ma = rolling_mean(&closes, short);
    let long_ma = rolling_mean(&closes, long);

    let in_trend: Vec<Option<bool>> = short_ma
        .iter()
        .zip(&long_ma)
        .map(|(&s, &l)| {
            if s.is_nan() || l.is_nan() {
                None
            } else {
                Some(s > l)
            }
        })
        .collect();

    let mut position = Vec::with_capacity(in_trend.len());
    position.push(None);
    for pair in in_trend.windows(2) {
        position.push(match (pair[0], pair[1]) {
            (Some(false), Some(true)) => Some(Signal::Buy),
            (Some(true), Some(false)) => Some(Signal::Sell),
            (Some(_), Some(_)) => Some(Signal::Hold),
            _ => None,
        });
    }

    let mut frame = IndicatorFrame::new(series.clone());
    frame.insert(IndicatorColumn::Ma(short), short_ma);
    frame.insert(IndicatorColumn::Ma(long), long_ma);
    Ok(SignalFrame::from_position(frame, position))
}

/// DIF/DEA cross with the standard 12/26/9 spans.
///
/// Buy on the day DIF crosses from <= DEA to > DEA (comparing today's and
/// yesterday's DIF - DEA ordering), Sell on the reverse cross, Hold
/// otherwise. Seeded EMAs leave no warmup, so every row is defined and
/// row 0 is Hold.
pub fn macd_cross(series: &PriceSeries) -> Result<SignalFrame, StratsimError> {
    let closes = series.closes();
    let columns = macd_columns(&closes, DEFAULT_FAST, DEFAULT_SLOW, DEFAULT_SIGNAL);

    let mut signal = Vec::with_capacity(closes.len());
    signal.push(Some(Signal::Hold));
    for i in 1..closes.len() {
        let today = columns.dif[i] - columns.dea[i];
        let yesterday = columns.dif[i - 1] - columns.dea[i - 1];
        signal.push(Some(if today > 0.0 && yesterday <= 0.0 {
            Signal::Buy
        } else if today < 0.0 && yesterday >= 0.0 {
            Signal::Sell
        } else {
            Signal::Hold
        }));
    }

    let mut frame = IndicatorFrame::new(series.clone());
    columns.insert_into(&mut frame, DEFAULT_FAST, DEFAULT_SLOW);
    Ok(SignalFrame::from_signal(frame, signal))
}

/// RSI level rule, not a cross rule: Buy while RSI < oversold, Sell while
/// RSI > overbought, Hold between; warmup rows are `None`.
pub fn rsi_threshold(
    series: &PriceSeries,
    period: usize,
    oversold: f64,
    overbought: f64,
) -> Result<SignalFrame, StratsimError> {
    if period == 0 {
        return Err(StratsimError::InvalidParameter {
            param: "rsi_period".into(),
            reason: "RSI period must be positive".into(),
        });
    }
    if !oversold.is_finite() || !overbought.is_finite() || oversold >= overbought {
        return Err(StratsimError::InvalidParameter {
            param: "oversold".into(),
            reason: format!("oversold {oversold} must be less than overbought {overbought}"),
        });
    }

    let closes = series.closes();
    let rsi = rsi_values(&closes, period);
    let signal: Vec<Option<Signal>> = rsi
        .iter()
        .map(|&value| {
            if value.is_nan() {
                None
            } else if value < oversold {
                Some(Signal::Buy)
            } else if value > overbought {
                Some(Signal::Sell)
            } else {
                Some(Signal::Hold)
            }
        })
        .collect();

    let mut frame = IndicatorFrame::new(series.clone());
    frame.insert(IndicatorColumn::Rsi(period), rsi);
    Ok(SignalFrame::from_signal(frame, signal))
}

/// RSI strategy with the conventional 14/30/70 parameters.
pub fn rsi_threshold_default(series: &PriceSeries) -> Result<SignalFrame, StratsimError> {
    rsi_threshold(series, DEFAULT_PERIOD, DEFAULT_OVERSOLD, DEFAULT_OVERBOUGHT)
}
