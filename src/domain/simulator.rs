//! Single-asset backtest replay.
//!
//! Long-only, whole shares, market-at-close fills, no costs. The simulator
//! walks the declared trigger column day by day: a Buy while flat spends as
//! much cash as whole shares allow, a Sell while long liquidates the entire
//! position, everything else (Hold, undefined rows, re-entries, sells from
//! flat) changes nothing. Equity = cash + position * close is recorded for
//! every day, trade or not.

use crate::domain::error::StratsimError;
use crate::domain::signal::{Signal, SignalFrame};
use chrono::NaiveDate;
use serde::Serialize;

pub const DEFAULT_INITIAL_CASH: f64 = 100_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

/// One fill at that day's close.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trade {
    pub date: NaiveDate,
    pub side: TradeSide,
    pub price: f64,
    pub shares: u64,
    pub value: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EquityPoint {
    pub date: NaiveDate,
    pub equity: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BacktestResult {
    pub initial_cash: f64,
    pub final_cash: f64,
    pub final_position: u64,
    pub trades: Vec<Trade>,
    pub equity_curve: Vec<EquityPoint>,
}

/// Replay a signal frame against its own price series.
///
/// Fails fast, before touching any state for the day, on a non-positive or
/// non-finite close under a Buy or Sell trigger; no partial result escapes.
pub fn run_backtest(
    signals: &SignalFrame,
    initial_cash: f64,
) -> Result<BacktestResult, StratsimError> {
    if !initial_cash.is_finite() || initial_cash < 0.0 {
        return Err(StratsimError::InvalidParameter {
            param: "initial_cash".into(),
            reason: format!("must be a non-negative finite number, got {initial_cash}"),
        });
    }

    let triggers = signals.trigger_series()?;
    let candles = signals.frame().series().candles();
    if triggers.len() != candles.len() {
        return Err(StratsimError::MissingSignal {
            reason: format!(
                "trigger column has {} rows but the series has {}",
                triggers.len(),
                candles.len()
            ),
        });
    }

    let mut cash = initial_cash;
    let mut position: u64 = 0;
    let mut trades = Vec::new();
    let mut equity_curve = Vec::with_capacity(candles.len());

    for (candle, trigger) in candles.iter().zip(triggers) {
        let close = candle.close;
        match trigger {
            Some(Signal::Buy) => {
                if !close.is_finite() || close <= 0.0 {
                    return Err(StratsimError::InvalidPrice {
                        date: candle.date,
                        value: close,
                    });
                }
                // entry only from flat; re-entry while long is ignored
                if position == 0 && cash > 0.0 {
                    let shares = (cash / close).floor() as u64;
                    if shares > 0 {
                        let value = shares as f64 * close;
                        cash -= value;
                        position = shares;
                        trades.push(Trade {
                            date: candle.date,
                            side: TradeSide::Buy,
                            price: close,
                            shares,
                            value,
                        });
                    }
                }
            }
            Some(Signal::Sell) => {
                if !close.is_finite() || close <= 0.0 {
                    return Err(StratsimError::InvalidPrice {
                        date: candle.date,
                        value: close,
                    });
                }
                if position > 0 {
                    let value = position as f64 * close;
                    cash += value;
                    trades.push(Trade {
                        date: candle.date,
                        side: TradeSide::Sell,
                        price: close,
                        shares: position,
                        value,
                    });
                    position = 0;
                }
            }
            Some(Signal::Hold) | None => {}
        }
        equity_curve.push(EquityPoint {
            date: candle.date,
            equity: cash + position as f64 * close,
        });
    }

    Ok(BacktestResult {
        initial_cash,
        final_cash: cash,
        final_position: position,
        trades,
        equity_curve,
    })
}
