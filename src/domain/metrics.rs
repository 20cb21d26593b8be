//! Performance statistics over a backtest equity curve.
//!
//! ```text
//! total_return%  = (final / initial - 1) * 100
//! daily return   = equity[t] / equity[t-1] - 1     (0 when equity[t-1] <= 0)
//! annual_return% = mean(daily) * 252 * 100
//! volatility%    = stdev_sample(daily) * sqrt(252) * 100
//! sharpe         = annual_return% / volatility%    (0 when volatility is 0)
//! max_drawdown%  = min over t of (equity[t] / peak[t] - 1) * 100
//! ```
//!
//! All ratios assume 252 trading days per year and no risk-free rate.

use crate::domain::simulator::{BacktestResult, EquityPoint};
use serde::Serialize;

pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceStats {
    pub initial_capital: f64,
    pub final_capital: f64,
    pub total_return_pct: f64,
    pub annual_return_pct: f64,
    pub volatility_pct: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown_pct: f64,
    pub trade_count: usize,
}

impl PerformanceStats {
    pub fn compute(result: &BacktestResult) -> Self {
        let initial_capital = result.initial_cash;
        let final_capital = result
            .equity_curve
            .last()
            .map(|p| p.equity)
            .unwrap_or(initial_capital);

        let total_return_pct = if initial_capital > 0.0 {
            (final_capital / initial_capital - 1.0) * 100.0
        } else {
            0.0
        };

        let returns = daily_returns(&result.equity_curve);
        let annual_return_pct = if returns.is_empty() {
            0.0
        } else {
            let mean = returns.iter().sum::<f64>() / returns.len() as f64;
            mean * TRADING_DAYS_PER_YEAR * 100.0
        };

        let volatility_pct = sample_stddev(&returns) * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;
        let sharpe_ratio = if volatility_pct > 0.0 {
            annual_return_pct / volatility_pct
        } else {
            0.0
        };

        PerformanceStats {
            initial_capital,
            final_capital,
            total_return_pct,
            annual_return_pct,
            volatility_pct,
            sharpe_ratio,
            max_drawdown_pct: compute_drawdown(&result.equity_curve),
            trade_count: result.trades.len(),
        }
    }
}

fn daily_returns(equity_curve: &[EquityPoint]) -> Vec<f64> {
    equity_curve
        .windows(2)
        .map(|w| {
            let prev = w[0].equity;
            if prev > 0.0 { w[1].equity / prev - 1.0 } else { 0.0 }
        })
        .collect()
}

/// Sample standard deviation (n - 1 denominator); 0 for fewer than two points.
fn sample_stddev(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 2 {
        return 0.0;
    }
    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    variance.sqrt()
}

/// Deepest peak-to-trough loss as a non-positive percentage.
fn compute_drawdown(equity_curve: &[EquityPoint]) -> f64 {
    let mut peak = f64::MIN;
    let mut max_dd = 0.0_f64;

    for point in equity_curve {
        if point.equity > peak {
            peak = point.equity;
        }
        if peak > 0.0 {
            let dd = (point.equity / peak - 1.0) * 100.0;
            if dd < max_dd {
                max_dd = dd;
            }
        }
    }

    max_dd
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn make_equity_curve(values: &[f64]) -> Vec<EquityPoint> {
        values
            .iter()
            .enumerate()
            .map(|(i, &v)| EquityPoint {
                date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + chrono::Days::new(i as u64),
                equity: v,
            })
            .collect()
    }

    fn make_result(initial: f64, equity: &[f64]) -> BacktestResult {
        BacktestResult {
            initial_cash: initial,
            final_cash: equity.last().copied().unwrap_or(initial),
            final_position: 0,
            trades: Vec::new(),
            equity_curve: make_equity_curve(equity),
        }
    }

    #[test]
    fn total_return_both_directions() {
        let stats = PerformanceStats::compute(&make_result(100_000.0, &[100_000.0, 110_000.0]));
        assert_relative_eq!(stats.total_return_pct, 10.0, epsilon = 1e-9);

        let stats = PerformanceStats::compute(&make_result(100_000.0, &[100_000.0, 90_000.0]));
        assert_relative_eq!(stats.total_return_pct, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_initial_capital_reports_zero_return() {
        let stats = PerformanceStats::compute(&make_result(0.0, &[0.0, 0.0]));
        assert!((stats.total_return_pct - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn empty_curve_is_all_zeros() {
        let stats = PerformanceStats::compute(&make_result(100_000.0, &[]));
        assert!((stats.final_capital - 100_000.0).abs() < f64::EPSILON);
        assert!((stats.total_return_pct - 0.0).abs() < f64::EPSILON);
        assert!((stats.annual_return_pct - 0.0).abs() < f64::EPSILON);
        assert!((stats.volatility_pct - 0.0).abs() < f64::EPSILON);
        assert!((stats.sharpe_ratio - 0.0).abs() < f64::EPSILON);
        assert!((stats.max_drawdown_pct - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn flat_curve_has_zero_volatility_and_sharpe() {
        let stats = PerformanceStats::compute(&make_result(100.0, &[100.0, 100.0, 100.0, 100.0]));
        assert!((stats.volatility_pct - 0.0).abs() < f64::EPSILON);
        assert!((stats.sharpe_ratio - 0.0).abs() < f64::EPSILON);
        assert!((stats.max_drawdown_pct - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn constant_growth_has_zero_volatility() {
        // 1% every day: returns are identical, so the sample deviation is 0
        // and sharpe falls back to 0 no matter how large the return
        let stats = PerformanceStats::compute(&make_result(100.0, &[100.0, 101.0, 102.01]));
        assert_relative_eq!(stats.annual_return_pct, 252.0, epsilon = 1e-9);
        assert!(stats.volatility_pct.abs() < 1e-9);
        assert!((stats.sharpe_ratio - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn symmetric_swing_annualizes_to_zero_mean() {
        // +10% then -10%: mean daily return is zero, deviation is not
        let stats = PerformanceStats::compute(&make_result(100.0, &[100.0, 110.0, 99.0]));
        assert_relative_eq!(stats.annual_return_pct, 0.0, epsilon = 1e-9);

        // stdev_sample([0.1, -0.1]) = sqrt(0.02)
        let expected_vol = 0.02_f64.sqrt() * TRADING_DAYS_PER_YEAR.sqrt() * 100.0;
        assert_relative_eq!(stats.volatility_pct, expected_vol, epsilon = 1e-9);
        assert!(stats.sharpe_ratio.abs() < 1e-9);
    }

    #[test]
    fn drawdown_tracks_running_peak() {
        let stats = PerformanceStats::compute(&make_result(
            100.0,
            &[100.0, 110.0, 90.0, 95.0, 80.0, 100.0],
        ));
        // deepest trough is 80 against the 110 peak
        assert_relative_eq!(stats.max_drawdown_pct, (80.0 / 110.0 - 1.0) * 100.0, epsilon = 1e-9);
    }

    #[test]
    fn drawdown_is_zero_for_monotone_rise() {
        let stats = PerformanceStats::compute(&make_result(100.0, &[100.0, 105.0, 112.0]));
        assert!((stats.max_drawdown_pct - 0.0).abs() < f64::EPSILON);
    }

    #[test]
    fn return_after_zero_equity_is_skipped() {
        let returns = daily_returns(&make_equity_curve(&[0.0, 10.0, 11.0]));
        assert!((returns[0] - 0.0).abs() < f64::EPSILON);
        assert_relative_eq!(returns[1], 0.1, epsilon = 1e-9);
    }

    #[test]
    fn stddev_needs_two_points() {
        assert!((sample_stddev(&[]) - 0.0).abs() < f64::EPSILON);
        assert!((sample_stddev(&[0.5]) - 0.0).abs() < f64::EPSILON);
        assert_relative_eq!(sample_stddev(&[1.0, 3.0]), 2.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn trade_count_comes_from_the_result() {
        use crate::domain::simulator::{Trade, TradeSide};
        let mut result = make_result(100.0, &[100.0, 105.0]);
        result.trades.push(Trade {
            date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            side: TradeSide::Buy,
            price: 10.0,
            shares: 10,
            value: 100.0,
        });
        let stats = PerformanceStats::compute(&result);
        assert_eq!(stats.trade_count, 1);
    }
}
