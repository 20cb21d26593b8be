//! RSI (Relative Strength Index) indicator.
//!
//! Average gain/loss are trailing simple rolling means of the day-over-day
//! close deltas (not Wilder smoothing):
//!   RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//! The zero-loss window is handled explicitly:
//!   avg_loss = 0, avg_gain > 0  ->  RSI = 100
//!   avg_loss = 0, avg_gain = 0  ->  RSI = 50   (flat window)
//!
//! The first delta does not exist, so rows 0..period are NaN and the first
//! defined RSI sits at index `period`.

use crate::domain::error::StratsimError;
use crate::domain::indicator::ma::rolling_mean;
use crate::domain::indicator::{IndicatorColumn, IndicatorFrame};
use crate::domain::series::PriceSeries;

pub const DEFAULT_PERIOD: usize = 14;

/// Compute one RSI column over the close prices.
pub fn calculate_rsi(series: &PriceSeries, period: usize) -> Result<IndicatorFrame, StratsimError> {
    if period == 0 {
        return Err(StratsimError::InvalidParameter {
            param: "rsi_period".into(),
            reason: "RSI period must be positive".into(),
        });
    }

    let closes = series.closes();
    let mut frame = IndicatorFrame::new(series.clone());
    frame.insert(IndicatorColumn::Rsi(period), rsi_values(&closes, period));
    Ok(frame)
}

/// RSI values with NaN warmup; `period` must be positive.
pub(crate) fn rsi_values(closes: &[f64], period: usize) -> Vec<f64> {
    let n = closes.len();
    let mut gains = Vec::with_capacity(n.saturating_sub(1));
    let mut losses = Vec::with_capacity(n.saturating_sub(1));
    for pair in closes.windows(2) {
        let change = pair[1] - pair[0];
        gains.push(if change > 0.0 { change } else { 0.0 });
        losses.push(if change < 0.0 { -change } else { 0.0 });
    }

    let avg_gain = rolling_mean(&gains, period);
    let avg_loss = rolling_mean(&losses, period);

    // delta j belongs to close j+1, shifting the whole column right by one
    let mut rsi = vec![f64::NAN; n];
    for j in 0..gains.len() {
        let (gain, loss) = (avg_gain[j], avg_loss[j]);
        if gain.is_nan() || loss.is_nan() {
            continue;
        }
        rsi[j + 1] = if loss == 0.0 {
            if gain == 0.0 { 50.0 } else { 100.0 }
        } else {
            100.0 - 100.0 / (1.0 + gain / loss)
        };
    }
    rsi
}
