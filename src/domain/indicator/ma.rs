//! Simple moving average indicator.
//!
//! MA(p) at row i = mean(close[i-p+1..=i]), O(n) sliding window.
//! Warmup: the first (p-1) rows are NaN. A window longer than the series
//! leaves the whole column NaN.

use crate::domain::error::StratsimError;
use crate::domain::indicator::{IndicatorColumn, IndicatorFrame};
use crate::domain::series::PriceSeries;

/// Compute one MA column per requested window over the close prices.
pub fn calculate_ma(
    series: &PriceSeries,
    windows: &[usize],
) -> Result<IndicatorFrame, StratsimError> {
    for &window in windows {
        if window == 0 {
            return Err(StratsimError::InvalidParameter {
                param: "window".into(),
                reason: "moving average window must be positive".into(),
            });
        }
    }

    let closes = series.closes();
    let mut frame = IndicatorFrame::new(series.clone());
    for &window in windows {
        frame.insert(IndicatorColumn::Ma(window), rolling_mean(&closes, window));
    }
    Ok(frame)
}

/// Trailing simple rolling mean with NaN warmup.
///
/// Input values must be free of NaN; the running sum assumes it.
pub(crate) fn rolling_mean(values: &[f64], window: usize) -> Vec<f64> {
    let mut out = vec![f64::NAN; values.len()];
    if window == 0 || values.len() < window {
        return out;
    }

    let mut sum: f64 = values[..window].iter().sum();
    out[window - 1] = sum / window as f64;
    for i in window..values.len() {
        sum += values[i] - values[i - window];
        out[i] = sum / window as f64;
    }
    out
}
