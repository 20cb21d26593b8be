//! Configuration validation.
//!
//! Checks every config field a run depends on before any data is read.
//! Fields that are absent fall back to the documented defaults.

use crate::domain::error::StratsimError;
use crate::domain::indicator::rsi::DEFAULT_PERIOD;
use crate::domain::simulator::DEFAULT_INITIAL_CASH;
use crate::domain::strategy::{
    DEFAULT_LONG_WINDOW, DEFAULT_OVERBOUGHT, DEFAULT_OVERSOLD, DEFAULT_SHORT_WINDOW,
};
use crate::ports::config_port::ConfigPort;
use chrono::NaiveDate;

pub fn validate_config(config: &dyn ConfigPort) -> Result<(), StratsimError> {
    validate_data_config(config)?;
    validate_strategy_config(config)?;
    validate_backtest_config(config)?;
    Ok(())
}

pub fn validate_data_config(config: &dyn ConfigPort) -> Result<(), StratsimError> {
    match config.get_string("data", "prices_dir") {
        Some(s) if !s.trim().is_empty() => {}
        _ => {
            return Err(StratsimError::ConfigMissing {
                section: "data".to_string(),
                key: "prices_dir".to_string(),
            });
        }
    }
    validate_date_range(config)?;
    Ok(())
}

pub fn validate_strategy_config(config: &dyn ConfigPort) -> Result<(), StratsimError> {
    let kind = config
        .get_string("strategy", "kind")
        .unwrap_or_else(|| "ma-cross".to_string());

    match kind.as_str() {
        "ma-cross" => validate_ma_windows(config),
        "macd-cross" => Ok(()),
        "rsi" => validate_rsi_params(config),
        other => Err(StratsimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "kind".to_string(),
            reason: format!("unknown strategy kind {other:?}, expected ma-cross, macd-cross or rsi"),
        }),
    }
}

pub fn validate_backtest_config(config: &dyn ConfigPort) -> Result<(), StratsimError> {
    let value = config.get_double("backtest", "initial_cash", DEFAULT_INITIAL_CASH);
    if !value.is_finite() || value < 0.0 {
        return Err(StratsimError::ConfigInvalid {
            section: "backtest".to_string(),
            key: "initial_cash".to_string(),
            reason: "initial_cash must be non-negative and finite".to_string(),
        });
    }
    Ok(())
}

fn validate_ma_windows(config: &dyn ConfigPort) -> Result<(), StratsimError> {
    let short = config.get_int("strategy", "short_window", DEFAULT_SHORT_WINDOW as i64);
    let long = config.get_int("strategy", "long_window", DEFAULT_LONG_WINDOW as i64);

    if short < 1 {
        return Err(StratsimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: "short_window must be at least 1".to_string(),
        });
    }
    if long < 1 {
        return Err(StratsimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "long_window".to_string(),
            reason: "long_window must be at least 1".to_string(),
        });
    }
    if short >= long {
        return Err(StratsimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "short_window".to_string(),
            reason: format!("short_window ({short}) must be less than long_window ({long})"),
        });
    }
    Ok(())
}

fn validate_rsi_params(config: &dyn ConfigPort) -> Result<(), StratsimError> {
    let period = config.get_int("strategy", "rsi_period", DEFAULT_PERIOD as i64);
    if period < 1 {
        return Err(StratsimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "rsi_period".to_string(),
            reason: "rsi_period must be at least 1".to_string(),
        });
    }

    let oversold = config.get_double("strategy", "oversold", DEFAULT_OVERSOLD);
    let overbought = config.get_double("strategy", "overbought", DEFAULT_OVERBOUGHT);
    if !oversold.is_finite() || !overbought.is_finite() || oversold >= overbought {
        return Err(StratsimError::ConfigInvalid {
            section: "strategy".to_string(),
            key: "oversold".to_string(),
            reason: format!("oversold ({oversold}) must be less than overbought ({overbought})"),
        });
    }
    Ok(())
}

fn validate_date_range(config: &dyn ConfigPort) -> Result<(), StratsimError> {
    let start = parse_date(config.get_string("data", "start_date").as_deref(), "start_date")?;
    let end = parse_date(config.get_string("data", "end_date").as_deref(), "end_date")?;

    if let (Some(start), Some(end)) = (start, end) {
        if start > end {
            return Err(StratsimError::ConfigInvalid {
                section: "data".to_string(),
                key: "start_date".to_string(),
                reason: format!("start_date {start} is after end_date {end}"),
            });
        }
    }
    Ok(())
}

/// Both bounds are optional; when present they must be YYYY-MM-DD.
fn parse_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, StratsimError> {
    match value {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| StratsimError::ConfigInvalid {
                section: "data".to_string(),
                key: field.to_string(),
                reason: format!("invalid {field} format, expected YYYY-MM-DD"),
            }),
    }
}
