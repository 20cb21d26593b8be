//! Domain error types.

use chrono::NaiveDate;

/// Top-level error type for stratsim.
#[derive(Debug, thiserror::Error)]
pub enum StratsimError {
    #[error("invalid parameter {param}: {reason}")]
    InvalidParameter { param: String, reason: String },

    #[error("insufficient data for {symbol}: have {have} candles, need {need}")]
    InsufficientData {
        symbol: String,
        have: usize,
        need: usize,
    },

    #[error("invalid series for {symbol}: {reason}")]
    InvalidSeries { symbol: String, reason: String },

    #[error("missing signal column: {reason}")]
    MissingSignal { reason: String },

    #[error("invalid price {value} on {date}: close must be positive and finite on a trade day")]
    InvalidPrice { date: NaiveDate, value: f64 },

    #[error("data error: {reason}")]
    Data { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&StratsimError> for std::process::ExitCode {
    fn from(err: &StratsimError) -> Self {
        let code: u8 = match err {
            StratsimError::Io(_) => 1,
            StratsimError::ConfigParse { .. }
            | StratsimError::ConfigMissing { .. }
            | StratsimError::ConfigInvalid { .. } => 2,
            StratsimError::Data { .. } | StratsimError::InvalidSeries { .. } => 3,
            StratsimError::InvalidParameter { .. } => 4,
            StratsimError::InsufficientData { .. } => 5,
            StratsimError::MissingSignal { .. } | StratsimError::InvalidPrice { .. } => 6,
        };
        std::process::ExitCode::from(code)
    }
}
