//! Report output port trait.

use crate::domain::error::StratsimError;
use crate::domain::metrics::PerformanceStats;
use crate::domain::simulator::BacktestResult;
use crate::domain::strategy::StrategySpec;

/// Everything a report sink needs about one finished run.
#[derive(Debug)]
pub struct BacktestReport<'a> {
    pub symbol: &'a str,
    pub strategy: &'a StrategySpec,
    pub stats: &'a PerformanceStats,
    pub result: &'a BacktestResult,
}

pub trait ReportPort {
    fn write(&self, report: &BacktestReport<'_>) -> Result<(), StratsimError>;
}
