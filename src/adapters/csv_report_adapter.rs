//! CSV report adapter implementing ReportPort.
//!
//! Writes three files into the output directory: `equity.csv` (one row per
//! day), `trades.csv` (one row per fill) and `summary.txt` (the headline
//! stats as plain text). Existing files are overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::error::StratsimError;
use crate::ports::report_port::{BacktestReport, ReportPort};

pub struct CsvReportAdapter {
    output_dir: PathBuf,
}

impl CsvReportAdapter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<(), StratsimError> {
        let mut wtr = csv::Writer::from_path(path).map_err(csv_error)?;
        for row in rows {
            wtr.serialize(row).map_err(csv_error)?;
        }
        wtr.flush()?;
        Ok(())
    }

    fn render_summary(report: &BacktestReport<'_>) -> String {
        let stats = report.stats;
        let curve = &report.result.equity_curve;
        let period = match (curve.first(), curve.last()) {
            (Some(first), Some(last)) => {
                format!("{} .. {} ({} days)", first.date, last.date, curve.len())
            }
            _ => "(empty)".to_string(),
        };

        format!(
            "symbol:          {symbol}\n\
             strategy:        {strategy}\n\
             period:          {period}\n\
             initial capital: {initial:.2}\n\
             final capital:   {final_capital:.2}\n\
             total return:    {total:.2}%\n\
             annual return:   {annual:.2}%\n\
             volatility:      {vol:.2}%\n\
             sharpe ratio:    {sharpe:.2}\n\
             max drawdown:    {drawdown:.2}%\n\
             trades:          {trades}\n",
            symbol = report.symbol,
            strategy = report.strategy,
            period = period,
            initial = stats.initial_capital,
            final_capital = stats.final_capital,
            total = stats.total_return_pct,
            annual = stats.annual_return_pct,
            vol = stats.volatility_pct,
            sharpe = stats.sharpe_ratio,
            drawdown = stats.max_drawdown_pct,
            trades = stats.trade_count,
        )
    }
}

fn csv_error(e: csv::Error) -> StratsimError {
    StratsimError::Io(std::io::Error::other(e))
}

impl ReportPort for CsvReportAdapter {
    fn write(&self, report: &BacktestReport<'_>) -> Result<(), StratsimError> {
        fs::create_dir_all(&self.output_dir)?;

        Self::write_csv(
            &self.output_dir.join("equity.csv"),
            &report.result.equity_curve,
        )?;
        Self::write_csv(&self.output_dir.join("trades.csv"), &report.result.trades)?;
        fs::write(
            self.output_dir.join("summary.txt"),
            Self::render_summary(report),
        )?;

        Ok(())
    }
}
