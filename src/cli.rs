//! CLI definition and dispatch.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::config_validation::validate_config;
use crate::domain::error::StratsimError;
use crate::domain::indicator::rsi::DEFAULT_PERIOD;
use crate::domain::metrics::PerformanceStats;
use crate::domain::simulator::{self, DEFAULT_INITIAL_CASH};
use crate::domain::strategy::{
    DEFAULT_LONG_WINDOW, DEFAULT_OVERBOUGHT, DEFAULT_OVERSOLD, DEFAULT_SHORT_WINDOW, StrategySpec,
};
use crate::ports::config_port::ConfigPort;
use crate::ports::data_port::DataPort;
use crate::ports::report_port::{BacktestReport, ReportPort};

#[derive(Parser, Debug)]
#[command(name = "stratsim", about = "Indicator and backtest simulation engine")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a backtest
    Backtest {
        #[arg(short, long)]
        config: PathBuf,
        /// Symbol to trade, overriding [data] symbol
        #[arg(long)]
        symbol: Option<String>,
        /// Directory for the report files
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Validate and show the plan without touching price data
        #[arg(long)]
        dry_run: bool,
    },
    /// Check a config file without running anything
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List symbols available in the data directory
    ListSymbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Show the stored date range for symbols
    Info {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        symbol: Option<String>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Backtest {
            config,
            symbol,
            output,
            dry_run,
        } => {
            if dry_run {
                run_dry_run(&config, symbol.as_deref())
            } else {
                run_backtest(&config, symbol.as_deref(), output.as_ref())
            }
        }
        Command::Validate { config } => run_validate(&config),
        Command::ListSymbols { config } => run_list_symbols(&config),
        Command::Info { config, symbol } => run_info(&config, symbol.as_deref()),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn run_backtest(
    config_path: &PathBuf,
    symbol_override: Option<&str>,
    output_override: Option<&PathBuf>,
) -> ExitCode {
    // Stage 1: Load config
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    // Stage 2: Validate everything up front
    if let Err(e) = validate_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    // Stage 3: Resolve strategy, symbol and range
    let strategy = match build_strategy(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let symbol = match resolve_symbol(symbol_override, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let (start, end) = match build_date_range(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 4: Load price data
    let data_port = match CsvDataAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let series = match data_port.fetch_series(&symbol, start, end) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    eprintln!(
        "Loaded {} candles for {} ({} to {})",
        series.len(),
        symbol,
        series.start_date(),
        series.end_date()
    );

    // Stage 5: Generate signals
    eprintln!("Running strategy: {strategy}");
    let signals = match strategy.generate(&series) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 6: Replay the trigger column
    let initial_cash = config.get_double("backtest", "initial_cash", DEFAULT_INITIAL_CASH);
    let result = match simulator::run_backtest(&signals, initial_cash) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    // Stage 7: Stats and console summary
    let stats = PerformanceStats::compute(&result);
    print_summary(&symbol, &strategy, &stats);

    // Stage 8: Write report files
    let output_dir = output_override.cloned().unwrap_or_else(|| {
        PathBuf::from(
            config
                .get_string("report", "output_dir")
                .unwrap_or_else(|| "report".to_string()),
        )
    });
    let report = BacktestReport {
        symbol: &symbol,
        strategy: &strategy,
        stats: &stats,
        result: &result,
    };
    match CsvReportAdapter::new(&output_dir).write(&report) {
        Ok(()) => {
            eprintln!("\nReport written to: {}", output_dir.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: failed to write report: {e}");
            (&e).into()
        }
    }
}

fn print_summary(symbol: &str, strategy: &StrategySpec, stats: &PerformanceStats) {
    eprintln!("\n=== Backtest Summary ===");
    eprintln!("Symbol:           {symbol}");
    eprintln!("Strategy:         {strategy}");
    eprintln!("Initial Capital:  {:.2}", stats.initial_capital);
    eprintln!("Final Capital:    {:.2}", stats.final_capital);
    eprintln!("Total Return:     {:.2}%", stats.total_return_pct);
    eprintln!("Annual Return:    {:.2}%", stats.annual_return_pct);
    eprintln!("Volatility:       {:.2}%", stats.volatility_pct);
    eprintln!("Sharpe Ratio:     {:.2}", stats.sharpe_ratio);
    eprintln!("Max Drawdown:     {:.2}%", stats.max_drawdown_pct);
    eprintln!("Trades:           {}", stats.trade_count);
}

pub fn build_strategy(config: &dyn ConfigPort) -> Result<StrategySpec, StratsimError> {
    let kind = config
        .get_string("strategy", "kind")
        .unwrap_or_else(|| "ma-cross".to_string());

    match kind.as_str() {
        "ma-cross" => Ok(StrategySpec::MaCross {
            short: config.get_int("strategy", "short_window", DEFAULT_SHORT_WINDOW as i64) as usize,
            long: config.get_int("strategy", "long_window", DEFAULT_LONG_WINDOW as i64) as usize,
        }),
        "macd-cross" => Ok(StrategySpec::MacdCross),
        "rsi" => Ok(StrategySpec::RsiThreshold {
            period: config.get_int("strategy", "rsi_period", DEFAULT_PERIOD as i64) as usize,
            oversold: config.get_double("strategy", "oversold", DEFAULT_OVERSOLD),
            overbought: config.get_double("strategy", "overbought", DEFAULT_OVERBOUGHT),
        }),
        other => Err(StratsimError::ConfigInvalid {
            section: "strategy".into(),
            key: "kind".into(),
            reason: format!("unknown strategy kind {other:?}, expected ma-cross, macd-cross or rsi"),
        }),
    }
}

pub fn resolve_symbol(
    symbol_override: Option<&str>,
    config: &dyn ConfigPort,
) -> Result<String, StratsimError> {
    if let Some(s) = symbol_override {
        let s = s.trim();
        if !s.is_empty() {
            return Ok(s.to_string());
        }
    }

    match config.get_string("data", "symbol") {
        Some(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        _ => Err(StratsimError::ConfigMissing {
            section: "data".into(),
            key: "symbol".into(),
        }),
    }
}

pub fn build_date_range(
    config: &dyn ConfigPort,
) -> Result<(Option<NaiveDate>, Option<NaiveDate>), StratsimError> {
    let start = parse_date_key(config, "start_date")?;
    let end = parse_date_key(config, "end_date")?;
    Ok((start, end))
}

fn parse_date_key(
    config: &dyn ConfigPort,
    key: &str,
) -> Result<Option<NaiveDate>, StratsimError> {
    match config.get_string("data", key) {
        None => Ok(None),
        Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map(Some).map_err(|_| {
            StratsimError::ConfigInvalid {
                section: "data".into(),
                key: key.into(),
                reason: "invalid date format (expected YYYY-MM-DD)".into(),
            }
        }),
    }
}

fn run_dry_run(config_path: &PathBuf, symbol_override: Option<&str>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }
    eprintln!("Config validated successfully");

    let strategy = match build_strategy(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let symbol = match resolve_symbol(symbol_override, &config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };
    let (start, end) = match build_date_range(&config) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nPlanned run:");
    eprintln!("  symbol:       {symbol}");
    eprintln!("  strategy:     {strategy}");
    match (start, end) {
        (Some(s), Some(e)) => eprintln!("  period:       {s} to {e}"),
        (Some(s), None) => eprintln!("  period:       from {s}"),
        (None, Some(e)) => eprintln!("  period:       until {e}"),
        (None, None) => eprintln!("  period:       full history"),
    }
    eprintln!(
        "  initial cash: {:.2}",
        config.get_double("backtest", "initial_cash", DEFAULT_INITIAL_CASH)
    );

    eprintln!("\nDry run complete: configuration is valid");
    ExitCode::SUCCESS
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    if let Err(e) = validate_config(&config) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let strategy = match build_strategy(&config) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    eprintln!("\nStrategy:     {strategy}");
    match resolve_symbol(None, &config) {
        Ok(symbol) => eprintln!("Symbol:       {symbol}"),
        Err(_) => eprintln!("Symbol:       (not set, pass --symbol to backtest)"),
    }
    eprintln!(
        "Initial cash: {:.2}",
        config.get_double("backtest", "initial_cash", DEFAULT_INITIAL_CASH)
    );

    eprintln!("\nConfiguration is valid.");
    ExitCode::SUCCESS
}

fn run_list_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = match CsvDataAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match adapter.list_symbols() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    if symbols.is_empty() {
        eprintln!("No symbols found");
    } else {
        for symbol in &symbols {
            println!("{symbol}");
        }
        eprintln!("{} symbols found", symbols.len());
    }
    ExitCode::SUCCESS
}

fn run_info(config_path: &PathBuf, symbol: Option<&str>) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let adapter = match CsvDataAdapter::from_config(&config) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("error: {e}");
            return (&e).into();
        }
    };

    let symbols = match symbol {
        Some(s) => vec![s.to_string()],
        None => match resolve_symbol(None, &config) {
            Ok(s) => vec![s],
            // nothing configured: report every file in the data directory
            Err(_) => match adapter.list_symbols() {
                Ok(all) => all,
                Err(e) => {
                    eprintln!("error: {e}");
                    return (&e).into();
                }
            },
        },
    };

    for s in &symbols {
        match adapter.data_range(s) {
            Ok(Some((first, last, count))) => {
                println!("{s}: {count} rows, {first} to {last}");
            }
            Ok(None) => eprintln!("{s}: no data found"),
            Err(e) => eprintln!("error querying {s}: {e}"),
        }
    }
    ExitCode::SUCCESS
}
