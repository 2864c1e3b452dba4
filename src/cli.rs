//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_data_adapter::CsvDataAdapter;
use crate::adapters::csv_report_adapter::CsvReportAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::error::EtfscanError;
use crate::domain::evaluation::{run_position_sizing, run_risk_monitor, run_trend_evaluation};
use crate::domain::params::{validate_params, EngineParams};
use crate::ports::config_port::ConfigPort;
use crate::ports::report_port::ReportPort;

#[derive(Parser, Debug)]
#[command(name = "etfscan", about = "ETF indicator and signal evaluation")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Scan for divergence and death-cross warnings on live prices
    Monitor {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        codes: Option<String>,
    },
    /// Rank instruments by trend strength
    Trend {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        codes: Option<String>,
    },
    /// Compute ATR-based position sizes
    Position {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        codes: Option<String>,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

enum Mode {
    Monitor,
    Trend,
    Position,
}

impl Mode {
    fn default_output(&self) -> &'static str {
        match self {
            Mode::Monitor => "etf_risk_monitor.csv",
            Mode::Trend => "etf_trend_evaluation.csv",
            Mode::Position => "etf_position_management.csv",
        }
    }
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Monitor {
            config,
            output,
            codes,
        } => run_mode(Mode::Monitor, &config, output.as_ref(), codes.as_deref()),
        Command::Trend {
            config,
            output,
            codes,
        } => run_mode(Mode::Trend, &config, output.as_ref(), codes.as_deref()),
        Command::Position {
            config,
            output,
            codes,
        } => run_mode(Mode::Position, &config, output.as_ref(), codes.as_deref()),
        Command::Validate { config } => run_validate(&config),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = EtfscanError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn run_mode(
    mode: Mode,
    config_path: &PathBuf,
    output_path: Option<&PathBuf>,
    codes_override: Option<&str>,
) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let params = EngineParams::from_config(&adapter);
    if let Err(e) = validate_params(&params) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let codes = resolve_codes(codes_override, &adapter);
    if codes.is_empty() {
        eprintln!("error: no codes configured");
        return ExitCode::from(2);
    }

    let history_dir = match adapter.get_string("data", "history_dir") {
        Some(d) => PathBuf::from(d),
        None => {
            let err = EtfscanError::ConfigMissing {
                section: "data".into(),
                key: "history_dir".into(),
            };
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let data_port = CsvDataAdapter::new(history_dir);
    let report_port = CsvReportAdapter::new();
    let output = output_path
        .cloned()
        .unwrap_or_else(|| PathBuf::from(mode.default_output()));

    eprintln!("Evaluating {} codes...", codes.len());

    let written = match mode {
        Mode::Monitor => {
            let today = chrono::Local::now().date_naive();
            run_risk_monitor(&data_port, &codes, &params, today)
                .and_then(|records| {
                    report_port.write_risk(&records, &output)?;
                    Ok(records.len())
                })
        }
        Mode::Trend => run_trend_evaluation(&data_port, &codes, &params).and_then(|records| {
            report_port.write_trend(&records, &output)?;
            Ok(records.len())
        }),
        Mode::Position => run_position_sizing(&data_port, &codes, &params).and_then(|records| {
            report_port.write_position(&records, &output)?;
            Ok(records.len())
        }),
    };

    match written {
        Ok(count) => {
            eprintln!("{} of {} codes evaluated", count, codes.len());
            eprintln!("Results written to: {}", output.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            (&e).into()
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    eprintln!("Validating config: {}", config_path.display());
    let adapter = match load_config(config_path) {
        Ok(a) => a,
        Err(code) => return code,
    };

    let params = EngineParams::from_config(&adapter);
    if let Err(e) = validate_params(&params) {
        eprintln!("error: {e}");
        return (&e).into();
    }

    let codes = resolve_codes(None, &adapter);
    if codes.is_empty() {
        eprintln!("error: no codes configured");
        return ExitCode::from(2);
    }

    if adapter.get_string("data", "history_dir").is_none() {
        let err = EtfscanError::ConfigMissing {
            section: "data".into(),
            key: "history_dir".into(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    }

    eprintln!("  codes: {}", codes.join(", "));
    eprintln!(
        "  windows: rsi={} ema={}/{} adx={} atr={} divergence={}",
        params.rsi_window,
        params.ema_short,
        params.ema_long,
        params.adx_window,
        params.atr_window,
        params.divergence_window,
    );
    eprintln!(
        "  position: multiplier={} max_loss={} lot={}",
        params.atr_multiplier, params.max_loss_per_instrument, params.lot_size,
    );
    eprintln!("Configuration is valid.");
    ExitCode::SUCCESS
}

pub fn resolve_codes(codes_override: Option<&str>, config: &dyn ConfigPort) -> Vec<String> {
    let raw = match codes_override {
        Some(c) => c.to_string(),
        None => match config.get_string("evaluation", "codes") {
            Some(c) => c,
            None => return vec![],
        },
    };

    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
