use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use log::LevelFilter;
use serde::Serialize;
use shoulder_isb::convert::isb_oriented_conversion;
use shoulder_isb::dataset::{
    load_rows, validate_dataset, AngleConversion, ConversionError, DatasetConfig, DatasetIoError,
};
use shoulder_isb::{EulerSequence, JointType, RowValidator, ValidatorParams};

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    Io(#[from] DatasetIoError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    #[error("expected angle triples, got {0} values")]
    AngleCount(usize),
}

#[derive(Parser, Debug)]
#[command(
    name = "shoulder-isb",
    version,
    about = "Validate shoulder kinematics datasets against the ISB recommendations"
)]
struct Cli {
    /// Log verbosity (off, error, warn, info, debug, trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: LevelFilter,
    /// Emit JSON log lines through `tracing`.
    #[cfg(feature = "tracing")]
    #[arg(long, global = true)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate every row of a JSON dataset and print the report.
    Validate {
        /// JSON array of rows.
        #[arg(required_unless_present = "config")]
        rows: Option<PathBuf>,
        /// Run configuration (rows path, output path, validator parameters).
        #[arg(long, conflicts_with = "rows")]
        config: Option<PathBuf>,
        /// Write the report here instead of stdout.
        #[arg(long, short)]
        output: Option<PathBuf>,
        /// Log every finding at warn level.
        #[arg(long, short)]
        verbose: bool,
    },
    /// Convert angles of a joint whose frames follow the ISB definition.
    Convert {
        #[arg(long)]
        joint: JointType,
        /// Euler sequence the angles were reported in.
        #[arg(long)]
        sequence: EulerSequence,
        /// Comma-separated angle triples in degrees.
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true, required = true)]
        angles: Vec<f64>,
    },
}

#[derive(Serialize)]
struct ConvertOutput {
    joint: JointType,
    from: EulerSequence,
    to: EulerSequence,
    conversion: AngleConversion,
    angles: Vec<[f64; 3]>,
}

fn init_logging(cli: &Cli) {
    #[cfg(feature = "tracing")]
    {
        let _ = tracing_log::LogTracer::init();
        shoulder_isb::core::init_tracing(cli.log_level, cli.json_logs);
        log::set_max_level(cli.log_level);
    }
    #[cfg(not(feature = "tracing"))]
    {
        let _ = shoulder_isb::core::init_with_level(cli.log_level);
    }
}

fn run_validate(
    rows: Option<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<(), CliError> {
    let (rows_path, output, mut params) = match config {
        Some(path) => {
            let cfg = DatasetConfig::load_json(path)?;
            let out = output.unwrap_or_else(|| cfg.output_path());
            (cfg.rows_path, Some(out), cfg.params)
        }
        None => (rows.unwrap_or_default(), output, ValidatorParams::default()),
    };
    params.verbose |= verbose;

    let records = load_rows(&rows_path)?;
    log::info!("loaded {} rows from {}", records.len(), rows_path.display());
    let report = validate_dataset(&RowValidator::new(params), &records);

    match output {
        Some(path) => {
            report.write_json(&path)?;
            log::info!("wrote report to {}", path.display());
        }
        None => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn run_convert(joint: JointType, sequence: EulerSequence, angles: &[f64]) -> Result<(), CliError> {
    if angles.is_empty() || angles.len() % 3 != 0 {
        return Err(CliError::AngleCount(angles.len()));
    }
    let samples: Vec<[f64; 3]> = angles
        .chunks_exact(3)
        .map(|c| [c[0], c[1], c[2]])
        .collect();
    let conversion = isb_oriented_conversion(joint, sequence)?;
    let output = ConvertOutput {
        joint,
        from: sequence,
        to: joint.isb_euler_sequence(),
        angles: conversion.apply_many(&samples),
        conversion,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli);

    let result = match cli.command {
        Command::Validate {
            rows,
            config,
            output,
            verbose,
        } => run_validate(rows, config, output, verbose),
        Command::Convert {
            joint,
            sequence,
            angles,
        } => run_convert(joint, sequence, &angles),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
