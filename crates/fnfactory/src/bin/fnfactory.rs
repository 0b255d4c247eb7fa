//! `fnfactory` command line driver.
//!
//! Reads a record stream from a file or stdin, then either evaluates every
//! record at one point or re-encodes the stream in another format.

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use fnfactory::command;
use fnfactory::logging::init_tracing;
use fnfactory::{ConvertOptions, DriverConfig, EvalOptions, StreamFormat, VariantRegistry};
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "fnfactory")]
#[command(about = "Decode tagged records and evaluate them")]
struct Cli {
    /// TOML configuration file
    #[arg(short, long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evaluate every record at one point, one value per line
    Eval {
        /// Record stream; stdin when omitted
        input: Option<PathBuf>,

        /// Evaluation point
        #[arg(short, long, allow_negative_numbers = true)]
        point: Option<f64>,

        /// Input encoding
        #[arg(short, long, value_enum)]
        format: Option<StreamFormat>,

        /// Print a JSON report instead
        #[arg(long)]
        json: bool,
    },
    /// Re-encode a record stream
    Convert {
        /// Record stream; stdin when omitted
        input: Option<PathBuf>,

        /// Input encoding
        #[arg(short, long, value_enum)]
        format: Option<StreamFormat>,

        /// Output encoding
        #[arg(long, value_enum)]
        to: StreamFormat,

        /// Output file; stdout when omitted
        #[arg(short, long, value_name = "PATH")]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => DriverConfig::load(path)?,
        None => DriverConfig::default(),
    };
    init_tracing(&config.log, cli.verbose)
        .map_err(|err| anyhow!("failed to install tracing subscriber: {err}"))?;
    debug!(?config, "configuration loaded");

    let registry = VariantRegistry::with_builtins();

    let outcome = match cli.command {
        Command::Eval {
            input,
            point,
            format,
            json,
        } => {
            let options = EvalOptions {
                point,
                format,
                json,
            };
            let source = open_input(input.as_deref())?;
            command::eval(&registry, &config, &options, source, io::stdout().lock())
                .context("eval failed")?
        }
        Command::Convert {
            input,
            format,
            to,
            output,
        } => {
            let options = ConvertOptions { format, to };
            let source = open_input(input.as_deref())?;
            match &output {
                // Decode fully before touching the output, which may be the input.
                Some(path) => {
                    let mut bytes = Vec::new();
                    let outcome = command::convert(&registry, &config, &options, source, &mut bytes)
                        .context("convert failed")?;
                    std::fs::write(path, &bytes)
                        .with_context(|| format!("failed to write {}", path.display()))?;
                    outcome
                }
                None => command::convert(&registry, &config, &options, source, io::stdout().lock())
                    .context("convert failed")?,
            }
        }
    };

    if let Some(err) = &outcome.failure {
        eprintln!("fnfactory: {err}");
    }
    Ok(outcome.exit_code())
}

fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) => {
            let file =
                File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        }
        None => Ok(Box::new(io::stdin().lock())),
    }
}
