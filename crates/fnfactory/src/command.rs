//! The `eval` and `convert` commands, over any input and output stream.
//!
//! Command-line flags left unset fall back to the [`DriverConfig`].

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use tracing::info;

use crate::config::{DriverConfig, StreamFormat};
use crate::decoder::decode_all;
use crate::driver::{run, with_port, Report};
use crate::encode::{encode_all, BinaryWriter, TextWriter};
use crate::registry::{FactoryError, VariantRegistry};
use crate::variant::Variant;

/// Flags of `fnfactory eval`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct EvalOptions {
    pub point: Option<f64>,
    pub format: Option<StreamFormat>,
    pub json: bool,
}

impl EvalOptions {
    pub fn point(&self, config: &DriverConfig) -> f64 {
        self.point.unwrap_or(config.point)
    }

    pub fn format(&self, config: &DriverConfig) -> StreamFormat {
        self.format.unwrap_or(config.format)
    }
}

/// Flags of `fnfactory convert`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConvertOptions {
    pub format: Option<StreamFormat>,
    pub to: StreamFormat,
}

impl ConvertOptions {
    pub fn format(&self, config: &DriverConfig) -> StreamFormat {
        self.format.unwrap_or(config.format)
    }
}

/// How a command ended, once its output has been written.
#[derive(Debug)]
pub struct Outcome {
    /// Records written to the output.
    pub records: usize,
    pub failure: Option<FactoryError>,
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        self.failure.is_none()
    }

    pub fn exit_code(&self) -> ExitCode {
        if self.is_success() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        }
    }
}

/// Evaluates every record of `input` and writes one value per line, or a
/// JSON report. Values decoded before a failure are written either way.
pub fn eval<B, W>(
    registry: &VariantRegistry,
    config: &DriverConfig,
    options: &EvalOptions,
    input: B,
    mut out: W,
) -> io::Result<Outcome>
where
    B: BufRead,
    W: Write,
{
    let x = options.point(config);
    let report = with_port(options.format(config), input, |port| run(registry, port, x))?;
    if options.json {
        write_json_report(&report, &mut out)?;
    } else {
        for evaluation in &report.evaluations {
            writeln!(out, "{}", evaluation.value)?;
        }
    }
    out.flush()?;
    Ok(Outcome {
        records: report.evaluations.len(),
        failure: report.failure,
    })
}

fn write_json_report<W: Write>(report: &Report, mut out: W) -> io::Result<()> {
    let doc = serde_json::json!({
        "evaluations": report.evaluations,
        "failure": report.failure.as_ref().map(ToString::to_string),
    });
    serde_json::to_writer_pretty(&mut out, &doc)?;
    writeln!(out)
}

/// Re-encodes `input` as `options.to`. A failure stops decoding; the records
/// before it are still written.
pub fn convert<B, W>(
    registry: &VariantRegistry,
    config: &DriverConfig,
    options: &ConvertOptions,
    input: B,
    mut out: W,
) -> io::Result<Outcome>
where
    B: BufRead,
    W: Write,
{
    let decoded = with_port(options.format(config), input, |port| {
        decode_all(registry, port)
    })?;
    let (variants, failure) = match decoded {
        Ok(variants) => (variants, None),
        Err(err) => {
            let (variants, error) = err.into_parts();
            (variants, Some(error))
        }
    };
    out.write_all(&encode(&variants, options.to))?;
    out.flush()?;
    info!(records = variants.len(), to = ?options.to, "converted record stream");
    Ok(Outcome {
        records: variants.len(),
        failure,
    })
}

/// Encodes `variants` in the given format.
pub fn encode(variants: &[Variant], to: StreamFormat) -> Vec<u8> {
    match to {
        StreamFormat::Text => {
            let mut out = TextWriter::new();
            encode_all(variants, &mut out);
            out.into_string().into_bytes()
        }
        StreamFormat::Binary => {
            let mut out = BinaryWriter::new();
            encode_all(variants, &mut out);
            out.flush()
        }
    }
}
