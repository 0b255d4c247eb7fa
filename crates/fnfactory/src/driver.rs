//! Decode-then-evaluate driver.

use std::io::{BufRead, Read};

use serde::Serialize;
use tracing::info;

use crate::config::StreamFormat;
use crate::decoder::decode_all;
use crate::port::{BinaryReader, ReadPort, TextReader};
use crate::registry::{FactoryError, VariantRegistry};
use crate::variant::{Evaluable, Tag, Variant};

/// Evaluates every variant at `x`, in order.
pub fn evaluate_all(variants: &[Variant], x: f64) -> Vec<f64> {
    variants.iter().map(|v| v.evaluate(x)).collect()
}

/// One variant evaluated at one point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Evaluation {
    /// Position of the record in the stream.
    pub index: usize,
    pub tag: Tag,
    pub x: f64,
    pub value: f64,
}

/// Result of [`run`]: an evaluation per decoded record, plus the failure
/// that stopped decoding early, if any.
#[derive(Debug)]
pub struct Report {
    pub evaluations: Vec<Evaluation>,
    pub failure: Option<FactoryError>,
}

impl Report {
    pub fn values(&self) -> Vec<f64> {
        self.evaluations.iter().map(|e| e.value).collect()
    }

    /// `true` when the whole stream decoded.
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Decodes `port` to exhaustion or failure, then evaluates what was decoded.
pub fn run<R: ReadPort>(registry: &VariantRegistry, port: R, x: f64) -> Report {
    let (variants, failure) = match decode_all(registry, port) {
        Ok(variants) => (variants, None),
        Err(err) => {
            let (variants, error) = err.into_parts();
            (variants, Some(error))
        }
    };
    let evaluations = variants
        .iter()
        .enumerate()
        .map(|(index, variant)| Evaluation {
            index,
            tag: variant.tag(),
            x,
            value: variant.evaluate(x),
        })
        .collect::<Vec<_>>();
    info!(
        records = evaluations.len(),
        complete = failure.is_none(),
        x,
        "evaluated record stream"
    );
    Report {
        evaluations,
        failure,
    }
}

/// Hands `f` a reader port over `input` in the given format.
///
/// Binary input is read into memory first; text input is tokenized as it is
/// read. The port does not outlive the call.
pub fn with_port<B, T>(
    format: StreamFormat,
    mut input: B,
    f: impl FnOnce(&mut dyn ReadPort) -> T,
) -> std::io::Result<T>
where
    B: BufRead,
{
    match format {
        StreamFormat::Text => Ok(f(&mut TextReader::new(input))),
        StreamFormat::Binary => {
            let mut data = Vec::new();
            input.read_to_end(&mut data)?;
            Ok(f(&mut BinaryReader::new(&data)))
        }
    }
}
