//! Record encoding: the write-side mirror of the reader port.

use fnfactory_buffers::Writer;

use crate::variant::{EncodeFields, Variant};

/// Sink for primitive values.
pub trait WritePort {
    fn write_f64(&mut self, value: f64);

    fn write_i32(&mut self, value: i32);

    /// Called after the last field of each record.
    fn end_record(&mut self) {}
}

/// Writes whitespace-separated tokens, one record per line.
#[derive(Debug, Default, Clone)]
pub struct TextWriter {
    out: String,
    line_open: bool,
}

impl TextWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.out
    }

    pub fn into_string(self) -> String {
        self.out
    }

    fn token(&mut self, token: &str) {
        if self.line_open {
            self.out.push(' ');
        }
        self.out.push_str(token);
        self.line_open = true;
    }
}

impl WritePort for TextWriter {
    fn write_f64(&mut self, value: f64) {
        self.token(&format!("{value:?}"));
    }

    fn write_i32(&mut self, value: i32) {
        self.token(&value.to_string());
    }

    fn end_record(&mut self) {
        self.out.push('\n');
        self.line_open = false;
    }
}

/// Writes big-endian values: `i32` as 4 bytes, `f64` as 8.
#[derive(Debug, Default, Clone)]
pub struct BinaryWriter {
    writer: Writer,
}

impl BinaryWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the bytes written since the last flush.
    pub fn flush(&mut self) -> Vec<u8> {
        self.writer.flush()
    }
}

impl WritePort for BinaryWriter {
    fn write_f64(&mut self, value: f64) {
        self.writer.f64(value);
    }

    fn write_i32(&mut self, value: i32) {
        self.writer.i32(value);
    }
}

/// Writes one record: the variant's tag, then its fields.
pub fn encode_record(variant: &Variant, out: &mut dyn WritePort) {
    out.write_i32(variant.tag().wire());
    variant.encode_fields(out);
    out.end_record();
}

/// Writes every variant in order.
pub fn encode_all(variants: &[Variant], out: &mut dyn WritePort) {
    for variant in variants {
        encode_record(variant, out);
    }
}
