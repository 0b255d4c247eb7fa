//! Record stream decoder.
//!
//! Records carry no length prefix: each is a tag followed by whatever its
//! constructor reads. A record that fails halfway leaves the port at an
//! unknown field boundary, so the first failure ends the stream for good.

use thiserror::Error;
use tracing::{debug, trace, warn};

use crate::port::{ReadError, ReadPort};
use crate::registry::{FactoryError, VariantRegistry};
use crate::variant::{Tag, Variant};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Reading,
    Ended,
    Failed,
}

/// Pulls one record at a time out of a [`ReadPort`].
///
/// As an iterator it yields each decoded variant, then either stops (clean
/// end of input) or yields a single error and stops. It is fused.
///
/// ```
/// use fnfactory::{RecordDecoder, TextReader, VariantRegistry};
///
/// let registry = VariantRegistry::with_builtins();
/// let mut decoder = RecordDecoder::new(&registry, TextReader::new("2 2".as_bytes()));
/// assert!(decoder.next().unwrap().is_ok());
/// assert!(decoder.next().unwrap().is_ok());
/// assert!(decoder.next().is_none());
/// assert!(decoder.is_finished());
/// ```
#[derive(Debug)]
pub struct RecordDecoder<'r, R> {
    registry: &'r VariantRegistry,
    port: R,
    state: State,
    records: usize,
}

impl<'r, R: ReadPort> RecordDecoder<'r, R> {
    pub fn new(registry: &'r VariantRegistry, port: R) -> Self {
        Self {
            registry,
            port,
            state: State::Reading,
            records: 0,
        }
    }

    /// Records decoded so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// `true` once the stream ended or failed.
    pub fn is_finished(&self) -> bool {
        self.state != State::Reading
    }

    pub fn into_port(self) -> R {
        self.port
    }

    /// Decodes the next record; `None` after the end of input or a failure.
    pub fn next_record(&mut self) -> Option<Result<Variant, FactoryError>> {
        if self.state != State::Reading {
            return None;
        }
        let tag = match self.port.read_i32() {
            Ok(raw) => match Tag::try_from(raw) {
                Ok(tag) => tag,
                Err(err) => return Some(Err(self.fail(FactoryError::TagRead(err)))),
            },
            Err(ReadError::Exhausted) => {
                self.state = State::Ended;
                debug!(records = self.records, "record stream exhausted");
                return None;
            }
            Err(err) => return Some(Err(self.fail(FactoryError::TagRead(err)))),
        };
        match self.registry.construct(tag, &mut self.port) {
            Ok(variant) => {
                trace!(
                    index = self.records,
                    %tag,
                    kind = variant.kind(),
                    "decoded record"
                );
                self.records += 1;
                Some(Ok(variant))
            }
            Err(err) => Some(Err(self.fail(err))),
        }
    }

    fn fail(&mut self, error: FactoryError) -> FactoryError {
        self.state = State::Failed;
        warn!(
            records = self.records,
            position = self.port.position(),
            %error,
            "record stream decoding failed"
        );
        error
    }
}

impl<R: ReadPort> Iterator for RecordDecoder<'_, R> {
    type Item = Result<Variant, FactoryError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

impl<R: ReadPort> std::iter::FusedIterator for RecordDecoder<'_, R> {}

/// A decode that stopped early, with everything decoded before the failure.
#[derive(Debug, Error)]
#[error("decoding stopped after {} records: {error}", .decoded.len())]
pub struct DecodeError {
    /// Variants decoded before the failing record, in stream order.
    pub decoded: Vec<Variant>,
    #[source]
    pub error: FactoryError,
}

impl DecodeError {
    pub fn into_parts(self) -> (Vec<Variant>, FactoryError) {
        (self.decoded, self.error)
    }
}

/// Drains `port`, building one variant per record.
///
/// A clean end of input returns every variant. Any failure returns a
/// [`DecodeError`] holding the variants decoded before it.
pub fn decode_all<R: ReadPort>(
    registry: &VariantRegistry,
    port: R,
) -> Result<Vec<Variant>, DecodeError> {
    let mut decoded = Vec::new();
    for record in RecordDecoder::new(registry, port) {
        match record {
            Ok(variant) => decoded.push(variant),
            Err(error) => return Err(DecodeError { decoded, error }),
        }
    }
    Ok(decoded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::TextReader;

    #[test]
    fn empty_stream() {
        let registry = VariantRegistry::with_builtins();
        let out = decode_all(&registry, TextReader::new("".as_bytes())).unwrap();
        assert!(out.is_empty());
        let out = decode_all(&registry, TextReader::new(" \n\t\n".as_bytes())).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn decoder_is_fused_after_failure() {
        let registry = VariantRegistry::with_builtins();
        let mut decoder = RecordDecoder::new(&registry, TextReader::new("2 7 2 2".as_bytes()));
        assert!(decoder.next().unwrap().is_ok());
        assert!(matches!(
            decoder.next(),
            Some(Err(FactoryError::UnknownTag(_)))
        ));
        assert!(decoder.is_finished());
        assert!(decoder.next().is_none());
        assert_eq!(decoder.records(), 1);
        assert_eq!(decoder.into_port().position(), 2);
    }

    #[test]
    fn malformed_tag_fails() {
        let registry = VariantRegistry::with_builtins();
        let err = decode_all(&registry, TextReader::new("2 two".as_bytes())).unwrap_err();
        assert_eq!(err.decoded.len(), 1);
        assert!(matches!(
            err.error,
            FactoryError::TagRead(ReadError::Malformed { expected: "i32", .. })
        ));
    }

    #[test]
    fn negative_tag_fails() {
        let registry = VariantRegistry::with_builtins();
        let err = decode_all(&registry, TextReader::new("-1".as_bytes())).unwrap_err();
        assert!(err.decoded.is_empty());
        assert!(matches!(
            err.error,
            FactoryError::TagRead(ReadError::Malformed { expected: "tag", .. })
        ));
    }

    #[test]
    fn large_tag_is_unknown_not_malformed() {
        let registry = VariantRegistry::with_builtins();
        let err = decode_all(&registry, TextReader::new("2 70000".as_bytes())).unwrap_err();
        assert_eq!(err.decoded.len(), 1);
        assert!(matches!(err.error, FactoryError::UnknownTag(t) if t.get() == 70_000));

        let err = decode_all(&registry, TextReader::new("2147483647".as_bytes())).unwrap_err();
        assert!(matches!(err.error, FactoryError::UnknownTag(t) if t == Tag::MAX));
    }

    #[test]
    fn error_message_counts_partial_records() {
        let registry = VariantRegistry::with_builtins();
        let err = decode_all(&registry, TextReader::new("2 2 5".as_bytes())).unwrap_err();
        assert_eq!(err.to_string(), "decoding stopped after 2 records: unknown tag 5");
        let (decoded, error) = err.into_parts();
        assert_eq!(decoded.len(), 2);
        assert!(matches!(error, FactoryError::UnknownTag(t) if t.get() == 5));
    }
}
