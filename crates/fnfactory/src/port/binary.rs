//! Big-endian binary transport.

use fnfactory_buffers::{BufferError, Reader};

use super::{ReadError, ReadPort};

/// Reads big-endian values from a byte slice: `i32` as 4 bytes, `f64` as 8.
///
/// An empty remainder is [`ReadError::Exhausted`]; a remainder shorter than
/// the requested value is a truncated value and reported as
/// [`ReadError::Malformed`] without moving the cursor.
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    reader: Reader<'a>,
}

impl<'a> BinaryReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            reader: Reader::new(data),
        }
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.reader.size()
    }

    fn lift<T>(result: Result<T, BufferError>, expected: &'static str) -> Result<T, ReadError> {
        match result {
            Ok(value) => Ok(value),
            Err(BufferError::EndOfBuffer { remaining: 0, .. }) => Err(ReadError::Exhausted),
            Err(BufferError::EndOfBuffer { wanted, remaining }) => Err(ReadError::malformed(
                expected,
                format!("truncated: {remaining} of {wanted} bytes"),
            )),
        }
    }
}

impl ReadPort for BinaryReader<'_> {
    fn read_f64(&mut self) -> Result<f64, ReadError> {
        Self::lift(self.reader.f64(), "f64")
    }

    fn read_i32(&mut self) -> Result<i32, ReadError> {
        Self::lift(self.reader.i32(), "i32")
    }

    fn position(&self) -> usize {
        self.reader.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_values() {
        let mut data = 1i32.to_be_bytes().to_vec();
        data.extend_from_slice(&(-0.5f64).to_be_bytes());
        let mut port = BinaryReader::new(&data);
        assert_eq!(port.read_i32().unwrap(), 1);
        assert_eq!(port.position(), 4);
        assert_eq!(port.read_f64().unwrap(), -0.5);
        assert_eq!(port.remaining(), 0);
        assert!(port.read_i32().unwrap_err().is_exhausted());
    }

    #[test]
    fn truncated_value_is_malformed() {
        let data = [0x00, 0x00, 0x01];
        let mut port = BinaryReader::new(&data);
        match port.read_i32() {
            Err(ReadError::Malformed { expected, found }) => {
                assert_eq!(expected, "i32");
                assert_eq!(found, "truncated: 3 of 4 bytes");
            }
            other => panic!("expected malformed, got {other:?}"),
        }
        assert_eq!(port.position(), 0);
    }
}
