//! Auto-growing binary buffer writer.

/// Default initial allocation, in bytes.
const DEFAULT_ALLOC_SIZE: usize = 1024;

/// A binary buffer writer that appends big-endian values to a growing buffer.
///
/// `x0` marks the start of the not-yet-flushed region and `x` the current
/// write position; [`Writer::flush`] hands out the bytes between them.
#[derive(Debug, Clone)]
pub struct Writer {
    /// The underlying buffer.
    pub uint8: Vec<u8>,
    /// Start of the pending region.
    pub x0: usize,
    /// Current write position.
    pub x: usize,
}

impl Default for Writer {
    fn default() -> Self {
        Self::new()
    }
}

impl Writer {
    /// Creates a new writer with the default allocation size.
    pub fn new() -> Self {
        Self {
            uint8: Vec::with_capacity(DEFAULT_ALLOC_SIZE),
            x0: 0,
            x: 0,
        }
    }

    /// Returns the pending bytes and marks them flushed.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.uint8[self.x0..self.x].to_vec();
        self.x0 = self.x;
        out
    }

    fn buf(&mut self, data: &[u8]) {
        self.uint8.truncate(self.x);
        self.uint8.extend_from_slice(data);
        self.x += data.len();
    }

    /// Writes a signed 32-bit integer (big-endian).
    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.buf(&val.to_be_bytes());
    }

    /// Writes a 64-bit floating point number (big-endian).
    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.buf(&val.to_be_bytes());
    }
}
