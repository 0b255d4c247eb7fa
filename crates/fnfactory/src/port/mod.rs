//! Reader port: typed primitive reads over an arbitrary transport.
//!
//! Constructors and the record decoder only ever see `&mut dyn ReadPort`,
//! so the same registry decodes whitespace-separated text, big-endian binary
//! buffers, or anything else that can hand out one `f64`/`i32` at a time.

mod binary;
mod error;
mod text;

pub use binary::BinaryReader;
pub use error::ReadError;
pub use text::TextReader;

/// Source of primitive values.
///
/// Each successful call advances the transport by exactly one value.
pub trait ReadPort {
    /// Reads a 64-bit float.
    fn read_f64(&mut self) -> Result<f64, ReadError>;

    /// Reads a 32-bit signed integer.
    fn read_i32(&mut self) -> Result<i32, ReadError>;

    /// Transport-specific read position (tokens for text, bytes for binary).
    fn position(&self) -> usize;
}

impl<R: ReadPort + ?Sized> ReadPort for &mut R {
    fn read_f64(&mut self) -> Result<f64, ReadError> {
        (**self).read_f64()
    }

    fn read_i32(&mut self) -> Result<i32, ReadError> {
        (**self).read_i32()
    }

    fn position(&self) -> usize {
        (**self).position()
    }
}

mod sealed {
    pub trait Sealed {}
    impl Sealed for f64 {}
    impl Sealed for i32 {}
}

/// The closed set of values a [`ReadPort`] can produce.
pub trait Primitive: sealed::Sealed + Sized {
    /// Name used in diagnostics.
    const NAME: &'static str;

    fn read_from<R: ReadPort + ?Sized>(port: &mut R) -> Result<Self, ReadError>;
}

impl Primitive for f64 {
    const NAME: &'static str = "f64";

    fn read_from<R: ReadPort + ?Sized>(port: &mut R) -> Result<Self, ReadError> {
        port.read_f64()
    }
}

impl Primitive for i32 {
    const NAME: &'static str = "i32";

    fn read_from<R: ReadPort + ?Sized>(port: &mut R) -> Result<Self, ReadError> {
        port.read_i32()
    }
}

/// Generic `read::<T>()` on top of the per-type methods.
///
/// ```
/// use fnfactory::port::{ReadPortExt, TextReader};
///
/// let mut port = TextReader::new("7 2.5".as_bytes());
/// let n: i32 = port.read().unwrap();
/// let x = port.read::<f64>().unwrap();
/// assert_eq!((n, x), (7, 2.5));
/// ```
pub trait ReadPortExt: ReadPort {
    fn read<T: Primitive>(&mut self) -> Result<T, ReadError> {
        T::read_from(self)
    }
}

impl<R: ReadPort + ?Sized> ReadPortExt for R {}
