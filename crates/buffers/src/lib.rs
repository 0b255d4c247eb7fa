//! Byte buffer utilities for fnfactory.
//!
//! This crate provides the cursor-tracking reader and auto-growing writer
//! that the binary record transport is built on.
//!
//! # Overview
//!
//! - [`Reader`] - Reads big-endian values from a byte slice with cursor tracking
//! - [`Writer`] - Writes big-endian values to an auto-growing buffer
//!
//! # Example
//!
//! ```
//! use fnfactory_buffers::{Reader, Writer};
//!
//! let mut writer = Writer::new();
//! writer.i32(1);
//! writer.f64(2.5);
//! let data = writer.flush();
//!
//! let mut reader = Reader::new(&data);
//! assert_eq!(reader.i32(), Ok(1));
//! assert_eq!(reader.f64(), Ok(2.5));
//! assert_eq!(reader.size(), 0);
//! ```

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

/// Error type for buffer operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    /// Attempted to read past the end of the buffer.
    ///
    /// Carries the number of bytes requested and the number still available.
    EndOfBuffer { wanted: usize, remaining: usize },
}

impl std::fmt::Display for BufferError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BufferError::EndOfBuffer { wanted, remaining } => write!(
                f,
                "end of buffer: wanted {} bytes, {} remaining",
                wanted, remaining
            ),
        }
    }
}

impl std::error::Error for BufferError {}
