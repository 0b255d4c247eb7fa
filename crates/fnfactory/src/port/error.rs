//! Reader port error type.

use thiserror::Error;

/// Failure to read one primitive value from a transport.
///
/// Every variant fails only the record being read; none of them is fatal to
/// the process.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The transport has no more values at the current position.
    #[error("transport exhausted")]
    Exhausted,
    /// A value is present but cannot be read as the requested type.
    #[error("malformed {expected}: {found:?}")]
    Malformed {
        expected: &'static str,
        found: String,
    },
    /// The underlying transport failed.
    #[error("transport failure: {0}")]
    Io(#[from] std::io::Error),
}

impl ReadError {
    pub(crate) fn malformed(expected: &'static str, found: impl Into<String>) -> Self {
        ReadError::Malformed {
            expected,
            found: found.into(),
        }
    }

    /// `true` for a clean end of input.
    pub fn is_exhausted(&self) -> bool {
        matches!(self, ReadError::Exhausted)
    }
}
