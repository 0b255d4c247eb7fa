//! Whitespace-tokenized text transport.

use std::io::BufRead;
use std::ops::Range;
use std::str::FromStr;

use super::{ReadError, ReadPort};

/// Reads whitespace-separated tokens from any buffered source.
///
/// Input is pulled one line at a time, so a `TextReader` over stdin blocks
/// only until the next line arrives. A token that does not parse as the
/// requested type is still consumed and reported as
/// [`ReadError::Malformed`].
///
/// ```
/// use fnfactory::port::{ReadPort, TextReader};
///
/// let mut port = TextReader::new("1 2.0\n  -1.0".as_bytes());
/// assert_eq!(port.read_i32().unwrap(), 1);
/// assert_eq!(port.read_f64().unwrap(), 2.0);
/// assert_eq!(port.read_f64().unwrap(), -1.0);
/// assert!(port.read_f64().unwrap_err().is_exhausted());
/// ```
#[derive(Debug)]
pub struct TextReader<R> {
    inner: R,
    line: String,
    cursor: usize,
    tokens: usize,
}

impl<R: BufRead> TextReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            line: String::new(),
            cursor: 0,
            tokens: 0,
        }
    }

    /// Gives back the underlying source. Buffered but unread tokens of the
    /// current line are lost.
    pub fn into_inner(self) -> R {
        self.inner
    }

    fn next_token(&mut self) -> std::io::Result<Option<Range<usize>>> {
        loop {
            let rest = &self.line[self.cursor..];
            let trimmed = rest.trim_start();
            if !trimmed.is_empty() {
                let start = self.cursor + (rest.len() - trimmed.len());
                let len = trimmed
                    .find(char::is_whitespace)
                    .unwrap_or(trimmed.len());
                self.cursor = start + len;
                self.tokens += 1;
                return Ok(Some(start..start + len));
            }
            self.line.clear();
            self.cursor = 0;
            if self.inner.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
        }
    }

    fn parse<T: FromStr>(&mut self, expected: &'static str) -> Result<T, ReadError> {
        let range = self.next_token()?.ok_or(ReadError::Exhausted)?;
        let token = &self.line[range];
        token
            .parse()
            .map_err(|_| ReadError::malformed(expected, token))
    }
}

impl<R: BufRead> ReadPort for TextReader<R> {
    fn read_f64(&mut self) -> Result<f64, ReadError> {
        self.parse("f64")
    }

    fn read_i32(&mut self) -> Result<i32, ReadError> {
        self.parse("i32")
    }

    fn position(&self) -> usize {
        self.tokens
    }
}
