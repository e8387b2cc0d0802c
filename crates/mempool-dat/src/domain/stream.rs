//! Byte-offset tracking over a buffered stream.

use std::io::{self, BufRead, Read};

/// Wraps a [`BufRead`] and counts every byte handed out to callers.
///
/// The offset is what error reports use to point at the start of a broken entry.
#[derive(Debug)]
pub struct PositionedReader<R> {
    inner: R,
    position: u64,
}

impl<R> PositionedReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, position: 0 }
    }

    /// Bytes consumed since construction.
    pub fn position(&self) -> u64 {
        self.position
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Read for PositionedReader<R> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let n = self.inner.read(buf)?;
        self.position += n as u64;
        Ok(n)
    }
}

impl<R: BufRead> BufRead for PositionedReader<R> {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.inner.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.inner.consume(amt);
        self.position += amt as u64;
    }
}
