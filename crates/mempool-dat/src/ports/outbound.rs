//! Outbound (Driven) ports for the snapshot decoder.
//!
//! The transaction record format is opaque to the core. It only needs
//! something that can pull one self-delimiting record off the stream.

use std::io::BufRead;

pub use crate::domain::errors::TransactionDecodeError;

/// Decodes one transaction record from the current stream position.
///
/// On success the stream is left positioned on the first byte after the
/// record. On failure the stream position is unspecified; the caller
/// abandons the decode.
pub trait TransactionDecoder: Send + Sync {
    /// Decoded transaction type.
    type Transaction;

    fn decode_one<R: BufRead>(
        &self,
        reader: &mut R,
    ) -> Result<Self::Transaction, TransactionDecodeError>;
}

/// Test decoder: one length byte followed by that many payload bytes.
#[cfg(test)]
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthPrefixedDecoder;

#[cfg(test)]
impl TransactionDecoder for LengthPrefixedDecoder {
    type Transaction = Vec<u8>;

    fn decode_one<R: BufRead>(&self, reader: &mut R) -> Result<Vec<u8>, TransactionDecodeError> {
        let map_eof = |e: std::io::Error| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => TransactionDecodeError::UnexpectedEof,
            _ => TransactionDecodeError::Io(e),
        };

        let mut len = [0u8; 1];
        reader.read_exact(&mut len).map_err(map_eof)?;
        let mut payload = vec![0u8; len[0] as usize];
        reader.read_exact(&mut payload).map_err(map_eof)?;
        Ok(payload)
    }
}

/// Test decoder that records how often it is invoked.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CountingDecoder {
    calls: std::sync::atomic::AtomicUsize,
}

#[cfg(test)]
impl CountingDecoder {
    pub fn calls(&self) -> usize {
        self.calls.load(std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(test)]
impl TransactionDecoder for CountingDecoder {
    type Transaction = Vec<u8>;

    fn decode_one<R: BufRead>(&self, reader: &mut R) -> Result<Vec<u8>, TransactionDecodeError> {
        self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        LengthPrefixedDecoder.decode_one(reader)
    }
}
