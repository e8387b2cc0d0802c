//! Error types for mempool snapshot decoding.
//!
//! Every failure aborts the whole decode. Positional context (which header
//! field, which entry index) is carried as structured data so callers can
//! match on it instead of parsing messages.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error returned by a snapshot decode.
#[derive(Debug, Error)]
pub enum MempoolDatError {
    #[error("could not open mempool file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read header {field}: {source}")]
    HeaderDecode {
        field: HeaderField,
        #[source]
        source: FieldError,
    },

    #[error("invalid header: entry count {entry_count} is negative")]
    InvalidHeader { entry_count: i64 },

    #[error("could not read mempool entry at index {index} (offset {offset}): {source}")]
    EntryDecode {
        index: u64,
        offset: u64,
        #[source]
        source: EntryError,
    },

    #[error("could not read trailing fee-delta bytes: {0}")]
    TrailingRead(#[source] io::Error),
}

impl MempoolDatError {
    /// Index of the entry that failed, if the failure happened in the entry loop.
    pub fn entry_index(&self) -> Option<u64> {
        match self {
            Self::EntryDecode { index, .. } => Some(*index),
            _ => None,
        }
    }

    /// True when the input ran out of bytes in the middle of a structure.
    pub fn is_truncated(&self) -> bool {
        match self {
            Self::HeaderDecode { source, .. } => source.is_truncated(),
            Self::EntryDecode { source, .. } => source.is_truncated(),
            _ => false,
        }
    }
}

/// Header field being read when a [`MempoolDatError::HeaderDecode`] occurred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HeaderField {
    Version,
    EntryCount,
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeaderField::Version => write!(f, "version"),
            HeaderField::EntryCount => write!(f, "entry count"),
        }
    }
}

/// Failure reading a fixed-width field.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Fewer bytes than the field width were left in the stream.
    ///
    /// `available == 0` is a clean end-of-stream; anything else is a partial read.
    #[error("truncated input: needed 8 bytes, {available} available")]
    TruncatedInput { available: usize },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl FieldError {
    pub fn is_truncated(&self) -> bool {
        matches!(self, FieldError::TruncatedInput { .. })
    }

    /// Stream ended exactly at the field boundary.
    pub fn is_clean_eof(&self) -> bool {
        matches!(self, FieldError::TruncatedInput { available: 0 })
    }
}

/// Which part of a mempool entry failed to decode.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("transaction: {0}")]
    Transaction(#[from] TransactionDecodeError),

    #[error("timestamp: {0}")]
    Timestamp(#[source] FieldError),

    #[error("fee delta: {0}")]
    FeeDelta(#[source] FieldError),
}

impl EntryError {
    pub fn is_truncated(&self) -> bool {
        match self {
            EntryError::Transaction(err) => matches!(err, TransactionDecodeError::UnexpectedEof),
            EntryError::Timestamp(err) | EntryError::FeeDelta(err) => err.is_truncated(),
        }
    }
}

/// Failure reported by a [`TransactionDecoder`](crate::ports::TransactionDecoder).
#[derive(Debug, Error)]
pub enum TransactionDecodeError {
    #[error("stream ended inside transaction record")]
    UnexpectedEof,

    #[error("malformed transaction record: {0}")]
    Malformed(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
