//! Core domain entities for a decoded mempool snapshot.
//!
//! All types are immutable once built: fields are private and only the
//! decoder constructs them.

use bitcoin::{Transaction, Txid};
use chrono::{DateTime, Utc};
use std::fmt;

/// Snapshot file header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileHeader {
    version: i64,
    entry_count: i64,
}

impl FileHeader {
    pub fn new(version: i64, entry_count: i64) -> Self {
        Self {
            version,
            entry_count,
        }
    }

    /// Format version as written by the node. Never validated.
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Number of entries the file declares.
    pub fn entry_count(&self) -> i64 {
        self.entry_count
    }
}

impl fmt::Display for FileHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "version {}, {} transactions",
            self.version, self.entry_count
        )
    }
}

/// One pending transaction recorded in the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MempoolEntry<T = Transaction> {
    transaction: T,
    added_timestamp: i64,
    fee_delta: i64,
}

impl<T> MempoolEntry<T> {
    pub fn new(transaction: T, added_timestamp: i64, fee_delta: i64) -> Self {
        Self {
            transaction,
            added_timestamp,
            fee_delta,
        }
    }

    pub fn transaction(&self) -> &T {
        &self.transaction
    }

    /// Seconds since the UNIX epoch at which the node first saw the transaction.
    pub fn added_timestamp(&self) -> i64 {
        self.added_timestamp
    }

    /// Priority delta applied to the transaction's fee (satoshis).
    pub fn fee_delta(&self) -> i64 {
        self.fee_delta
    }

    /// `added_timestamp` as a UTC time, `None` if it is out of range.
    pub fn first_seen(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp(self.added_timestamp, 0)
    }

    pub fn into_transaction(self) -> T {
        self.transaction
    }
}

impl MempoolEntry<Transaction> {
    pub fn txid(&self) -> Txid {
        self.transaction.compute_txid()
    }
}

impl fmt::Display for MempoolEntry<Transaction> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.txid())?;
        match self.first_seen() {
            Some(seen) => write!(f, " first seen {}", seen.to_rfc3339())?,
            None => write!(f, " first seen @{}", self.added_timestamp)?,
        }
        write!(f, " fee delta {}", self.fee_delta)
    }
}

/// Trailing region after the declared entries.
///
/// Kept as an explicit enum so "not requested" never collapses into "empty".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum TrailingData {
    /// The caller did not ask for the trailing bytes; none were read.
    #[default]
    NotRequested,
    /// Every byte after the last entry, in file order. May be empty.
    Captured(Vec<u8>),
}

impl TrailingData {
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            TrailingData::NotRequested => None,
            TrailingData::Captured(bytes) => Some(bytes),
        }
    }

    pub fn is_captured(&self) -> bool {
        matches!(self, TrailingData::Captured(_))
    }
}

/// A fully decoded snapshot.
///
/// `entries().len() == header().entry_count()` always holds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mempool<T = Transaction> {
    header: FileHeader,
    entries: Vec<MempoolEntry<T>>,
    trailing: TrailingData,
}

impl<T> Mempool<T> {
    pub(crate) fn from_parts(
        header: FileHeader,
        entries: Vec<MempoolEntry<T>>,
        trailing: TrailingData,
    ) -> Self {
        debug_assert_eq!(entries.len() as i64, header.entry_count());
        Self {
            header,
            entries,
            trailing,
        }
    }

    pub fn header(&self) -> &FileHeader {
        &self.header
    }

    /// Entries in file order.
    pub fn entries(&self) -> &[MempoolEntry<T>] {
        &self.entries
    }

    pub fn trailing(&self) -> &TrailingData {
        &self.trailing
    }

    /// Raw fee-delta map bytes, if they were captured.
    pub fn map_deltas(&self) -> Option<&[u8]> {
        self.trailing.as_bytes()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_parts(self) -> (FileHeader, Vec<MempoolEntry<T>>, TrailingData) {
        (self.header, self.entries, self.trailing)
    }
}

impl Mempool<Transaction> {
    /// First entry whose transaction has the given txid.
    pub fn entry_by_txid(&self, txid: &Txid) -> Option<&MempoolEntry<Transaction>> {
        self.entries.iter().find(|entry| entry.txid() == *txid)
    }
}
