//! # Snapshot Decoder Service
//!
//! Orchestrates one decode from a path or an already-open stream.
//!
//! ```text
//! [AwaitHeader] ──header──→ [AwaitEntries(n)] ──n entries──→ [AwaitTrailingOrDone] ──→ [Done]
//!       │                          │                                 │
//!       └──────────────────────────┴──────── any failure ────────────┴──→ [Failed]
//! ```
//!
//! Nothing built before a failure escapes: the caller only ever sees a
//! complete [`Mempool`] or an error.

use crate::adapters::BitcoinTransactionDecoder;
use crate::domain::{
    decode_entry, decode_header, Mempool, MempoolDatError, PositionedReader, TrailingData,
};
use crate::ports::TransactionDecoder;
use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;
use tracing::{debug, info, instrument, trace, warn};

/// Upper bound on entries preallocated from the header's declared count.
///
/// A corrupt count must not turn into a huge allocation before the bytes run out.
const MAX_PREALLOCATED_ENTRIES: usize = 1 << 16;

/// Options for a single decode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Drain and keep every byte after the last entry.
    pub capture_trailing: bool,
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_trailing(mut self, capture_trailing: bool) -> Self {
        self.capture_trailing = capture_trailing;
        self
    }
}

/// Decoder progress, reported in logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeState {
    AwaitHeader,
    AwaitEntries { remaining: i64 },
    AwaitTrailingOrDone,
    Done,
    Failed,
}

impl fmt::Display for DecodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeState::AwaitHeader => write!(f, "await-header"),
            DecodeState::AwaitEntries { remaining } => {
                write!(f, "await-entries({} remaining)", remaining)
            }
            DecodeState::AwaitTrailingOrDone => write!(f, "await-trailing-or-done"),
            DecodeState::Done => write!(f, "done"),
            DecodeState::Failed => write!(f, "failed"),
        }
    }
}

/// Decodes `mempool.dat` snapshots.
///
/// Holds no per-decode state, so one instance can serve many decodes,
/// including concurrent ones on different files.
#[derive(Debug, Clone, Default)]
pub struct MempoolFileDecoder<D = BitcoinTransactionDecoder> {
    decoder: D,
}

impl MempoolFileDecoder<BitcoinTransactionDecoder> {
    pub fn new() -> Self {
        Self::with_decoder(BitcoinTransactionDecoder)
    }
}

impl<D: TransactionDecoder> MempoolFileDecoder<D> {
    /// Use a custom transaction record decoder.
    pub fn with_decoder(decoder: D) -> Self {
        Self { decoder }
    }

    /// Open `path` and decode it.
    ///
    /// The file handle is closed on every return path.
    pub fn decode_path(
        &self,
        path: impl AsRef<Path>,
        options: &DecodeOptions,
    ) -> Result<Mempool<D::Transaction>, MempoolDatError> {
        self.decode_file(path.as_ref(), options)
    }

    #[instrument(skip_all, fields(path = %path.display(), capture_trailing = options.capture_trailing))]
    fn decode_file(
        &self,
        path: &Path,
        options: &DecodeOptions,
    ) -> Result<Mempool<D::Transaction>, MempoolDatError> {
        let file = File::open(path).map_err(|source| {
            warn!(error = %source, "could not open mempool file");
            MempoolDatError::Open {
                path: path.to_path_buf(),
                source,
            }
        })?;

        self.decode_from_reader(BufReader::new(file), options)
    }

    /// Decode an in-memory snapshot.
    pub fn decode_from_slice(
        &self,
        bytes: &[u8],
        options: &DecodeOptions,
    ) -> Result<Mempool<D::Transaction>, MempoolDatError> {
        self.decode_from_reader(bytes, options)
    }

    /// Decode from any buffered stream positioned at the start of a snapshot.
    ///
    /// Without `capture_trailing`, no byte past the last declared entry is read.
    pub fn decode_from_reader<R: BufRead>(
        &self,
        reader: R,
        options: &DecodeOptions,
    ) -> Result<Mempool<D::Transaction>, MempoolDatError> {
        let mut reader = PositionedReader::new(reader);
        let mut state = DecodeState::AwaitHeader;

        let mempool = self.decode_tracked(&mut reader, options, &mut state)?;
        info!(
            version = mempool.header().version(),
            entries = mempool.len(),
            trailing_bytes = mempool.map_deltas().map(<[u8]>::len),
            bytes_read = reader.position(),
            "decoded mempool snapshot"
        );
        Ok(mempool)
    }

    /// Run one decode, leaving `state` at `Done` or `Failed`.
    fn decode_tracked<R: BufRead>(
        &self,
        reader: &mut PositionedReader<R>,
        options: &DecodeOptions,
        state: &mut DecodeState,
    ) -> Result<Mempool<D::Transaction>, MempoolDatError> {
        self.run(reader, options, state).map_err(|err| {
            warn!(
                error = %err,
                failed_in = %state,
                offset = reader.position(),
                "mempool snapshot decode failed"
            );
            *state = DecodeState::Failed;
            err
        })
    }

    fn run<R: BufRead>(
        &self,
        reader: &mut PositionedReader<R>,
        options: &DecodeOptions,
        state: &mut DecodeState,
    ) -> Result<Mempool<D::Transaction>, MempoolDatError> {
        let header = decode_header(reader)?;
        debug!(
            version = header.version(),
            entry_count = header.entry_count(),
            "read mempool header"
        );

        let declared = header.entry_count();
        if declared < 0 {
            return Err(MempoolDatError::InvalidHeader {
                entry_count: declared,
            });
        }
        *state = DecodeState::AwaitEntries {
            remaining: declared,
        };

        let count = declared as u64;
        let capacity = usize::try_from(count)
            .unwrap_or(usize::MAX)
            .min(MAX_PREALLOCATED_ENTRIES);
        let mut entries = Vec::with_capacity(capacity);

        for index in 0..count {
            let entry = decode_entry(&self.decoder, reader, index)?;
            trace!(index, offset = reader.position(), "decoded mempool entry");
            entries.push(entry);
            *state = DecodeState::AwaitEntries {
                remaining: declared - index as i64 - 1,
            };
        }
        *state = DecodeState::AwaitTrailingOrDone;

        let trailing = if options.capture_trailing {
            let mut bytes = Vec::new();
            reader
                .read_to_end(&mut bytes)
                .map_err(MempoolDatError::TrailingRead)?;
            debug!(trailing_bytes = bytes.len(), "captured trailing fee-delta bytes");
            TrailingData::Captured(bytes)
        } else {
            TrailingData::NotRequested
        };

        *state = DecodeState::Done;
        Ok(Mempool::from_parts(header, entries, trailing))
    }
}
