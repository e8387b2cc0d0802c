//! # mempool-dat
//!
//! Read-only decoder for the mempool snapshot a node writes to `mempool.dat`
//! on shutdown.
//!
//! ## File Layout
//!
//! ```text
//! ┌──────────────────┬──────────────────────┬─────────────────────────┬──────────────────┐
//! │ version (i64 LE) │ entry_count (i64 LE) │ entry × entry_count     │ trailing bytes   │
//! └──────────────────┴──────────────────────┴─────────────────────────┴──────────────────┘
//!                                           entry = tx ‖ added_timestamp (i64 LE) ‖ fee_delta (i64 LE)
//! ```
//!
//! The trailing region holds the node's fee-delta map in an undocumented
//! format. It is only read when asked for, and is returned as raw bytes.
//!
//! ## Guarantees
//!
//! | Property | Enforcement |
//! |----------|-------------|
//! | `entries().len() == header().entry_count()` | `service.rs` entry loop |
//! | Entries keep file order | `service.rs` entry loop |
//! | Negative entry count rejected before any entry read | `MempoolDatError::InvalidHeader` |
//! | Failing entry is identified by index and offset | `MempoolDatError::EntryDecode` |
//! | No byte past the last entry is read unless trailing capture is on | `service.rs` |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  adapters/bitcoin_codec.rs - BitcoinTransactionDecoder          │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  ports/outbound.rs - TransactionDecoder trait                   │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  domain/codec.rs    - read_le_i64, decode_header, decode_entry  │
//! │  domain/entities.rs - FileHeader, MempoolEntry, Mempool         │
//! │  domain/errors.rs   - MempoolDatError                           │
//! │  service.rs         - MempoolFileDecoder (orchestration)        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mempool_dat::read_mempool_from_path;
//!
//! let mempool = read_mempool_from_path("mempool.dat", false)?;
//! println!("{}", mempool.header());
//! for entry in mempool.entries() {
//!     println!("{entry}");
//! }
//! # Ok::<(), mempool_dat::MempoolDatError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::BitcoinTransactionDecoder;
pub use domain::*;
pub use ports::TransactionDecoder;
pub use service::{DecodeOptions, DecodeState, MempoolFileDecoder};

use std::path::Path;

/// Decode the snapshot at `path` with Bitcoin transactions.
///
/// With `capture_trailing`, every byte after the last entry is returned in
/// [`Mempool::map_deltas`]; otherwise nothing past the entries is read.
pub fn read_mempool_from_path(
    path: impl AsRef<Path>,
    capture_trailing: bool,
) -> Result<Mempool, MempoolDatError> {
    MempoolFileDecoder::new().decode_path(
        path,
        &DecodeOptions::new().with_trailing(capture_trailing),
    )
}
