//! # Snapshot Field Codec
//!
//! Readers for the fixed pieces of a `mempool.dat` file.
//!
//! ## Layout
//!
//! ```text
//! [i64 LE version][i64 LE entry_count]
//! entry_count × ( [transaction][i64 LE added_timestamp][i64 LE fee_delta] )
//! [trailing bytes, undocumented]
//! ```
//!
//! The transaction is self-delimiting, so an entry ends wherever the
//! transaction decoder stops plus exactly 16 bytes.

use super::entities::{FileHeader, MempoolEntry};
use super::errors::{EntryError, FieldError, HeaderField, MempoolDatError};
use super::stream::PositionedReader;
use crate::ports::TransactionDecoder;
use std::io::{self, BufRead, Read};

/// Width of every fixed integer field in the file.
pub const INT64_WIDTH: usize = 8;

/// Header size in bytes.
pub const HEADER_LEN: usize = 2 * INT64_WIDTH;

/// Bytes following the transaction inside each entry.
pub const ENTRY_TRAILER_LEN: usize = 2 * INT64_WIDTH;

/// Read one signed 64-bit little-endian integer.
///
/// Unlike `read_exact`, a short read reports how many bytes were actually
/// there, so callers can tell a clean end-of-stream from a cut field.
pub fn read_le_i64<R: Read + ?Sized>(reader: &mut R) -> Result<i64, FieldError> {
    let mut buf = [0u8; INT64_WIDTH];
    let mut filled = 0;

    while filled < INT64_WIDTH {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => return Err(FieldError::TruncatedInput { available: filled }),
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(FieldError::Io(e)),
        }
    }

    Ok(i64::from_le_bytes(buf))
}

/// Read the file header: version, then entry count.
///
/// The version is passed through untouched; unknown versions are accepted.
pub fn decode_header<R: Read + ?Sized>(reader: &mut R) -> Result<FileHeader, MempoolDatError> {
    let version = read_le_i64(reader).map_err(|source| MempoolDatError::HeaderDecode {
        field: HeaderField::Version,
        source,
    })?;

    let entry_count = read_le_i64(reader).map_err(|source| MempoolDatError::HeaderDecode {
        field: HeaderField::EntryCount,
        source,
    })?;

    Ok(FileHeader::new(version, entry_count))
}

/// Read the entry at `index`: transaction, added timestamp, fee delta.
///
/// Nothing is returned for a half-read entry; any failing sub-read becomes
/// [`MempoolDatError::EntryDecode`] carrying the index and the entry's start offset.
pub fn decode_entry<D, R>(
    decoder: &D,
    reader: &mut PositionedReader<R>,
    index: u64,
) -> Result<MempoolEntry<D::Transaction>, MempoolDatError>
where
    D: TransactionDecoder + ?Sized,
    R: BufRead,
{
    let offset = reader.position();

    read_entry(decoder, reader).map_err(|source| MempoolDatError::EntryDecode {
        index,
        offset,
        source,
    })
}

fn read_entry<D, R>(
    decoder: &D,
    reader: &mut PositionedReader<R>,
) -> Result<MempoolEntry<D::Transaction>, EntryError>
where
    D: TransactionDecoder + ?Sized,
    R: BufRead,
{
    let transaction = decoder.decode_one(reader)?;
    let added_timestamp = read_le_i64(reader).map_err(EntryError::Timestamp)?;
    let fee_delta = read_le_i64(reader).map_err(EntryError::FeeDelta)?;

    Ok(MempoolEntry::new(transaction, added_timestamp, fee_delta))
}
