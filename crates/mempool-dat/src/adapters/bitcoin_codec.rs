//! Bitcoin consensus-encoded transactions.

use crate::ports::{TransactionDecodeError, TransactionDecoder};
use bitcoin::consensus::{encode, Decodable};
use bitcoin::Transaction;
use std::io::BufRead;

/// Reads transactions in Bitcoin wire format (legacy and segwit).
#[derive(Debug, Clone, Copy, Default)]
pub struct BitcoinTransactionDecoder;

impl TransactionDecoder for BitcoinTransactionDecoder {
    type Transaction = Transaction;

    fn decode_one<R: BufRead>(&self, reader: &mut R) -> Result<Transaction, TransactionDecodeError> {
        Transaction::consensus_decode(bitcoin::io::from_std_mut(reader)).map_err(map_encode_error)
    }
}

fn map_encode_error(err: encode::Error) -> TransactionDecodeError {
    match err {
        encode::Error::Io(io_err) if io_err.kind() == bitcoin::io::ErrorKind::UnexpectedEof => {
            TransactionDecodeError::UnexpectedEof
        }
        encode::Error::Io(io_err) => TransactionDecodeError::Io(io_err.into()),
        other => TransactionDecodeError::Malformed(other.to_string()),
    }
}
