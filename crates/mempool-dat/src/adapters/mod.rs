//! Adapters layer for the snapshot decoder.
//!
//! - `bitcoin_codec`: `TransactionDecoder` backed by the `bitcoin` crate's consensus codec

pub mod bitcoin_codec;

pub use bitcoin_codec::BitcoinTransactionDecoder;
