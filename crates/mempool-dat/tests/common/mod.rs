//! Shared fixtures: Bitcoin transactions and a test-side snapshot encoder.

#![allow(dead_code)]

use bitcoin::absolute::LockTime;
use bitcoin::consensus::encode::serialize;
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};
use mempool_dat::Mempool;
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Distinct legacy transaction for each seed.
pub fn legacy_tx(seed: u32) -> Transaction {
    let mut previous_output = OutPoint::null();
    previous_output.vout = seed;
    Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output,
            script_sig: ScriptBuf::from_bytes(vec![0x51; (seed % 7) as usize]),
            sequence: Sequence::ENABLE_RBF_NO_LOCKTIME,
            witness: Witness::new(),
        }],
        output: vec![TxOut {
            value: Amount::from_sat(10_000 + u64::from(seed)),
            script_pubkey: ScriptBuf::from_bytes(vec![0x00, 0x14, seed as u8]),
        }],
    }
}

/// Segwit transaction with a two-item witness.
pub fn segwit_tx(seed: u32) -> Transaction {
    let mut tx = legacy_tx(seed);
    tx.input[0].witness = Witness::from_slice(&[vec![0x30; 71], vec![0x02; 33]]);
    tx
}

/// Snapshot builder mirroring the on-disk layout.
#[derive(Default)]
pub struct SnapshotBuilder {
    version: i64,
    count_override: Option<i64>,
    entries: Vec<(Transaction, i64, i64)>,
    trailing: Vec<u8>,
}

impl SnapshotBuilder {
    pub fn new(version: i64) -> Self {
        Self {
            version,
            ..Self::default()
        }
    }

    pub fn entry(mut self, tx: Transaction, added_timestamp: i64, fee_delta: i64) -> Self {
        self.entries.push((tx, added_timestamp, fee_delta));
        self
    }

    pub fn declared_count(mut self, count: i64) -> Self {
        self.count_override = Some(count);
        self
    }

    pub fn trailing(mut self, bytes: &[u8]) -> Self {
        self.trailing.extend_from_slice(bytes);
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let count = self.count_override.unwrap_or(self.entries.len() as i64);
        let mut bytes = Vec::new();
        bytes.extend_from_slice(&self.version.to_le_bytes());
        bytes.extend_from_slice(&count.to_le_bytes());
        for (tx, added_timestamp, fee_delta) in &self.entries {
            bytes.extend_from_slice(&serialize(tx));
            bytes.extend_from_slice(&added_timestamp.to_le_bytes());
            bytes.extend_from_slice(&fee_delta.to_le_bytes());
        }
        bytes.extend_from_slice(&self.trailing);
        bytes
    }
}

/// Re-encode a decoded snapshot.
pub fn encode(mempool: &Mempool) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(&mempool.header().version().to_le_bytes());
    bytes.extend_from_slice(&mempool.header().entry_count().to_le_bytes());
    for entry in mempool.entries() {
        bytes.extend_from_slice(&serialize(entry.transaction()));
        bytes.extend_from_slice(&entry.added_timestamp().to_le_bytes());
        bytes.extend_from_slice(&entry.fee_delta().to_le_bytes());
    }
    if let Some(trailing) = mempool.map_deltas() {
        bytes.extend_from_slice(trailing);
    }
    bytes
}

/// Write `bytes` to `mempool.dat` inside a fresh temp dir.
pub fn write_snapshot(bytes: &[u8]) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("mempool.dat");
    let mut file = std::fs::File::create(&path).expect("create snapshot");
    file.write_all(bytes).expect("write snapshot");
    (dir, path)
}
