//! Serializable summaries of a decoded snapshot.
//!
//! Used for machine-readable output; the decoded [`Mempool`] itself stays
//! free of serialization concerns.

use super::entities::{Mempool, MempoolEntry};
use bitcoin::Transaction;
use serde::Serialize;

/// One entry, flattened for output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EntrySummary {
    pub index: usize,
    pub txid: String,
    /// RFC 3339 time, absent if the timestamp is out of range.
    pub first_seen: Option<String>,
    pub added_timestamp: i64,
    pub fee_delta: i64,
    pub vsize: usize,
    pub inputs: usize,
    pub outputs: usize,
}

impl EntrySummary {
    pub fn from_entry(index: usize, entry: &MempoolEntry<Transaction>) -> Self {
        let tx = entry.transaction();
        Self {
            index,
            txid: entry.txid().to_string(),
            first_seen: entry.first_seen().map(|t| t.to_rfc3339()),
            added_timestamp: entry.added_timestamp(),
            fee_delta: entry.fee_delta(),
            vsize: tx.vsize(),
            inputs: tx.input.len(),
            outputs: tx.output.len(),
        }
    }
}

/// Whole snapshot, flattened for output.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MempoolSummary {
    pub version: i64,
    pub entry_count: i64,
    /// Sum of `fee_delta` over all entries.
    pub total_fee_delta: i64,
    /// Trailing byte count, absent when trailing bytes were not captured.
    pub trailing_bytes: Option<usize>,
    /// Listed entries; may be a prefix of the snapshot when a limit is applied.
    pub entries: Vec<EntrySummary>,
}

impl MempoolSummary {
    /// Summarize `mempool`, listing at most `limit` entries (all when `None`).
    pub fn from_mempool(mempool: &Mempool<Transaction>, limit: Option<usize>) -> Self {
        let take = limit.unwrap_or(usize::MAX);
        let entries = mempool
            .entries()
            .iter()
            .take(take)
            .enumerate()
            .map(|(index, entry)| EntrySummary::from_entry(index, entry))
            .collect();

        let total_fee_delta = mempool
            .entries()
            .iter()
            .fold(0i64, |acc, entry| acc.saturating_add(entry.fee_delta()));

        Self {
            version: mempool.header().version(),
            entry_count: mempool.header().entry_count(),
            total_fee_delta,
            trailing_bytes: mempool.map_deltas().map(<[u8]>::len),
            entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{FileHeader, TrailingData};
    use bitcoin::absolute::LockTime;
    use bitcoin::transaction::Version;
    use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, TxIn, TxOut, Witness};

    fn tx(vout: u32) -> Transaction {
        let mut previous_output = OutPoint::null();
        previous_output.vout = vout;
        Transaction {
            version: Version::ONE,
            lock_time: LockTime::ZERO,
            input: vec![TxIn {
                previous_output,
                script_sig: ScriptBuf::new(),
                sequence: Sequence::MAX,
                witness: Witness::new(),
            }],
            output: vec![TxOut {
                value: Amount::from_sat(1_000),
                script_pubkey: ScriptBuf::new(),
            }],
        }
    }

    fn mempool(trailing: TrailingData) -> Mempool<Transaction> {
        Mempool::from_parts(
            FileHeader::new(1, 3),
            vec![
                MempoolEntry::new(tx(0), 1_600_000_000, 100),
                MempoolEntry::new(tx(1), 1_600_000_001, -40),
                MempoolEntry::new(tx(2), 1_600_000_002, 0),
            ],
            trailing,
        )
    }

    #[test]
    fn test_summary_limit_and_totals() {
        let summary = MempoolSummary::from_mempool(&mempool(TrailingData::NotRequested), Some(2));

        assert_eq!(summary.entry_count, 3);
        assert_eq!(summary.entries.len(), 2);
        assert_eq!(summary.total_fee_delta, 60);
        assert_eq!(summary.trailing_bytes, None);
        assert_eq!(summary.entries[1].index, 1);
        assert_eq!(summary.entries[1].inputs, 1);
    }

    #[test]
    fn test_summary_json_shape() {
        let summary =
            MempoolSummary::from_mempool(&mempool(TrailingData::Captured(vec![0; 5])), None);
        let json = serde_json::to_value(&summary).unwrap();

        assert_eq!(json["version"], 1);
        assert_eq!(json["trailing_bytes"], 5);
        assert_eq!(json["entries"].as_array().unwrap().len(), 3);
        assert_eq!(
            json["entries"][0]["txid"],
            tx(0).compute_txid().to_string()
        );
        assert_eq!(json["entries"][0]["first_seen"], "2020-09-13T12:26:40+00:00");
    }
}
