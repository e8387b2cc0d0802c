//! Plain-text rendering of a snapshot summary.

use std::fmt;

use mempool_dat::MempoolSummary;

/// Trailing bytes shown in the hex preview.
const TRAILING_PREVIEW: usize = 32;

pub fn text(summary: &MempoolSummary, trailing: Option<&[u8]>) -> String {
    Report { summary, trailing }.to_string()
}

struct Report<'a> {
    summary: &'a MempoolSummary,
    trailing: Option<&'a [u8]>,
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let summary = self.summary;

        writeln!(f, "version:      {}", summary.version)?;
        writeln!(f, "entries:      {}", summary.entry_count)?;
        writeln!(f, "fee deltas:   {}", summary.total_fee_delta)?;
        match self.trailing {
            None => writeln!(f, "trailing:     not read")?,
            Some(bytes) => {
                let shown = &bytes[..bytes.len().min(TRAILING_PREVIEW)];
                let ellipsis = if bytes.len() > TRAILING_PREVIEW { "…" } else { "" };
                writeln!(
                    f,
                    "trailing:     {} bytes [{}{}]",
                    bytes.len(),
                    hex::encode(shown),
                    ellipsis
                )?;
            }
        }

        if !summary.entries.is_empty() {
            writeln!(f)?;
        }
        for entry in &summary.entries {
            let seen = entry
                .first_seen
                .clone()
                .unwrap_or_else(|| format!("@{}", entry.added_timestamp));
            writeln!(
                f,
                "{:>6}  {}  {}  vsize {:>6}  in {:>3}  out {:>3}  delta {}",
                entry.index,
                entry.txid,
                seen,
                entry.vsize,
                entry.inputs,
                entry.outputs,
                entry.fee_delta
            )?;
        }

        let listed = summary.entries.len() as i64;
        if listed < summary.entry_count {
            writeln!(f, "   ... {} more", summary.entry_count - listed)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mempool_dat::EntrySummary;

    fn summary(entries: Vec<EntrySummary>, entry_count: i64) -> MempoolSummary {
        MempoolSummary {
            version: 1,
            entry_count,
            total_fee_delta: 0,
            trailing_bytes: None,
            entries,
        }
    }

    fn entry(index: usize) -> EntrySummary {
        EntrySummary {
            index,
            txid: format!("{:064x}", index),
            first_seen: None,
            added_timestamp: 99,
            fee_delta: -1,
            vsize: 110,
            inputs: 1,
            outputs: 2,
        }
    }

    #[test]
    fn test_trailing_preview_truncates() {
        let out = text(&summary(vec![], 0), Some(&[0x11; 40]));
        assert!(out.contains("40 bytes"));
        assert!(out.contains(&format!("[{}…]", "11".repeat(TRAILING_PREVIEW))));
    }

    #[test]
    fn test_lists_entries_and_remainder() {
        let out = text(&summary(vec![entry(0), entry(1)], 5), None);
        assert!(out.contains(&format!("{:064x}", 1)));
        assert!(out.contains("@99"));
        assert!(out.contains("... 3 more"));
    }

    #[test]
    fn test_header_lines() {
        let out = text(&summary(vec![], 0), None);
        assert_eq!(
            out,
            "version:      1\nentries:      0\nfee deltas:   0\ntrailing:     not read\n"
        );
    }
}
