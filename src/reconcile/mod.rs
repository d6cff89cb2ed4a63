//! Reconciliation of extracted records against known identifiers
//!
//! Pure functions over in-memory data: annotate each record with whether
//! its link has been seen in a previous run, order the batch newest
//! first, and count the novelties. No I/O happens here, so a dry run and
//! a persisted run reconcile identically.

use std::collections::HashSet;

use crate::models::{PressRecord, ReconciledRecord};

/// Sort key assigned to records with no parseable date
///
/// Lexicographically below any real `YYYY-MM-DD`, so undated records
/// always sink to the end of a newest-first ordering.
pub const UNDATED_SORT_KEY: &str = "0000-00-00";

/// Annotate and order a batch of records
///
/// A record is new when its link is absent from `known`. Ordering is
/// newest first by date string; records with no date at all use the
/// undated sentinel. The sort is stable, so records sharing a sort key
/// keep their extraction order.
///
/// Returns the ordered batch and the count of new records.
#[must_use]
pub fn reconcile(
    records: Vec<PressRecord>,
    known: &HashSet<String>,
) -> (Vec<ReconciledRecord>, usize) {
    let mut reconciled: Vec<ReconciledRecord> = records
        .into_iter()
        .map(|record| {
            let is_new = !known.contains(&record.link);
            let sort_key = sort_key_for(&record.date);
            ReconciledRecord {
                record,
                is_new,
                sort_key,
            }
        })
        .collect();

    reconciled.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));

    let new_count = reconciled.iter().filter(|r| r.is_new).count();
    (reconciled, new_count)
}

/// Positions of new records within an ordered batch
#[must_use]
pub fn new_positions(records: &[ReconciledRecord]) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_new)
        .map(|(i, _)| i)
        .collect()
}

/// Non-empty dates order as-is; an absent date gets the sentinel
fn sort_key_for(date: &str) -> String {
    if date.is_empty() {
        UNDATED_SORT_KEY.to_string()
    } else {
        date.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str, date: &str) -> PressRecord {
        PressRecord {
            link: link.to_string(),
            title: "T".to_string(),
            date: date.to_string(),
            description: String::new(),
            category: "Press Release".to_string(),
        }
    }

    #[test]
    fn test_new_flag_tracks_known_set() {
        let known: HashSet<String> = ["https://example.com/newsroom/a".to_string()]
            .into_iter()
            .collect();
        let records = vec![
            record("https://example.com/newsroom/a", "2024-01-01"),
            record("https://example.com/newsroom/b", "2024-02-01"),
        ];

        let (reconciled, new_count) = reconcile(records, &known);

        assert_eq!(new_count, 1);
        let b = reconciled
            .iter()
            .find(|r| r.record.link.ends_with("/b"))
            .unwrap();
        assert!(b.is_new);
        let a = reconciled
            .iter()
            .find(|r| r.record.link.ends_with("/a"))
            .unwrap();
        assert!(!a.is_new);
    }

    #[test]
    fn test_ordered_newest_first() {
        let records = vec![
            record("https://example.com/newsroom/old", "2020-05-05"),
            record("https://example.com/newsroom/new", "2024-05-05"),
            record("https://example.com/newsroom/mid", "2022-05-05"),
        ];

        let (reconciled, _) = reconcile(records, &HashSet::new());
        let links: Vec<&str> = reconciled.iter().map(|r| r.record.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://example.com/newsroom/new",
                "https://example.com/newsroom/mid",
                "https://example.com/newsroom/old",
            ]
        );
    }

    #[test]
    fn test_undated_records_sink_to_end() {
        let records = vec![
            record("https://example.com/newsroom/undated", ""),
            record("https://example.com/newsroom/dated", "1999-01-01"),
        ];

        let (reconciled, _) = reconcile(records, &HashSet::new());
        assert_eq!(reconciled[0].record.link, "https://example.com/newsroom/dated");
        assert_eq!(reconciled[1].sort_key, UNDATED_SORT_KEY);
    }

    #[test]
    fn test_sentinel_below_any_real_date() {
        assert!(UNDATED_SORT_KEY < "1000-01-01");
    }

    #[test]
    fn test_ties_keep_extraction_order() {
        let records = vec![
            record("https://example.com/newsroom/first", "2024-01-01"),
            record("https://example.com/newsroom/second", "2024-01-01"),
            record("https://example.com/newsroom/third", "2024-01-01"),
        ];

        let (reconciled, _) = reconcile(records, &HashSet::new());
        let links: Vec<&str> = reconciled.iter().map(|r| r.record.link.as_str()).collect();
        assert_eq!(
            links,
            vec![
                "https://example.com/newsroom/first",
                "https://example.com/newsroom/second",
                "https://example.com/newsroom/third",
            ]
        );
    }

    #[test]
    fn test_empty_batch() {
        let (reconciled, new_count) = reconcile(vec![], &HashSet::new());
        assert!(reconciled.is_empty());
        assert_eq!(new_count, 0);
    }

    #[test]
    fn test_new_positions_after_ordering() {
        let known: HashSet<String> = ["https://example.com/newsroom/known".to_string()]
            .into_iter()
            .collect();
        let records = vec![
            record("https://example.com/newsroom/known", "2024-06-01"),
            record("https://example.com/newsroom/fresh", "2024-07-01"),
        ];

        let (reconciled, _) = reconcile(records, &known);
        // Fresh record sorts first by date
        assert_eq!(new_positions(&reconciled), vec![0]);
    }

}
