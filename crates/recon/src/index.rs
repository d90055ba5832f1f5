use std::collections::HashMap;

use crate::model::ProductionRecord;
use crate::normalize::{normalize_order_key, normalize_production_job_key};

/// Two-level lookup: job key → order key → production row.
///
/// Built once from the production rows it borrows; read-only afterwards.
#[derive(Debug, Default)]
pub struct LookupIndex<'a> {
    jobs: HashMap<String, HashMap<String, &'a ProductionRecord>>,
    inserted: usize,
    overwritten: usize,
    skipped: usize,
}

impl<'a> LookupIndex<'a> {
    pub fn get(&self, job_key: &str, order_key: &str) -> Option<&'a ProductionRecord> {
        self.jobs.get(job_key)?.get(order_key).copied()
    }

    pub fn contains_job(&self, job_key: &str) -> bool {
        self.jobs.contains_key(job_key)
    }

    pub fn job_count(&self) -> usize {
        self.jobs.len()
    }

    /// Distinct (job, order) pairs held.
    pub fn entry_count(&self) -> usize {
        self.jobs.values().map(HashMap::len).sum()
    }

    /// Rows accepted during the build, including ones later overwritten.
    pub fn inserted(&self) -> usize {
        self.inserted
    }

    /// Rows that replaced an earlier row with the same (job, order).
    pub fn overwritten(&self) -> usize {
        self.overwritten
    }

    /// Rows dropped because no job key could be extracted.
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}

/// Index production rows by (job key, order key). Rows with an empty job key
/// are skipped; a later row with the same pair replaces the earlier one.
pub fn build_index(rows: &[ProductionRecord]) -> LookupIndex<'_> {
    let mut index = LookupIndex::default();

    for row in rows {
        let job_key = normalize_production_job_key(row.job_no.as_deref());
        if job_key.is_empty() {
            index.skipped += 1;
            continue;
        }
        let order_key = normalize_order_key(row.order_no.as_deref());

        let orders = index.jobs.entry(job_key).or_default();
        if let Some(previous) = orders.insert(order_key, row) {
            index.overwritten += 1;
            tracing::debug!(
                job = ?previous.job_no,
                order = ?previous.order_no,
                "duplicate production row replaced by a later one"
            );
        }
        index.inserted += 1;
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quantities;

    fn prod(job: &str, order: &str, qty: f64) -> ProductionRecord {
        ProductionRecord {
            job_no: Some(job.into()),
            order_no: Some(order.into()),
            quantities: Quantities {
                order_qty: Some(qty),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[test]
    fn indexes_by_job_and_order() {
        let rows = vec![
            prod("196", "ABC-1", 100.0),
            prod("196", "abc-2 ", 50.0),
            prod("SGL-25-00202", "X", 10.0),
        ];
        let index = build_index(&rows);
        assert_eq!(index.job_count(), 2);
        assert_eq!(index.entry_count(), 3);
        assert_eq!(index.get("196", "ABC-2").unwrap().quantities.order_qty, Some(50.0));
        assert!(index.get("202", "X").is_some());
        assert!(index.get("196", "X").is_none());
    }

    #[test]
    fn last_duplicate_wins() {
        let rows = vec![prod("196", "ABC-1", 100.0), prod("0196", " abc-1", 120.0)];
        let index = build_index(&rows);
        assert_eq!(index.entry_count(), 1);
        assert_eq!(index.inserted(), 2);
        assert_eq!(index.overwritten(), 1);
        assert_eq!(index.get("196", "ABC-1").unwrap().quantities.order_qty, Some(120.0));
    }

    #[test]
    fn rows_without_job_key_are_skipped() {
        let mut blank = prod("", "A", 1.0);
        blank.job_no = None;
        let rows = vec![blank, prod("000", "B", 1.0), prod("7", "C", 1.0)];
        let index = build_index(&rows);
        assert_eq!(index.skipped(), 2);
        assert_eq!(index.job_count(), 1);
    }

    #[test]
    fn empty_input_builds_empty_index() {
        let index = build_index(&[]);
        assert!(index.is_empty());
        assert_eq!(index.entry_count(), 0);
    }
}
