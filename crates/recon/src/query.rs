//! Ad hoc "which orders belong to this job" lookup.
//!
//! A linear scan over the raw production rows; it does not use the
//! [`LookupIndex`](crate::index::LookupIndex), so duplicate (job, order)
//! rows are all returned.

use serde::Serialize;

use crate::model::{format_number, ProductionRecord};
use crate::normalize::{normalize_production_job_key, zero_pad};
use crate::status::StatusSink;

/// Width used by the zero-padded fallback comparison.
pub const FALLBACK_PAD_WIDTH: usize = 3;

/// Which comparison produced the result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    Exact,
    ZeroPadded,
}

#[derive(Debug, Clone)]
pub struct JobQuery<'a> {
    pub input: String,
    pub search_key: String,
    /// `None` when nothing matched.
    pub mode: Option<QueryMode>,
    pub rows: Vec<&'a ProductionRecord>,
}

impl JobQuery<'_> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// All production rows for `job_input`, in dataset order.
///
/// The input is reduced with the production-side rule. Rows are compared by
/// their trimmed job text; only when that finds nothing are both sides
/// zero-padded to three characters and compared again.
pub fn find_job_pos<'a>(
    rows: &'a [ProductionRecord],
    job_input: &str,
    sink: &mut dyn StatusSink,
) -> JobQuery<'a> {
    sink.phase("Job Lookup");
    sink.info(&format!("Searching for job: {job_input}"));

    let search_key = normalize_production_job_key(Some(job_input));
    sink.info(&format!("Extracted search job number: '{search_key}'"));

    let mut query = JobQuery {
        input: job_input.to_string(),
        search_key: search_key.clone(),
        mode: None,
        rows: Vec::new(),
    };

    if search_key.is_empty() {
        sink.info("No job number extracted");
        return query;
    }

    let exact: Vec<&ProductionRecord> = rows.iter().filter(|r| r.job_str() == search_key).collect();
    sink.info(&format!("Found {} matching rows for job '{search_key}'", exact.len()));

    if !exact.is_empty() {
        query.mode = Some(QueryMode::Exact);
        query.rows = exact;
        return query;
    }

    let padded_key = zero_pad(&search_key, FALLBACK_PAD_WIDTH);
    let padded: Vec<&ProductionRecord> = rows
        .iter()
        .filter(|r| zero_pad(r.job_str(), FALLBACK_PAD_WIDTH) == padded_key)
        .collect();
    sink.info(&format!("Found {} matching rows with zero-padded match", padded.len()));

    if padded.is_empty() {
        sink.info(&format!("No matches found for job: {job_input}"));
    } else {
        query.mode = Some(QueryMode::ZeroPadded);
        query.rows = padded;
    }
    query
}

// ---------------------------------------------------------------------------
// Display projection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayColumn {
    #[serde(rename = "Job No")]
    JobNo,
    #[serde(rename = "Order No")]
    OrderNo,
    #[serde(rename = "Style Name")]
    StyleName,
    #[serde(rename = "Item Name")]
    ItemName,
    #[serde(rename = "Order Qty.")]
    OrderQty,
    #[serde(rename = "Ship Date")]
    ShipDate,
}

impl DisplayColumn {
    pub const PREFERRED: [Self; 5] = [
        Self::OrderNo,
        Self::StyleName,
        Self::ItemName,
        Self::OrderQty,
        Self::ShipDate,
    ];

    pub fn header(self) -> &'static str {
        match self {
            Self::JobNo => "Job No",
            Self::OrderNo => "Order No",
            Self::StyleName => "Style Name",
            Self::ItemName => "Item Name",
            Self::OrderQty => "Order Qty.",
            Self::ShipDate => "Ship Date",
        }
    }

    /// Cell text, or `None` when the column is absent for this row.
    fn value(self, row: &ProductionRecord) -> Option<String> {
        match self {
            Self::JobNo => row.job_no.clone(),
            Self::OrderNo => row.order_no.clone(),
            Self::StyleName => row.style_name.clone(),
            Self::ItemName => row.item_name.clone(),
            Self::OrderQty => row.quantities.order_qty.map(format_number),
            Self::ShipDate => row.ship_date.clone(),
        }
    }
}

/// Columns to show for a query result: the preferred set restricted to what
/// the production data carries, falling back to job and order numbers.
pub fn display_columns(rows: &[ProductionRecord], sink: &mut dyn StatusSink) -> Vec<DisplayColumn> {
    let present = |col: DisplayColumn| rows.iter().any(|r| col.value(r).is_some());

    let mut columns = Vec::new();
    for col in DisplayColumn::PREFERRED {
        if present(col) {
            columns.push(col);
        } else {
            sink.warn(&format!("No column found for '{}'", col.header()));
        }
    }

    if columns.is_empty() {
        sink.info("No display columns found, returning basic info");
        columns.push(DisplayColumn::JobNo);
        if present(DisplayColumn::OrderNo) {
            columns.push(DisplayColumn::OrderNo);
        }
    }
    columns
}

/// Project query rows onto `columns`; absent cells render empty.
pub fn display_rows(query: &JobQuery<'_>, columns: &[DisplayColumn]) -> Vec<Vec<String>> {
    query
        .rows
        .iter()
        .map(|row| columns.iter().map(|c| c.value(row).unwrap_or_default()).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Quantities;
    use crate::status::{CollectingSink, NullSink};

    fn prod(job: &str, order: &str) -> ProductionRecord {
        ProductionRecord {
            job_no: Some(job.into()),
            order_no: Some(order.into()),
            ..Default::default()
        }
    }

    #[test]
    fn exact_match_on_trimmed_job_text() {
        let rows = vec![prod("196", "A"), prod(" 196 ", "B"), prod("202", "C")];
        let q = find_job_pos(&rows, "SGL-25-00196", &mut NullSink);
        assert_eq!(q.search_key, "196");
        assert_eq!(q.mode, Some(QueryMode::Exact));
        let orders: Vec<_> = q.rows.iter().map(|r| r.order_no.as_deref().unwrap()).collect();
        assert_eq!(orders, vec!["A", "B"]);
    }

    #[test]
    fn zero_padded_fallback_recovers_leading_zero_jobs() {
        let rows = vec![prod("007", "A"), prod("70", "B")];
        let q = find_job_pos(&rows, "7", &mut NullSink);
        assert_eq!(q.mode, Some(QueryMode::ZeroPadded));
        assert_eq!(q.rows.len(), 1);
        assert_eq!(q.rows[0].order_no.as_deref(), Some("A"));
    }

    #[test]
    fn fallback_only_runs_when_exact_is_empty() {
        // "7" matches exactly, so "007" must not be pulled in by the fallback.
        let rows = vec![prod("7", "A"), prod("007", "B")];
        let q = find_job_pos(&rows, "7", &mut NullSink);
        assert_eq!(q.mode, Some(QueryMode::Exact));
        assert_eq!(q.rows.len(), 1);
    }

    #[test]
    fn duplicates_are_all_returned() {
        let rows = vec![prod("196", "A"), prod("196", "A")];
        let q = find_job_pos(&rows, "196", &mut NullSink);
        assert_eq!(q.rows.len(), 2);
    }

    #[test]
    fn empty_key_returns_nothing() {
        let rows = vec![prod("0", "A")];
        let mut sink = CollectingSink::new();
        let q = find_job_pos(&rows, "000", &mut sink);
        assert!(q.is_empty());
        assert_eq!(q.mode, None);
        assert!(sink.contains("No job number extracted"));
    }

    #[test]
    fn no_match_is_empty_not_error() {
        let rows = vec![prod("196", "A")];
        let q = find_job_pos(&rows, "999", &mut NullSink);
        assert!(q.is_empty());
        assert_eq!(q.mode, None);
    }

    #[test]
    fn display_projection_warns_on_missing_columns() {
        let mut row = prod("196", "ABC-1");
        row.style_name = Some("Polo".into());
        row.quantities = Quantities { order_qty: Some(100.0), ..Default::default() };
        let rows = vec![row];

        let mut sink = CollectingSink::new();
        let cols = display_columns(&rows, &mut sink);
        assert_eq!(
            cols,
            vec![DisplayColumn::OrderNo, DisplayColumn::StyleName, DisplayColumn::OrderQty]
        );
        assert_eq!(sink.warnings().count(), 2);

        let q = find_job_pos(&rows, "196", &mut NullSink);
        let table = display_rows(&q, &cols);
        assert_eq!(table, vec![vec!["ABC-1".to_string(), "Polo".into(), "100".into()]]);
    }

    #[test]
    fn display_projection_falls_back_to_job_number() {
        let rows = vec![ProductionRecord {
            job_no: Some("196".into()),
            ..Default::default()
        }];
        let cols = display_columns(&rows, &mut NullSink);
        assert_eq!(cols, vec![DisplayColumn::JobNo]);
    }
}
