/// A sheet read as text: one header row and the data rows below it.
///
/// Rows may be shorter than the header; missing trailing cells read as empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Build from rows of cells. Leading blank rows are skipped, the first
    /// non-blank row becomes the header and blank data rows are dropped.
    /// Returns `None` when there is no non-blank row at all.
    pub fn from_rows<I>(rows: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec<String>>,
    {
        let mut rows = rows.into_iter().filter(|r| !is_blank(r));
        let headers = rows.next()?.into_iter().map(|h| h.trim().to_string()).collect();
        Some(Self {
            headers,
            rows: rows.collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn is_blank(row: &[String]) -> bool {
    row.iter().all(|c| c.trim().is_empty())
}
