//! Column alias tables.
//!
//! Source files label the same field differently (`JOB NO`, `Job No`,
//! `JOB_NUMBER`). Each canonical field carries an ordered alias list; the
//! first alias present in a header row wins. Resolution happens once per
//! dataset, after which records are column-name independent.

use std::collections::HashMap;
use std::hash::Hash;

use serde::Deserialize;

/// A canonical field of one dataset.
pub trait Field: Copy + Eq + Hash + 'static {
    /// Every field, in display order.
    const ALL: &'static [Self];

    /// Canonical column name.
    fn canonical(self) -> &'static str;

    /// Built-in accepted header names, in priority order.
    fn default_aliases(self) -> &'static [&'static str];
}

// ---------------------------------------------------------------------------
// Schedule
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleField {
    Sl,
    JobNo,
    OrderNo,
    StyleNo,
    Color,
}

impl Field for ScheduleField {
    const ALL: &'static [Self] = &[Self::Sl, Self::JobNo, Self::OrderNo, Self::StyleNo, Self::Color];

    fn canonical(self) -> &'static str {
        match self {
            Self::Sl => "SL",
            Self::JobNo => "JOB NO",
            Self::OrderNo => "Order No",
            Self::StyleNo => "STYLE NO",
            Self::Color => "COLOR",
        }
    }

    fn default_aliases(self) -> &'static [&'static str] {
        match self {
            Self::Sl => &["SL", "Sl", "SL No", "S/L"],
            Self::JobNo => &["JOB NO", "Job No", "JOB_NUMBER"],
            Self::OrderNo => &["Order No", "ORDER NO", "PO No"],
            Self::StyleNo => &["Style", "STYLE", "Style No", "STYLE NO"],
            Self::Color => &["Color", "COLOR", "Colour"],
        }
    }
}

// ---------------------------------------------------------------------------
// Production
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductionField {
    JobNo,
    OrderNo,
    OrderQty,
    PlanCutQty,
    TotalCutQty,
    CuttingBalance,
    SewInput,
    SewOutput,
    Iron,
    PackingFinish,
    ShipOut,
    StyleName,
    ItemName,
    ShipDate,
}

impl Field for ProductionField {
    const ALL: &'static [Self] = &[
        Self::JobNo,
        Self::OrderNo,
        Self::OrderQty,
        Self::PlanCutQty,
        Self::TotalCutQty,
        Self::CuttingBalance,
        Self::SewInput,
        Self::SewOutput,
        Self::Iron,
        Self::PackingFinish,
        Self::ShipOut,
        Self::StyleName,
        Self::ItemName,
        Self::ShipDate,
    ];

    fn canonical(self) -> &'static str {
        match self {
            Self::JobNo => "Job No",
            Self::OrderNo => "Order No",
            Self::OrderQty => "Order Qty.",
            Self::PlanCutQty => "Plan Cut Qty",
            Self::TotalCutQty => "Total Cut Qty",
            Self::CuttingBalance => "Cutting balance",
            Self::SewInput => "Total Sew Input Qty",
            Self::SewOutput => "Total Sew Output Qty",
            Self::Iron => "Total Iron Qty",
            Self::PackingFinish => "Total Packing Finish Qty",
            Self::ShipOut => "Total Ship Out",
            Self::StyleName => "Style Name",
            Self::ItemName => "Item Name",
            Self::ShipDate => "Ship Date",
        }
    }

    fn default_aliases(self) -> &'static [&'static str] {
        match self {
            Self::JobNo => &["Job No", "JOB NO", "job no", "Job_No"],
            Self::OrderNo => &["Order No", "ORDER NO", "Order_No"],
            Self::OrderQty => &["Order Qty.", "ORDER QTY", "Qty"],
            Self::PlanCutQty => &["Plan Cut Qty", "PLAN CUT QTY"],
            Self::TotalCutQty => &["Total Cut Qty", "TOTAL CUT QTY"],
            Self::CuttingBalance => &["Cutting balance", "CUTTING BALANCE"],
            Self::SewInput => &["Total Sew Input Qty", "TOTAL SEW INPUT"],
            Self::SewOutput => &["Total Sew Output Qty", "TOTAL SEW OUTPUT"],
            Self::Iron => &["Total Iron Qty", "TOTAL IRON QTY"],
            Self::PackingFinish => &["Total Packing Finish Qty", "TOTAL PACKING FINISH"],
            Self::ShipOut => &["Total Ship Out", "TOTAL SHIP OUT"],
            Self::StyleName => &["Style Name", "STYLE NAME", "Style"],
            Self::ItemName => &["Item Name", "ITEM NAME", "Item"],
            Self::ShipDate => &["Ship Date", "SHIP DATE", "Ex-Factory Date"],
        }
    }
}

impl ProductionField {
    /// The nine quantity fields, in report order.
    pub const QUANTITIES: [Self; 9] = [
        Self::OrderQty,
        Self::PlanCutQty,
        Self::TotalCutQty,
        Self::CuttingBalance,
        Self::SewInput,
        Self::SewOutput,
        Self::Iron,
        Self::PackingFinish,
        Self::ShipOut,
    ];
}

// ---------------------------------------------------------------------------
// Alias table + resolution
// ---------------------------------------------------------------------------

/// Accepted header names per field: built-ins first, then configured extras.
#[derive(Debug, Clone)]
pub struct AliasTable<F: Field> {
    aliases: HashMap<F, Vec<String>>,
}

impl<F: Field> Default for AliasTable<F> {
    fn default() -> Self {
        let aliases = F::ALL
            .iter()
            .map(|&f| (f, f.default_aliases().iter().map(|a| a.to_string()).collect()))
            .collect();
        Self { aliases }
    }
}

impl<F: Field> AliasTable<F> {
    /// Built-in table extended with extra aliases. Extras are tried after
    /// the built-ins and duplicates are ignored.
    pub fn with_extra(extra: &HashMap<F, Vec<String>>) -> Self {
        let mut table = Self::default();
        for (field, names) in extra {
            let list = table.aliases.entry(*field).or_default();
            for name in names {
                let name = name.trim();
                if !name.is_empty() && !list.iter().any(|a| a == name) {
                    list.push(name.to_string());
                }
            }
        }
        table
    }

    pub fn aliases(&self, field: F) -> &[String] {
        self.aliases.get(&field).map(|v| v.as_slice()).unwrap_or(&[])
    }

    /// Map each field to the position of its first alias present in `headers`.
    /// Header comparison is exact after trimming surrounding whitespace.
    pub fn resolve(&self, headers: &[String]) -> ColumnIndex<F> {
        let mut positions = HashMap::new();
        let mut sources = HashMap::new();
        let mut missing = Vec::new();

        for &field in F::ALL {
            let found = self.aliases(field).iter().find_map(|alias| {
                headers
                    .iter()
                    .position(|h| h.trim() == alias)
                    .map(|pos| (pos, alias.clone()))
            });
            match found {
                Some((pos, alias)) => {
                    positions.insert(field, pos);
                    sources.insert(field, alias);
                }
                None => missing.push(field),
            }
        }

        ColumnIndex { positions, sources, missing }
    }
}

/// Result of resolving an alias table against one header row.
#[derive(Debug, Clone)]
pub struct ColumnIndex<F: Field> {
    positions: HashMap<F, usize>,
    sources: HashMap<F, String>,
    missing: Vec<F>,
}

impl<F: Field> ColumnIndex<F> {
    pub fn position(&self, field: F) -> Option<usize> {
        self.positions.get(&field).copied()
    }

    pub fn has(&self, field: F) -> bool {
        self.positions.contains_key(&field)
    }

    /// Header name that satisfied `field`, if any.
    pub fn source(&self, field: F) -> Option<&str> {
        self.sources.get(&field).map(|s| s.as_str())
    }

    /// Fields with no matching header, in `F::ALL` order.
    pub fn missing(&self) -> &[F] {
        &self.missing
    }

    /// Resolved (source header, canonical name) pairs in `F::ALL` order.
    pub fn mapped(&self) -> Vec<(&str, &'static str)> {
        F::ALL
            .iter()
            .filter_map(|&f| self.source(f).map(|s| (s, f.canonical())))
            .collect()
    }

    /// Cell for `field` in `row`; `None` when the column is absent.
    /// Short rows yield `Some("")` for columns that exist in the header.
    pub fn get<'r>(&self, row: &'r [String], field: F) -> Option<&'r str> {
        self.position(field)
            .map(|pos| row.get(pos).map(|s| s.as_str()).unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn first_alias_present_wins() {
        // Both "Style" and "STYLE NO" exist; "Style" is earlier in the alias list.
        let h = headers(&["STYLE NO", "Style", "JOB NO"]);
        let idx = AliasTable::<ScheduleField>::default().resolve(&h);
        assert_eq!(idx.position(ScheduleField::StyleNo), Some(1));
        assert_eq!(idx.source(ScheduleField::StyleNo), Some("Style"));
        assert_eq!(idx.position(ScheduleField::JobNo), Some(2));
    }

    #[test]
    fn missing_fields_are_reported_in_order() {
        let h = headers(&["Job No", "PO No"]);
        let idx = AliasTable::<ScheduleField>::default().resolve(&h);
        assert_eq!(
            idx.missing(),
            &[ScheduleField::Sl, ScheduleField::StyleNo, ScheduleField::Color]
        );
        assert_eq!(
            idx.mapped(),
            vec![("Job No", "JOB NO"), ("PO No", "Order No")]
        );
    }

    #[test]
    fn headers_are_trimmed_before_comparison() {
        let h = headers(&["  Job No ", "Order No"]);
        let idx = AliasTable::<ProductionField>::default().resolve(&h);
        assert_eq!(idx.position(ProductionField::JobNo), Some(0));
    }

    #[test]
    fn extra_aliases_extend_builtins() {
        let extra = HashMap::from([(ProductionField::SewOutput, vec!["Sewing Out".to_string()])]);
        let table = AliasTable::with_extra(&extra);
        assert_eq!(
            table.aliases(ProductionField::SewOutput),
            &["Total Sew Output Qty", "TOTAL SEW OUTPUT", "Sewing Out"]
        );

        let h = headers(&["Job No", "Sewing Out"]);
        let idx = table.resolve(&h);
        assert_eq!(idx.position(ProductionField::SewOutput), Some(1));
    }

    #[test]
    fn get_distinguishes_absent_column_from_short_row() {
        let h = headers(&["Job No", "Order No", "Order Qty."]);
        let idx = AliasTable::<ProductionField>::default().resolve(&h);
        let row = vec!["196".to_string(), "ABC-1".to_string()];
        assert_eq!(idx.get(&row, ProductionField::JobNo), Some("196"));
        assert_eq!(idx.get(&row, ProductionField::OrderQty), Some(""));
        assert_eq!(idx.get(&row, ProductionField::ShipOut), None);
    }
}
