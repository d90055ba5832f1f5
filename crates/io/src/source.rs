// Schedule and production loading: file -> RawTable -> records

use std::path::Path;

use threadline_recon::columns::{AliasTable, ColumnIndex, Field, ProductionField, ScheduleField};
use threadline_recon::model::{ProductionRecord, Quantities, ScheduleRecord};
use threadline_recon::normalize::coerce_numeric;
use threadline_recon::{ReconError, StatusSink};

use crate::table::RawTable;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Tsv,
    Excel,
}

impl SourceFormat {
    pub fn from_path(path: &Path) -> Result<Self, ReconError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(Self::Csv),
            "tsv" => Ok(Self::Tsv),
            "xlsx" | "xlsm" | "xls" | "xlsb" | "ods" => Ok(Self::Excel),
            _ => Err(ReconError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read any supported file as a text table. `sheet` applies to workbooks
/// only (`None` = first sheet).
pub fn read_table(path: &Path, sheet: Option<&str>) -> Result<RawTable, ReconError> {
    match SourceFormat::from_path(path)? {
        SourceFormat::Csv => {
            if let Some(sheet) = sheet {
                tracing::debug!(sheet, "sheet ignored for delimited file");
            }
            crate::csv::import(path)
        }
        SourceFormat::Tsv => crate::csv::import_tsv(path),
        SourceFormat::Excel => crate::xlsx::import(path, sheet),
    }
}

/// Sheet names of a workbook; delimited files have none.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, ReconError> {
    match SourceFormat::from_path(path)? {
        SourceFormat::Csv | SourceFormat::Tsv => Ok(Vec::new()),
        SourceFormat::Excel => crate::xlsx::sheet_names(path),
    }
}

pub fn load_schedule(
    path: &Path,
    sheet: Option<&str>,
    aliases: &AliasTable<ScheduleField>,
    sink: &mut dyn StatusSink,
) -> Result<Vec<ScheduleRecord>, ReconError> {
    match sheet {
        Some(sheet) => sink.info(&format!("Loading schedule file: {} (sheet '{sheet}')", path.display())),
        None => sink.info(&format!("Loading schedule file: {}", path.display())),
    }
    let table = read_table(path, sheet)?;
    let records = project_schedule(&table, aliases, sink);
    sink.info(&format!("Loaded {} schedule rows", records.len()));
    Ok(records)
}

pub fn load_production(
    path: &Path,
    aliases: &AliasTable<ProductionField>,
    sink: &mut dyn StatusSink,
) -> Result<Vec<ProductionRecord>, ReconError> {
    sink.info(&format!("Loading production file: {}", path.display()));
    let table = read_table(path, None)?;
    let records = project_production(&table, aliases, sink);
    sink.info(&format!("Loaded {} production rows", records.len()));
    Ok(records)
}

/// Resolve headers and report each renamed column.
fn resolve_columns<F: Field>(
    table: &RawTable,
    aliases: &AliasTable<F>,
    sink: &mut dyn StatusSink,
) -> ColumnIndex<F> {
    let columns = aliases.resolve(&table.headers);
    for (source, canonical) in columns.mapped() {
        if source != canonical {
            sink.info(&format!("Mapped '{source}' to '{canonical}'"));
        }
    }
    columns
}

pub fn project_schedule(
    table: &RawTable,
    aliases: &AliasTable<ScheduleField>,
    sink: &mut dyn StatusSink,
) -> Vec<ScheduleRecord> {
    let columns = resolve_columns(table, aliases, sink);

    for &field in columns.missing() {
        if field == ScheduleField::Sl {
            sink.info("No 'SL' column in schedule file; numbering rows from 1");
        } else {
            sink.warn(&format!(
                "Column '{}' not found in schedule file; using empty values",
                field.canonical()
            ));
        }
    }

    let text = |row: &[String], field| columns.get(row, field).map(str::to_string);

    table
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| ScheduleRecord {
            sl: text(row, ScheduleField::Sl).unwrap_or_else(|| (i + 1).to_string()),
            job_no: text(row, ScheduleField::JobNo),
            order_no: text(row, ScheduleField::OrderNo),
            style_no: text(row, ScheduleField::StyleNo).unwrap_or_default(),
            color: text(row, ScheduleField::Color).unwrap_or_default(),
        })
        .collect()
}

pub fn project_production(
    table: &RawTable,
    aliases: &AliasTable<ProductionField>,
    sink: &mut dyn StatusSink,
) -> Vec<ProductionRecord> {
    let columns = resolve_columns(table, aliases, sink);

    for &field in columns.missing() {
        let describes = matches!(
            field,
            ProductionField::StyleName | ProductionField::ItemName | ProductionField::ShipDate
        );
        if describes {
            tracing::debug!(column = field.canonical(), "descriptive column absent from production file");
        } else {
            sink.warn(&format!(
                "Column '{}' not found in production file; values will be empty",
                field.canonical()
            ));
        }
    }

    let text = |row: &[String], field| columns.get(row, field).map(str::to_string);

    table
        .rows
        .iter()
        .map(|row| {
            let mut quantities = Quantities::default();
            for field in ProductionField::QUANTITIES {
                if let Some(cell) = columns.get(row, field) {
                    quantities.set(field, Some(coerce_numeric(Some(cell))));
                }
            }
            ProductionRecord {
                job_no: columns.get(row, ProductionField::JobNo).map(|s| s.trim().to_string()),
                order_no: text(row, ProductionField::OrderNo),
                quantities,
                style_name: text(row, ProductionField::StyleName),
                item_name: text(row, ProductionField::ItemName),
                ship_date: text(row, ProductionField::ShipDate),
            }
        })
        .collect()
}
