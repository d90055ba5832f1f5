// Excel import (xlsx, xls, xlsb, ods), report export

use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader, Sheets};
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook as XlsxWorkbook};

use threadline_recon::config::ReportConfig;
use threadline_recon::model::{MatchResult, ReportCell, OUTPUT_COLUMNS};
use threadline_recon::ReconError;

use crate::table::RawTable;

/// Header fill of the report sheet.
const HEADER_FILL: u32 = 0xD3D3D3;

fn open(path: &Path) -> Result<Sheets<std::io::BufReader<std::fs::File>>, ReconError> {
    open_workbook_auto(path)
        .map_err(|e| ReconError::source_read(path.display().to_string(), format!("failed to open Excel file: {e}")))
}

/// Sheet names in workbook order.
pub fn sheet_names(path: &Path) -> Result<Vec<String>, ReconError> {
    Ok(open(path)?.sheet_names().to_vec())
}

/// Read one sheet as text. `None` picks the first sheet.
pub fn import(path: &Path, sheet: Option<&str>) -> Result<RawTable, ReconError> {
    let shown = path.display().to_string();
    let mut workbook = open(path)?;
    let names: Vec<String> = workbook.sheet_names().to_vec();

    let name = match sheet {
        Some(wanted) => names
            .iter()
            .find(|n| n.as_str() == wanted)
            .cloned()
            .ok_or_else(|| ReconError::SheetNotFound {
                sheet: wanted.to_string(),
                available: names.clone(),
            })?,
        None => names
            .first()
            .cloned()
            .ok_or_else(|| ReconError::source_read(&shown, "workbook contains no sheets"))?,
    };

    let range = workbook
        .worksheet_range(&name)
        .map_err(|e| ReconError::source_read(&shown, format!("failed to read sheet '{name}': {e}")))?;
    tracing::debug!(path = %shown, sheet = %name, size = ?range.get_size(), "read sheet");

    // Range may not begin at A1; pad on the left so column positions hold.
    let (_, start_col) = range.start().unwrap_or((0, 0));
    let rows = range.rows().map(|row| {
        let mut cells: Vec<String> = vec![String::new(); start_col as usize];
        cells.extend(row.iter().map(cell_to_string));
        cells
    });

    RawTable::from_rows(rows).ok_or(ReconError::EmptySource(shown))
}

/// Text form of a cell: integral floats without decimals, date serials as
/// `YYYY-MM-DD` (with a time part only when one is present).
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(n) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{}", *n as i64)
            } else {
                format!("{}", n)
            }
        }
        Data::Int(n) => format!("{}", n),
        Data::Bool(b) => (if *b { "TRUE" } else { "FALSE" }).to_string(),
        Data::Error(e) => format!("#{:?}", e),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            serial_to_date_string(serial).unwrap_or_else(|| format!("{}", serial))
        }
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
    }
}

/// Excel 1900-system serial to text. Serials before 1900-03-01 are off by a
/// day because of the 1900 leap-year bug; ship dates never fall there.
fn serial_to_date_string(serial: f64) -> Option<String> {
    if !serial.is_finite() || serial < 1.0 {
        return None;
    }
    let epoch = chrono::NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let date = epoch.checked_add_days(chrono::Days::new(serial.floor() as u64))?;

    let secs = (serial.fract() * 86_400.0).round() as u32;
    if secs == 0 || secs >= 86_400 {
        return Some(date.format("%Y-%m-%d").to_string());
    }
    let time = chrono::NaiveTime::from_num_seconds_from_midnight_opt(secs, 0)?;
    Some(date.and_time(time).format("%Y-%m-%d %H:%M:%S").to_string())
}

/// Width of each report column: the longest of header and cells, plus two,
/// capped at `max_width`.
pub fn column_widths(results: &[MatchResult], max_width: usize) -> Vec<usize> {
    let mut widths: Vec<usize> = OUTPUT_COLUMNS.iter().map(|h| h.chars().count()).collect();
    for result in results {
        for (w, cell) in widths.iter_mut().zip(result.cells().iter()) {
            *w = (*w).max(cell.display().chars().count());
        }
    }
    widths.into_iter().map(|w| (w + 2).min(max_width)).collect()
}

/// Write the report as a single styled sheet.
pub fn export_report(results: &[MatchResult], path: &Path, config: &ReportConfig) -> Result<(), String> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook
        .add_worksheet()
        .set_name(&config.sheet_name)
        .map_err(|e| format!("Failed to create sheet '{}': {}", config.sheet_name, e))?;

    let header_format = Format::new()
        .set_bold()
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_border(FormatBorder::Thin);
    let cell_format = Format::new().set_border(FormatBorder::Thin);

    for (col, header) in OUTPUT_COLUMNS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| format!("Failed to write header '{}': {}", header, e))?;
    }

    for (i, result) in results.iter().enumerate() {
        let row = (i + 1) as u32;
        for (col, cell) in result.cells().iter().enumerate() {
            let col = col as u16;
            let written = match cell {
                ReportCell::Text(s) => worksheet.write_string_with_format(row, col, s, &cell_format),
                ReportCell::Number(n) => worksheet.write_number_with_format(row, col, *n, &cell_format),
                ReportCell::Empty => worksheet.write_blank(row, col, &cell_format),
            };
            written.map_err(|e| format!("Failed to write cell ({}, {}): {}", row, col, e))?;
        }
    }

    for (col, width) in column_widths(results, config.max_column_width).into_iter().enumerate() {
        worksheet
            .set_column_width(col as u16, width as f64)
            .map_err(|e| format!("Failed to set column {} width: {}", col, e))?;
    }

    worksheet
        .set_freeze_panes(1, 0)
        .map_err(|e| format!("Failed to set freeze panes: {}", e))?;

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save XLSX file: {}", e))?;
    Ok(())
}
