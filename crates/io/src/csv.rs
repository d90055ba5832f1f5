// CSV/TSV import, report export

use std::io::Read;
use std::path::Path;

use threadline_recon::model::{MatchResult, OUTPUT_COLUMNS};
use threadline_recon::ReconError;

use crate::table::RawTable;

pub fn import(path: &Path) -> Result<RawTable, ReconError> {
    let content = read_file_as_utf8(path)?;
    let delimiter = sniff_delimiter(&content);
    import_from_string(&content, delimiter)
        .map_err(|e| ReconError::source_read(path.display().to_string(), e))?
        .ok_or_else(|| ReconError::EmptySource(path.display().to_string()))
}

pub fn import_tsv(path: &Path) -> Result<RawTable, ReconError> {
    let content = read_file_as_utf8(path)?;
    import_from_string(&content, b'\t')
        .map_err(|e| ReconError::source_read(path.display().to_string(), e))?
        .ok_or_else(|| ReconError::EmptySource(path.display().to_string()))
}

/// Detect the most likely field delimiter by checking consistency across the first few lines.
///
/// For each candidate (tab, semicolon, comma, pipe), count fields per line. The delimiter
/// that produces the most consistent field count (>1 field) wins.
pub fn sniff_delimiter(content: &str) -> u8 {
    let candidates: &[u8] = &[b'\t', b';', b',', b'|'];
    let sample_lines: Vec<&str> = content.lines().filter(|l| !l.trim().is_empty()).take(10).collect();

    if sample_lines.is_empty() {
        return b',';
    }

    let mut best = b',';
    let mut best_score = 0u64;

    for &delim in candidates {
        let counts: Vec<usize> = sample_lines
            .iter()
            .map(|line| {
                csv::ReaderBuilder::new()
                    .delimiter(delim)
                    .has_headers(false)
                    .flexible(true)
                    .from_reader(line.as_bytes())
                    .records()
                    .next()
                    .and_then(|r| r.ok())
                    .map(|r| r.len())
                    .unwrap_or(1)
            })
            .collect();

        if counts.first().copied().unwrap_or(0) <= 1 {
            continue;
        }

        // More columns breaks ties
        let target = counts[0];
        let consistent = counts.iter().filter(|&&c| c == target).count() as u64;
        let score = consistent * target as u64;

        if score > best_score {
            best_score = score;
            best = delim;
        }
    }

    best
}

/// Read file and convert to UTF-8 if needed (Excel-exported CSVs are often Windows-1252).
pub fn read_file_as_utf8(path: &Path) -> Result<String, ReconError> {
    let shown = path.display().to_string();
    let mut file = std::fs::File::open(path).map_err(|e| ReconError::source_read(&shown, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| ReconError::source_read(&shown, e))?;

    let content = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            tracing::debug!(path = %shown, "not valid UTF-8, decoding as Windows-1252");
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };
    Ok(content.strip_prefix('\u{feff}').map(str::to_string).unwrap_or(content))
}

/// Parse delimited text. `Ok(None)` when there is no header row.
pub fn import_from_string(content: &str, delimiter: u8) -> Result<Option<RawTable>, csv::Error> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(RawTable::from_rows(rows))
}

/// Write the report as comma-separated text to `path`.
pub fn export_report(results: &[MatchResult], path: &Path) -> Result<(), String> {
    let mut writer = csv::WriterBuilder::new()
        .from_path(path)
        .map_err(|e| e.to_string())?;

    writer.write_record(OUTPUT_COLUMNS).map_err(|e| e.to_string())?;
    for result in results {
        let record: Vec<String> = result.cells().iter().map(|c| c.display()).collect();
        writer.write_record(&record).map_err(|e| e.to_string())?;
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}
