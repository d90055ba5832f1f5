// Report output: xlsx or csv, written atomically

use std::path::{Path, PathBuf};

use threadline_recon::config::ReportConfig;
use threadline_recon::model::MatchResult;
use threadline_recon::{ReconError, StatusSink};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Xlsx,
    Csv,
}

impl ReportFormat {
    /// `.csv` writes delimited text; anything else is a workbook.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Self::Csv,
            _ => Self::Xlsx,
        }
    }
}

/// Sibling temp path: `report.xlsx` -> `report.xlsx.tmp`.
fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write the report to `path`. The file only appears once it is complete:
/// output goes to a temp file beside it and is renamed into place.
pub fn write_report(
    results: &[MatchResult],
    path: &Path,
    config: &ReportConfig,
    sink: &mut dyn StatusSink,
) -> Result<(), ReconError> {
    sink.phase("Saving Results");
    let shown = path.display().to_string();
    let tmp_path = temp_path(path);

    let written = match ReportFormat::from_path(path) {
        ReportFormat::Xlsx => crate::xlsx::export_report(results, &tmp_path, config),
        ReportFormat::Csv => crate::csv::export_report(results, &tmp_path),
    };

    let renamed = written.and_then(|()| {
        std::fs::rename(&tmp_path, path).map_err(|e| format!("failed to rename temp file: {e}"))
    });

    if let Err(message) = renamed {
        // Nothing partial may be left looking like a report.
        let _ = std::fs::remove_file(&tmp_path);
        return Err(ReconError::sink_write(shown, message));
    }

    sink.info(&format!("Saved {} rows to {shown}", results.len()));
    Ok(())
}
