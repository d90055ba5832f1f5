use serde::Serialize;
use thiserror::Error;

/// Fatal failures of a reconciliation run.
///
/// Missing columns, unparseable quantities and empty job keys are not errors:
/// they are reported on the status channel (or coerced silently) and the run
/// continues.
#[derive(Debug, Error)]
pub enum ReconError {
    /// TOML parse / deserialization error.
    #[error("config parse error: {0}")]
    ConfigParse(String),
    /// Config validation error (empty sheet name, zero column width, etc.).
    #[error("config validation error: {0}")]
    ConfigValidation(String),
    /// Config file named explicitly but missing or unreadable.
    #[error("cannot read config {path}: {message}")]
    ConfigRead { path: String, message: String },
    /// Source dataset could not be opened or decoded.
    #[error("cannot read {path}: {message}")]
    SourceRead { path: String, message: String },
    /// Requested sheet is not present in the workbook.
    #[error("sheet '{sheet}' not found (available: {})", available.join(", "))]
    SheetNotFound { sheet: String, available: Vec<String> },
    /// File extension is not a supported tabular format.
    #[error("unsupported file format: {0} (expected .csv, .tsv, .xlsx, .xls, .xlsb or .ods)")]
    UnsupportedFormat(String),
    /// Source has no header row.
    #[error("{0} contains no header row")]
    EmptySource(String),
    /// Report could not be written.
    #[error("cannot write {path}: {message}")]
    SinkWrite { path: String, message: String },
}

impl ReconError {
    pub fn source_read(path: impl Into<String>, message: impl ToString) -> Self {
        Self::SourceRead { path: path.into(), message: message.to_string() }
    }

    pub fn config_read(path: impl Into<String>, message: impl ToString) -> Self {
        Self::ConfigRead { path: path.into(), message: message.to_string() }
    }

    /// Prefix a config parse or validation message with the file it came from.
    pub fn in_config_file(self, path: &str) -> Self {
        match self {
            Self::ConfigParse(m) => Self::ConfigParse(format!("{path}: {m}")),
            Self::ConfigValidation(m) => Self::ConfigValidation(format!("{path}: {m}")),
            other => other,
        }
    }

    pub fn sink_write(path: impl Into<String>, message: impl ToString) -> Self {
        Self::SinkWrite { path: path.into(), message: message.to_string() }
    }

    /// Stable machine-readable error kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigParse(_) => "config_parse",
            Self::ConfigValidation(_) => "config_validation",
            Self::ConfigRead { .. } => "config_read",
            Self::SourceRead { .. } => "source_read_failure",
            Self::SheetNotFound { .. } => "sheet_not_found",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::EmptySource(_) => "empty_source",
            Self::SinkWrite { .. } => "sink_write_failure",
        }
    }

    /// Structured failure (kind + message) for callers that report failures
    /// as data rather than text.
    pub fn to_failure(&self) -> FailureReport {
        FailureReport {
            kind: self.kind(),
            message: self.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FailureReport {
    pub kind: &'static str,
    pub message: String,
}
