//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract; scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | merge            | Reconciliation outcome codes             |
//! | 10-19   | source / config  | Input and configuration failures         |
//! | 20-29   | output           | Report write failures                    |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant in the appropriate range
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `recon_exit_code` or the relevant command

use threadline_recon::{FailureReport, ReconError};

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Merge (3-9)
// =============================================================================

/// `merge --strict` and at least one schedule row was unmatched.
/// The report is still written.
pub const EXIT_MERGE_UNMATCHED: u8 = 3;

// =============================================================================
// Source / config (10-19)
// =============================================================================

/// Schedule or production file could not be opened or decoded.
pub const EXIT_SOURCE_READ: u8 = 10;

/// `--sheet` names a sheet the workbook does not have.
pub const EXIT_SHEET_NOT_FOUND: u8 = 11;

/// File extension is not a supported tabular format.
pub const EXIT_UNSUPPORTED_FORMAT: u8 = 12;

/// Source file has no header row.
pub const EXIT_EMPTY_SOURCE: u8 = 13;

/// Config file missing, unparseable or invalid.
pub const EXIT_CONFIG_INVALID: u8 = 14;

// =============================================================================
// Output (20-29)
// =============================================================================

/// Report (or config template) could not be written. No partial file is left.
pub const EXIT_SINK_WRITE: u8 = 20;

/// Map a ReconError to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) | ReconError::ConfigRead { .. } => {
            EXIT_CONFIG_INVALID
        }
        ReconError::SourceRead { .. } => EXIT_SOURCE_READ,
        ReconError::SheetNotFound { .. } => EXIT_SHEET_NOT_FOUND,
        ReconError::UnsupportedFormat(_) => EXIT_UNSUPPORTED_FORMAT,
        ReconError::EmptySource(_) => EXIT_EMPTY_SOURCE,
        ReconError::SinkWrite { .. } => EXIT_SINK_WRITE,
    }
}

/// Structured error output for `--json` commands.
#[derive(Debug, serde::Serialize)]
pub struct ErrorOutput {
    #[serde(flatten)]
    pub failure: FailureReport,
    pub exit_code: u8,
}

impl ErrorOutput {
    pub fn from_recon_error(err: &ReconError) -> Self {
        Self {
            failure: err.to_failure(),
            exit_code: recon_exit_code(err),
        }
    }

    /// Print error to stderr (human-readable by default).
    pub fn print(&self, json: bool) {
        if json {
            if let Ok(output) = serde_json::to_string(self) {
                eprintln!("{}", output);
            }
        } else {
            eprintln!("error: {}", self.failure.message);
        }
    }
}
