use std::collections::HashMap;

use serde::Deserialize;

use crate::columns::{AliasTable, ProductionField, ScheduleField};
use crate::error::ReconError;
use crate::normalize::ScheduleJobRule;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Per-run settings. Every section is optional; an empty file is the default
/// configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconConfig {
    #[serde(default, rename = "match")]
    pub matching: MatchConfig,
    #[serde(default)]
    pub report: ReportConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
}

// ---------------------------------------------------------------------------
// Match
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MatchConfig {
    pub schedule_job_rule: ScheduleJobRule,
    /// Rows between "Processed N rows..." lines; 0 disables them.
    pub progress_interval: usize,
    /// How many leading schedule rows get their miss explained on the
    /// status channel.
    pub unmatched_log_limit: usize,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            schedule_job_rule: ScheduleJobRule::default(),
            progress_interval: 50,
            unmatched_log_limit: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub sheet_name: String,
    pub max_column_width: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            sheet_name: "Matched Results".into(),
            max_column_width: 50,
        }
    }
}

// ---------------------------------------------------------------------------
// Column aliases
// ---------------------------------------------------------------------------

/// Extra header aliases, tried after the built-in ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColumnConfig {
    pub schedule: HashMap<ScheduleField, Vec<String>>,
    pub production: HashMap<ProductionField, Vec<String>>,
}

impl ColumnConfig {
    pub fn schedule_aliases(&self) -> AliasTable<ScheduleField> {
        AliasTable::with_extra(&self.schedule)
    }

    pub fn production_aliases(&self) -> AliasTable<ProductionField> {
        AliasTable::with_extra(&self.production)
    }
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

/// Excel sheet names: at most 31 characters, none of `[]:*?/\`.
const SHEET_NAME_MAX: usize = 31;
const SHEET_NAME_FORBIDDEN: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

impl ReconConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ReconConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        let name = &self.report.sheet_name;
        if name.trim().is_empty() {
            return Err(ReconError::ConfigValidation(
                "report.sheet_name must not be empty".into(),
            ));
        }
        if name.chars().count() > SHEET_NAME_MAX {
            return Err(ReconError::ConfigValidation(format!(
                "report.sheet_name '{name}' exceeds {SHEET_NAME_MAX} characters"
            )));
        }
        if let Some(c) = name.chars().find(|c| SHEET_NAME_FORBIDDEN.contains(c)) {
            return Err(ReconError::ConfigValidation(format!(
                "report.sheet_name '{name}' contains forbidden character '{c}'"
            )));
        }

        if self.report.max_column_width == 0 {
            return Err(ReconError::ConfigValidation(
                "report.max_column_width must be at least 1".into(),
            ));
        }

        for (field, names) in &self.columns.schedule {
            if names.iter().any(|n| n.trim().is_empty()) {
                return Err(ReconError::ConfigValidation(format!(
                    "columns.schedule: empty alias for {field:?}"
                )));
            }
        }
        for (field, names) in &self.columns.production {
            if names.iter().any(|n| n.trim().is_empty()) {
                return Err(ReconError::ConfigValidation(format!(
                    "columns.production: empty alias for {field:?}"
                )));
            }
        }

        Ok(())
    }
}

/// Commented default file written by `threadline config --init`.
pub const DEFAULT_CONFIG_TOML: &str = r#"# Threadline reconciliation settings

[match]
# "trailing_segment": digits of the last hyphen segment holding digits (SGL-25-00196 -> 196)
# "all_digits": every digit in the job code (SGL-25-00196 -> 2500196)
schedule_job_rule = "trailing_segment"
# Emit "Processed N rows..." every N schedule rows (0 = never)
progress_interval = 50
# Explain why the first N schedule rows did not match
unmatched_log_limit = 10

[report]
sheet_name = "Matched Results"
max_column_width = 50

# Extra header names, tried after the built-in aliases.
[columns.schedule]
# job_no = ["Job Code"]

[columns.production]
# sew_output = ["Sewing Out"]
"#;

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_default() {
        let config = ReconConfig::from_toml("").unwrap();
        assert_eq!(config.matching.schedule_job_rule, ScheduleJobRule::TrailingSegment);
        assert_eq!(config.matching.progress_interval, 50);
        assert_eq!(config.matching.unmatched_log_limit, 10);
        assert_eq!(config.report.sheet_name, "Matched Results");
        assert_eq!(config.report.max_column_width, 50);
        assert!(config.columns.schedule.is_empty());
    }

    #[test]
    fn default_template_parses() {
        let config = ReconConfig::from_toml(DEFAULT_CONFIG_TOML).unwrap();
        assert_eq!(config.report.sheet_name, "Matched Results");
    }

    #[test]
    fn parse_full_config() {
        let input = r#"
[match]
schedule_job_rule = "all_digits"
progress_interval = 0

[report]
sheet_name = "Kmart"

[columns.schedule]
job_no = ["Job Code"]

[columns.production]
sew_output = ["Sewing Out", "Sew Out"]
"#;
        let config = ReconConfig::from_toml(input).unwrap();
        assert_eq!(config.matching.schedule_job_rule, ScheduleJobRule::AllDigits);
        assert_eq!(config.matching.progress_interval, 0);
        assert_eq!(config.matching.unmatched_log_limit, 10);
        assert_eq!(config.report.sheet_name, "Kmart");

        let table = config.columns.schedule_aliases();
        assert_eq!(table.aliases(ScheduleField::JobNo).last().map(String::as_str), Some("Job Code"));
        let table = config.columns.production_aliases();
        assert_eq!(table.aliases(ProductionField::SewOutput).len(), 4);
    }

    #[test]
    fn reject_unknown_rule() {
        let err = ReconConfig::from_toml("[match]\nschedule_job_rule = \"last_digit\"\n").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_unknown_field_name() {
        let err = ReconConfig::from_toml("[columns.schedule]\nbuyer = [\"Buyer\"]\n").unwrap_err();
        assert!(matches!(err, ReconError::ConfigParse(_)));
    }

    #[test]
    fn reject_bad_sheet_name() {
        let err = ReconConfig::from_toml("[report]\nsheet_name = \"a/b\"\n").unwrap_err();
        assert!(err.to_string().contains("forbidden character '/'"));

        let err = ReconConfig::from_toml("[report]\nsheet_name = \"  \"\n").unwrap_err();
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn reject_zero_column_width() {
        let err = ReconConfig::from_toml("[report]\nmax_column_width = 0\n").unwrap_err();
        assert!(matches!(err, ReconError::ConfigValidation(_)));
    }

    #[test]
    fn reject_empty_alias() {
        let err = ReconConfig::from_toml("[columns.production]\njob_no = [\"\"]\n").unwrap_err();
        assert!(err.to_string().contains("empty alias"));
    }
}
