//! Key normalization for job and order identifiers.
//!
//! Schedule and production files spell the same job differently
//! (`SGL-25-00196` vs `196`). Two extraction rules exist and are kept apart:
//! the schedule rule works on digits, the production rule on the last
//! hyphen-delimited segment. Merging them changes match results, so they stay
//! separate functions.

use serde::{Deserialize, Serialize};

/// Which extraction rule applies to schedule-side job codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleJobRule {
    /// Digits of the last hyphen-delimited segment that contains any digit.
    #[default]
    TrailingSegment,
    /// Every digit in the string, in order of appearance.
    AllDigits,
}

impl ScheduleJobRule {
    pub fn apply(self, raw: Option<&str>) -> String {
        match self {
            Self::TrailingSegment => normalize_job_key(raw),
            Self::AllDigits => normalize_job_key_all_digits(raw),
        }
    }
}

impl std::fmt::Display for ScheduleJobRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrailingSegment => write!(f, "trailing_segment"),
            Self::AllDigits => write!(f, "all_digits"),
        }
    }
}

/// Schedule-side job key.
///
/// Picks the last hyphen-delimited segment containing a digit, concatenates
/// its digit runs and strips leading zeros. `"SGL-25-00196"`, `"00196"` and
/// `"196"` all give `"196"`; `"0000"` gives `"0"`; no digits gives `""`.
pub fn normalize_job_key(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let segment = raw
        .trim()
        .rsplit('-')
        .find(|seg| seg.chars().any(|c| c.is_ascii_digit()));
    match segment {
        Some(seg) => digits_to_key(seg),
        None => String::new(),
    }
}

/// Schedule-side job key over the whole string: every digit run concatenated
/// in order, leading zeros stripped. `"SGL-25-00196"` gives `"2500196"`.
pub fn normalize_job_key_all_digits(raw: Option<&str>) -> String {
    match raw {
        Some(raw) if raw.chars().any(|c| c.is_ascii_digit()) => digits_to_key(raw),
        _ => String::new(),
    }
}

fn digits_to_key(s: &str) -> String {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    let stripped = digits.trim_start_matches('0');
    if stripped.is_empty() {
        "0".to_string()
    } else {
        stripped.to_string()
    }
}

/// Production-side (and job query) key: the text after the last hyphen, or
/// the whole trimmed string when there is none, with leading zeros removed.
///
/// Unlike the schedule rule this keeps non-digits (`"25-00196-A"` gives
/// `"A"`) and an all-zero segment collapses to `""`.
pub fn normalize_production_job_key(raw: Option<&str>) -> String {
    let Some(raw) = raw else {
        return String::new();
    };
    let trimmed = raw.trim();
    let last = match trimmed.rsplit_once('-') {
        Some((_, tail)) => tail,
        None => trimmed,
    };
    last.trim_start_matches('0').to_string()
}

/// Order key: trimmed and upper-cased. Internal spacing and punctuation are kept.
pub fn normalize_order_key(raw: Option<&str>) -> String {
    raw.map(|s| s.trim().to_uppercase()).unwrap_or_default()
}

/// Parse a quantity; anything missing, unparseable or non-finite is zero.
pub fn coerce_numeric(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

/// Left-pad with `'0'` to `width` characters. Longer strings are unchanged.
pub fn zero_pad(s: &str, width: usize) -> String {
    let len = s.chars().count();
    if len >= width {
        s.to_string()
    } else {
        format!("{}{}", "0".repeat(width - len), s)
    }
}
