use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::MatchResult;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MatchSummary {
    pub matched: usize,
    pub unmatched: usize,
    pub total: usize,
    /// Unmatched rows per reason code.
    pub by_reason: BTreeMap<String, usize>,
}

impl MatchSummary {
    pub fn all_matched(&self) -> bool {
        self.unmatched == 0
    }
}

pub fn compute_summary(results: &[MatchResult]) -> MatchSummary {
    let mut by_reason: BTreeMap<String, usize> = BTreeMap::new();
    let mut matched = 0;
    let mut unmatched = 0;

    for r in results {
        match r {
            MatchResult::Matched { .. } => matched += 1,
            MatchResult::Unmatched { reason, .. } => {
                unmatched += 1;
                *by_reason.entry(reason.code().to_string()).or_insert(0) += 1;
            }
        }
    }

    MatchSummary {
        matched,
        unmatched,
        total: results.len(),
        by_reason,
    }
}
