use serde::Serialize;

use crate::config::{MatchConfig, ReconConfig};
use crate::index::{build_index, LookupIndex};
use crate::model::{MatchResult, ProductionRecord, ScheduleRecord, UnmatchedReason};
use crate::normalize::{normalize_order_key, ScheduleJobRule};
use crate::status::StatusSink;
use crate::summary::{compute_summary, MatchSummary};

const SAMPLE_EXTRACTIONS: usize = 3;
const SAMPLE_PRODUCTION_JOBS: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct ReconMeta {
    pub engine_version: String,
    pub run_at: String,
    pub schedule_job_rule: ScheduleJobRule,
    pub schedule_rows: usize,
    pub production_rows: usize,
}

/// Complete result of one reconciliation run.
#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: ReconMeta,
    pub summary: MatchSummary,
    pub results: Vec<MatchResult>,
}

/// Index the production rows, reconcile every schedule row against them and
/// summarize. Never fails: rows that cannot be matched come back `Unmatched`.
pub fn run(
    config: &ReconConfig,
    schedule: &[ScheduleRecord],
    production: &[ProductionRecord],
    sink: &mut dyn StatusSink,
) -> ReconReport {
    let rule = config.matching.schedule_job_rule;

    sink.phase("Building Lookup");
    report_samples(rule, schedule, production, sink);

    let index = build_index(production);
    sink.info(&format!(
        "Created lookup with {} entries for {} unique jobs from {} rows",
        index.entry_count(),
        index.job_count(),
        index.inserted()
    ));
    if index.skipped() > 0 {
        sink.info(&format!(
            "Skipped {} production rows without a job number",
            index.skipped()
        ));
    }
    if index.overwritten() > 0 {
        sink.warn(&format!(
            "{} duplicate job/order rows in production data; the last occurrence was kept",
            index.overwritten()
        ));
    }

    let results = reconcile(schedule, &index, &config.matching, sink);
    let summary = compute_summary(&results);

    ReconReport {
        meta: ReconMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            schedule_job_rule: rule,
            schedule_rows: schedule.len(),
            production_rows: production.len(),
        },
        summary,
        results,
    }
}

/// One result per schedule row, same order.
pub fn reconcile(
    schedule: &[ScheduleRecord],
    index: &LookupIndex<'_>,
    options: &MatchConfig,
    sink: &mut dyn StatusSink,
) -> Vec<MatchResult> {
    sink.phase("Matching Rows");

    let mut results = Vec::with_capacity(schedule.len());
    let mut matched = 0usize;
    let mut unmatched = 0usize;

    for (i, row) in schedule.iter().enumerate() {
        let result = match_row(row, index, options.schedule_job_rule);

        match &result {
            MatchResult::Matched { .. } => matched += 1,
            MatchResult::Unmatched { reason, .. } => {
                unmatched += 1;
                if i < options.unmatched_log_limit {
                    sink.info(&format!("Row {}: {reason}", i + 1));
                } else {
                    tracing::debug!(row = i + 1, code = reason.code(), "{reason}");
                }
            }
        }
        results.push(result);

        let done = i + 1;
        if options.progress_interval > 0 && done % options.progress_interval == 0 {
            sink.info(&format!("Processed {done} rows..."));
        }
    }

    sink.info(&format!("Matched: {matched}"));
    sink.info(&format!("Unmatched: {unmatched}"));
    sink.info(&format!("Total: {}", schedule.len()));

    results
}

fn match_row(row: &ScheduleRecord, index: &LookupIndex<'_>, rule: ScheduleJobRule) -> MatchResult {
    let job_key = rule.apply(row.job_no.as_deref());
    let order_key = normalize_order_key(row.order_no.as_deref());

    let unmatched = |reason| MatchResult::Unmatched {
        schedule: row.clone(),
        reason,
    };

    if job_key.is_empty() {
        return unmatched(UnmatchedReason::NoJobKey);
    }
    if !index.contains_job(&job_key) {
        return unmatched(UnmatchedReason::JobNotFound { job_key });
    }
    match index.get(&job_key, &order_key) {
        Some(prod) => MatchResult::Matched {
            schedule: row.clone(),
            quantities: prod.quantities,
            sewing_balance: prod.quantities.sewing_balance(),
        },
        None => unmatched(UnmatchedReason::OrderNotFound { job_key, order_key }),
    }
}

fn report_samples(
    rule: ScheduleJobRule,
    schedule: &[ScheduleRecord],
    production: &[ProductionRecord],
    sink: &mut dyn StatusSink,
) {
    for raw in schedule
        .iter()
        .filter_map(|r| r.job_no.as_deref())
        .filter(|s| !s.trim().is_empty())
        .take(SAMPLE_EXTRACTIONS)
    {
        sink.info(&format!("Sample extraction: '{raw}' -> '{}'", rule.apply(Some(raw))));
    }

    let mut jobs: Vec<&str> = Vec::new();
    for job in production.iter().map(ProductionRecord::job_str) {
        if jobs.len() == SAMPLE_PRODUCTION_JOBS {
            break;
        }
        if !job.is_empty() && !jobs.contains(&job) {
            jobs.push(job);
        }
    }
    if !jobs.is_empty() {
        sink.info(&format!("Production job numbers (first {}): {}", jobs.len(), jobs.join(", ")));
    }
}
