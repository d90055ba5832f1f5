use threadline_recon::config::{MatchConfig, ReconConfig};
use threadline_recon::model::{MatchResult, ProductionRecord, Quantities, ScheduleRecord, UnmatchedReason};
use threadline_recon::normalize::{normalize_job_key, normalize_production_job_key};
use threadline_recon::query::{find_job_pos, QueryMode};
use threadline_recon::status::{CollectingSink, NullSink};
use threadline_recon::{build_index, reconcile, run};

fn schedule_row(sl: &str, job: &str, order: &str) -> ScheduleRecord {
    ScheduleRecord {
        sl: sl.into(),
        job_no: Some(job.into()),
        order_no: Some(order.into()),
        style_no: format!("ST-{sl}"),
        color: "Black".into(),
    }
}

fn production_row(job: &str, order: &str, order_qty: f64, sew_in: f64, sew_out: f64) -> ProductionRecord {
    ProductionRecord {
        job_no: Some(job.into()),
        order_no: Some(order.into()),
        quantities: Quantities {
            order_qty: Some(order_qty),
            sew_input: Some(sew_in),
            sew_output: Some(sew_out),
            ..Default::default()
        },
        ..Default::default()
    }
}

// -------------------------------------------------------------------------
// Key normalization
// -------------------------------------------------------------------------

#[test]
fn same_embedded_job_number_gives_same_key() {
    let keys: Vec<String> = ["SGL-25-00196", "JOB-25-00196", "00196", "196"]
        .iter()
        .map(|s| normalize_job_key(Some(s)))
        .collect();
    assert!(keys.iter().all(|k| k == "196"), "{keys:?}");
}

#[test]
fn degenerate_job_codes() {
    assert_eq!(normalize_job_key(Some("0000")), "0");
    assert_eq!(normalize_job_key(Some("")), "");
    assert_eq!(normalize_job_key(None), "");
}

#[test]
fn schedule_and_production_rules_differ() {
    assert_eq!(normalize_job_key(Some("25-00196-A")), "196");
    assert_eq!(normalize_production_job_key(Some("25-00196-A")), "A");
}

// -------------------------------------------------------------------------
// Reconciliation
// -------------------------------------------------------------------------

#[test]
fn reconcile_preserves_order_and_count() {
    let production = vec![production_row("196", "A", 1.0, 0.0, 0.0)];
    let index = build_index(&production);
    let schedule: Vec<_> = (1..=7)
        .map(|i| schedule_row(&i.to_string(), "SGL-25-00196", if i % 2 == 0 { "A" } else { "B" }))
        .collect();

    let results = reconcile(&schedule, &index, &MatchConfig::default(), &mut NullSink);
    assert_eq!(results.len(), schedule.len());
    for (i, (result, row)) in results.iter().zip(&schedule).enumerate() {
        assert_eq!(result.schedule(), row);
        assert_eq!(result.is_matched(), (i + 1) % 2 == 0);
    }
}

#[test]
fn sewing_balance_is_input_minus_output() {
    let production = vec![
        production_row("196", "A", 100.0, 80.5, 50.25),
        production_row("197", "A", 100.0, 10.0, 40.0),
    ];
    let index = build_index(&production);
    let schedule = vec![schedule_row("1", "J-196", "a"), schedule_row("2", "J-197", "a")];

    let results = reconcile(&schedule, &index, &MatchConfig::default(), &mut NullSink);
    assert_eq!(results[0].sewing_balance(), Some(80.5 - 50.25));
    assert_eq!(results[1].sewing_balance(), Some(-30.0));
}

#[test]
fn misses_leave_all_quantities_empty() {
    let production = vec![production_row("196", "ABC-1", 100.0, 80.0, 50.0)];
    let index = build_index(&production);
    let schedule = vec![
        schedule_row("1", "SGL-25-00500", "ABC-1"),
        schedule_row("2", "SGL-25-00196", "ABC-9"),
    ];

    let results = reconcile(&schedule, &index, &MatchConfig::default(), &mut NullSink);
    for result in &results {
        assert!(!result.is_matched());
        assert_eq!(result.sewing_balance(), None);
        assert!(result.cells()[5..].iter().all(|c| c.display().is_empty()));
    }
    assert!(matches!(
        &results[0],
        MatchResult::Unmatched { reason: UnmatchedReason::JobNotFound { .. }, .. }
    ));
    assert!(matches!(
        &results[1],
        MatchResult::Unmatched { reason: UnmatchedReason::OrderNotFound { .. }, .. }
    ));
}

#[test]
fn duplicates_index_keeps_last_query_returns_all() {
    let production = vec![
        production_row("196", "ABC-1", 100.0, 0.0, 0.0),
        production_row("196", "abc-1", 120.0, 0.0, 0.0),
    ];

    let index = build_index(&production);
    assert_eq!(index.get("196", "ABC-1").and_then(|r| r.quantities.order_qty), Some(120.0));

    let query = find_job_pos(&production, "196", &mut NullSink);
    assert_eq!(query.rows.len(), 2);
}

#[test]
fn query_falls_back_to_zero_padding() {
    let production = vec![production_row("007", "A", 1.0, 0.0, 0.0)];
    let mut sink = CollectingSink::new();
    let query = find_job_pos(&production, "7", &mut sink);

    assert_eq!(query.mode, Some(QueryMode::ZeroPadded));
    assert_eq!(query.rows.len(), 1);
    assert!(sink.contains("Found 0 matching rows for job '7'"));
    assert!(sink.contains("Found 1 matching rows with zero-padded match"));
}

#[test]
fn end_to_end_single_match() {
    let schedule = vec![ScheduleRecord {
        sl: "1".into(),
        job_no: Some("SGL-25-00196".into()),
        order_no: Some(" abc-1 ".into()),
        style_no: "POLO-01".into(),
        color: "Navy".into(),
    }];
    let production = vec![production_row("196", "ABC-1", 100.0, 80.0, 50.0)];

    let mut sink = CollectingSink::new();
    let report = run(&ReconConfig::default(), &schedule, &production, &mut sink);

    assert_eq!(report.summary.matched, 1);
    assert_eq!(report.summary.unmatched, 0);
    match &report.results[0] {
        MatchResult::Matched { quantities, sewing_balance, schedule } => {
            assert_eq!(*sewing_balance, 30.0);
            assert_eq!(quantities.order_qty, Some(100.0));
            // Identity is copied as given, not normalized.
            assert_eq!(schedule.order_no.as_deref(), Some(" abc-1 "));
        }
        other => panic!("expected match, got {other:?}"),
    }
    assert!(sink.contains("Matched: 1"));
}

#[test]
fn empty_production_leaves_every_row_unmatched() {
    let schedule = vec![
        schedule_row("1", "SGL-25-00196", "A"),
        schedule_row("2", "SGL-25-00197", "B"),
        schedule_row("3", "", "C"),
    ];

    let mut sink = CollectingSink::new();
    let report = run(&ReconConfig::default(), &schedule, &[], &mut sink);

    assert_eq!(report.results.len(), 3);
    assert_eq!(report.summary.matched, 0);
    assert_eq!(report.summary.unmatched, 3);
    assert_eq!(report.summary.by_reason.get("job_not_found"), Some(&2));
    assert_eq!(report.summary.by_reason.get("no_job_key"), Some(&1));
    assert!(sink.contains("Created lookup with 0 entries for 0 unique jobs"));
    assert!(sink.contains("Unmatched: 3"));
}

#[test]
fn report_serializes_to_json() {
    let schedule = vec![schedule_row("1", "SGL-25-00196", "A")];
    let production = vec![production_row("196", "A", 100.0, 80.0, 50.0)];
    let report = run(&ReconConfig::default(), &schedule, &production, &mut NullSink);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["meta"]["schedule_job_rule"], "trailing_segment");
    assert_eq!(json["meta"]["production_rows"], 1);
    assert_eq!(json["summary"]["matched"], 1);
    assert_eq!(json["results"][0]["status"], "matched");
    assert_eq!(json["results"][0]["sewing_balance"], 30.0);
}
