use std::fs;
use std::path::Path;

use tempfile::tempdir;
use threadline_io::{load_production, load_schedule, read_table, sheet_names, write_report};
use threadline_recon::config::ReconConfig;
use threadline_recon::status::{CollectingSink, NullSink};
use threadline_recon::{run, MatchResult};

fn write(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn csv_sources_through_to_xlsx_report() {
    let dir = tempdir().unwrap();
    let schedule = write(
        dir.path(),
        "schedule.csv",
        "SL,Job No,PO No,Style,Colour\n\
         1,SGL-25-00196, abc-1 ,POLO-01,Navy\n\
         2,SGL-25-00197,XYZ-9,POLO-02,Red\n",
    );
    let production = write(
        dir.path(),
        "production.csv",
        "Job No;Order No;Order Qty.;Total Sew Input Qty;Total Sew Output Qty;Style Name\n\
         196;ABC-1;100;80;50;Polo\n",
    );

    let config = ReconConfig::default();
    let mut sink = CollectingSink::new();
    let schedule_rows =
        load_schedule(&schedule, None, &config.columns.schedule_aliases(), &mut sink).unwrap();
    let production_rows =
        load_production(&production, &config.columns.production_aliases(), &mut sink).unwrap();
    let report = run(&config, &schedule_rows, &production_rows, &mut sink);

    assert_eq!(report.summary.matched, 1);
    assert_eq!(report.summary.unmatched, 1);
    match &report.results[0] {
        MatchResult::Matched { sewing_balance, .. } => assert_eq!(*sewing_balance, 30.0),
        other => panic!("expected match, got {other:?}"),
    }

    let out = dir.path().join("merged.xlsx");
    write_report(&report.results, &out, &config.report, &mut sink).unwrap();

    assert_eq!(sheet_names(&out).unwrap(), vec!["Matched Results"]);
    let table = read_table(&out, None).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0][1], "SGL-25-00196");
    assert_eq!(table.rows[0][5], "100");
    assert_eq!(table.rows[0][11], "30");
    // Unmatched row keeps identity, quantities blank.
    assert_eq!(table.rows[1][2], "XYZ-9");
    assert!(table.rows[1].iter().skip(5).all(|c| c.is_empty()));
}

#[test]
fn csv_report_output() {
    let dir = tempdir().unwrap();
    let schedule = write(dir.path(), "s.csv", "JOB NO,Order No\nSGL-25-00196,A\n");
    let production = write(dir.path(), "p.csv", "Job No,Order No,Order Qty.\n196,a,5\n");

    let config = ReconConfig::default();
    let s = load_schedule(&schedule, None, &config.columns.schedule_aliases(), &mut NullSink).unwrap();
    let p = load_production(&production, &config.columns.production_aliases(), &mut NullSink).unwrap();
    let report = run(&config, &s, &p, &mut NullSink);

    let out = dir.path().join("merged.csv");
    write_report(&report.results, &out, &config.report, &mut NullSink).unwrap();

    let content = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 2);
    // SL numbered, order qty copied, absent quantity columns blank
    assert_eq!(lines[1], "1,SGL-25-00196,A,,,5,,,,,,0,,,");
}

#[test]
fn missing_schedule_sheet_fails_before_output() {
    let dir = tempdir().unwrap();
    let workbook = dir.path().join("schedule.xlsx");
    write_report(&[], &workbook, &ReconConfig::default().report, &mut NullSink).unwrap();

    let err = load_schedule(
        &workbook,
        Some("Kmart"),
        &ReconConfig::default().columns.schedule_aliases(),
        &mut NullSink,
    )
    .unwrap_err();
    assert_eq!(err.kind(), "sheet_not_found");
}
