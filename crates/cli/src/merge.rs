//! `threadline merge` - reconcile a schedule against production tracking.

use std::path::PathBuf;

use threadline_recon::status::TracingSink;
use threadline_recon::StatusSink;

use crate::exit_codes::EXIT_MERGE_UNMATCHED;
use crate::CliError;

pub struct MergeArgs {
    pub schedule: PathBuf,
    pub production: PathBuf,
    pub output: PathBuf,
    pub sheet: Option<String>,
    pub config: Option<PathBuf>,
    pub json: bool,
    pub strict: bool,
}

pub fn cmd_merge(args: MergeArgs) -> Result<(), CliError> {
    let (config, config_path) =
        crate::settings::load(args.config.as_deref()).map_err(|e| CliError::recon(&e, args.json))?;
    if let Some(path) = &config_path {
        tracing::info!("Using config {}", path.display());
    }

    let mut sink = TracingSink;
    sink.phase("Loading Files");

    let schedule = threadline_io::load_schedule(
        &args.schedule,
        args.sheet.as_deref(),
        &config.columns.schedule_aliases(),
        &mut sink,
    )
    .map_err(|e| CliError::recon(&e, args.json))?;

    let production = threadline_io::load_production(
        &args.production,
        &config.columns.production_aliases(),
        &mut sink,
    )
    .map_err(|e| CliError::recon(&e, args.json))?;

    let report = threadline_recon::run(&config, &schedule, &production, &mut sink);

    threadline_io::write_report(&report.results, &args.output, &config.report, &mut sink)
        .map_err(|e| CliError::recon(&e, args.json))?;

    if args.json {
        let json_str = serde_json::to_string_pretty(&report).map_err(CliError::json)?;
        println!("{json_str}");
    }

    let s = &report.summary;
    eprintln!(
        "{} rows: {} matched, {} unmatched -> {}",
        s.total,
        s.matched,
        s.unmatched,
        args.output.display(),
    );
    for (code, count) in &s.by_reason {
        tracing::debug!(reason = %code, count, "unmatched rows by reason");
    }

    if args.strict && !s.all_matched() {
        return Err(CliError {
            code: EXIT_MERGE_UNMATCHED,
            message: format!("{} schedule rows unmatched (--strict)", s.unmatched),
            hint: None,
        });
    }

    Ok(())
}
