//! `threadline job` - list production rows for one job.

use std::path::PathBuf;

use serde::Serialize;
use threadline_recon::query::{display_columns, display_rows, find_job_pos, DisplayColumn, QueryMode};
use threadline_recon::status::TracingSink;

use crate::CliError;

#[derive(Serialize)]
struct JobOutput<'a> {
    input: &'a str,
    search_key: &'a str,
    mode: Option<QueryMode>,
    columns: &'a [DisplayColumn],
    rows: Vec<Vec<String>>,
}

pub fn cmd_job(production: PathBuf, job: String, config: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let (config, _) = crate::settings::load(config.as_deref()).map_err(|e| CliError::recon(&e, json))?;
    let mut sink = TracingSink;

    let rows = threadline_io::load_production(&production, &config.columns.production_aliases(), &mut sink)
        .map_err(|e| CliError::recon(&e, json))?;

    let query = find_job_pos(&rows, &job, &mut sink);
    let columns = display_columns(&rows, &mut sink);
    let table = display_rows(&query, &columns);

    if json {
        let output = JobOutput {
            input: &query.input,
            search_key: &query.search_key,
            mode: query.mode,
            columns: &columns,
            rows: table,
        };
        let json_str = serde_json::to_string_pretty(&output).map_err(CliError::json)?;
        println!("{json_str}");
        return Ok(());
    }

    if query.is_empty() {
        eprintln!("no production rows for job '{job}'");
        return Ok(());
    }

    let headers: Vec<&str> = columns.iter().map(|c| c.header()).collect();
    print!("{}", render_table(&headers, &table));
    Ok(())
}

/// Left-aligned plain-text table, two spaces between columns.
fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (w, cell) in widths.iter_mut().zip(row) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = pad_line(headers.iter().copied(), &widths);
    for row in rows {
        out.push_str(&pad_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn pad_line<'a>(cells: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .zip(widths)
        .map(|(c, w)| format!("{c:<w$}", w = *w))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}
