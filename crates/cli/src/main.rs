// Threadline CLI - reconcile order schedules against production tracking

mod exit_codes;
mod job;
mod logging;
mod merge;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use threadline_recon::ReconError;

use exit_codes::{recon_exit_code, ErrorOutput, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "threadline")]
#[command(about = "Match buyer-order schedules against production tracking sheets")]
#[command(version)]
struct Cli {
    /// Debug-level logging (overridden by RUST_LOG)
    #[arg(long, short = 'v', global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Warnings and errors only
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge production quantities into the schedule and write a report
    #[command(after_help = "\
Examples:
  threadline merge schedule.xlsx production.xlsx
  threadline merge schedule.xlsx production.xlsx --sheet Kmart -o kmart.xlsx
  threadline merge schedule.csv production.csv -o merged.csv --strict
  threadline merge schedule.xlsx production.xlsx --json > summary.json")]
    Merge {
        /// Schedule workbook or CSV (buyer orders)
        schedule: PathBuf,

        /// Production tracking workbook or CSV (first sheet is used)
        production: PathBuf,

        /// Report path; `.csv` writes CSV, anything else xlsx
        #[arg(long, short = 'o', default_value = "matched_results.xlsx")]
        output: PathBuf,

        /// Schedule sheet name (default: first sheet)
        #[arg(long)]
        sheet: Option<String>,

        /// Config file
        #[arg(long, env = "THREADLINE_CONFIG")]
        config: Option<PathBuf>,

        /// Print the full run report as JSON on stdout
        #[arg(long)]
        json: bool,

        /// Exit non-zero when any schedule row is unmatched
        #[arg(long)]
        strict: bool,
    },

    /// Show production rows for a job number
    #[command(after_help = "\
Examples:
  threadline job production.xlsx SGL-25-00196
  threadline job production.xlsx 7 --json")]
    Job {
        /// Production tracking workbook or CSV
        production: PathBuf,

        /// Job number or code (text after the last hyphen is used)
        job: String,

        /// Config file
        #[arg(long, env = "THREADLINE_CONFIG")]
        config: Option<PathBuf>,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// List sheet names of a workbook
    Sheets {
        file: PathBuf,

        /// Output JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the config path, or create a default config file
    Config {
        /// Write a commented default config
        #[arg(long)]
        init: bool,

        /// Overwrite an existing file with --init
        #[arg(long, requires = "init")]
        force: bool,

        /// Config file (default: user config directory)
        #[arg(long, env = "THREADLINE_CONFIG")]
        path: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    let result = match cli.command {
        None => {
            eprintln!("Usage: threadline <command> [options]");
            eprintln!("       threadline --help for more information");
            Err(CliError::args(""))
        }
        Some(Commands::Merge { schedule, production, output, sheet, config, json, strict }) => {
            merge::cmd_merge(merge::MergeArgs { schedule, production, output, sheet, config, json, strict })
        }
        Some(Commands::Job { production, job, config, json }) => job::cmd_job(production, job, config, json),
        Some(Commands::Sheets { file, json }) => cmd_sheets(file, json),
        Some(Commands::Config { init, force, path }) => cmd_config(init, force, path),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn json(err: serde_json::Error) -> Self {
        Self { code: EXIT_ERROR, message: format!("JSON serialization error: {err}"), hint: None }
    }

    /// Print a ReconError in structured form (JSON with `--json`) and carry
    /// only its exit code and hint back to main.
    pub fn recon(err: &ReconError, json: bool) -> Self {
        ErrorOutput::from_recon_error(err).print(json);
        let hint = match err {
            ReconError::SheetNotFound { .. } => Some("list sheets with `threadline sheets <file>`".to_string()),
            ReconError::UnsupportedFormat(_) => Some("save the file as .xlsx or .csv".to_string()),
            ReconError::ConfigRead { .. } => Some("run `threadline config --init` to create one".to_string()),
            _ => None,
        };
        Self { code: recon_exit_code(err), message: String::new(), hint }
    }
}

// ============================================================================
// sheets
// ============================================================================

fn cmd_sheets(file: PathBuf, json: bool) -> Result<(), CliError> {
    let names = threadline_io::sheet_names(&file).map_err(|e| CliError::recon(&e, json))?;

    if json {
        println!("{}", serde_json::to_string(&names).map_err(CliError::json)?);
    } else if names.is_empty() {
        eprintln!("{} is a delimited file and has no sheets", file.display());
    } else {
        for name in &names {
            println!("{name}");
        }
    }
    Ok(())
}

// ============================================================================
// config
// ============================================================================

fn cmd_config(init: bool, force: bool, path: Option<PathBuf>) -> Result<(), CliError> {
    let path = path.unwrap_or_else(settings::default_config_path);

    if init {
        settings::create_default_file(&path, force)?;
        eprintln!("wrote {}", path.display());
        return Ok(());
    }

    println!("{}", path.display());
    if path.exists() {
        // Errors out on an invalid file.
        settings::load(Some(&path)).map_err(|e| CliError::recon(&e, false))?;
    } else {
        eprintln!("(not present; built-in defaults apply)");
    }
    Ok(())
}
