// Config file discovery and loading

use std::fs;
use std::path::{Path, PathBuf};

use threadline_recon::config::DEFAULT_CONFIG_TOML;
use threadline_recon::{ReconConfig, ReconError};

use crate::exit_codes::EXIT_SINK_WRITE;
use crate::CliError;

/// `<config_dir>/threadline/threadline.toml`
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("threadline")
        .join("threadline.toml")
}

/// Load the effective config.
///
/// `explicit` comes from `--config` or `$THREADLINE_CONFIG` and must exist.
/// Otherwise the default path is used when present, else built-in defaults.
pub fn load(explicit: Option<&Path>) -> Result<(ReconConfig, Option<PathBuf>), ReconError> {
    let path = match explicit {
        Some(path) => {
            if !path.exists() {
                return Err(ReconError::config_read(path.display().to_string(), "file not found"));
            }
            path.to_path_buf()
        }
        None => {
            let path = default_config_path();
            if !path.exists() {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                return Ok((ReconConfig::default(), None));
            }
            path
        }
    };

    let shown = path.display().to_string();
    let contents = fs::read_to_string(&path).map_err(|e| ReconError::config_read(&shown, e))?;
    let config = ReconConfig::from_toml(&contents).map_err(|e| e.in_config_file(&shown))?;

    tracing::debug!(path = %shown, "loaded config");
    Ok((config, Some(path)))
}

/// Write the commented default config. Refuses to overwrite unless `force`.
pub fn create_default_file(path: &Path, force: bool) -> Result<(), CliError> {
    if path.exists() && !force {
        return Err(CliError {
            code: EXIT_SINK_WRITE,
            message: format!("config already exists: {}", path.display()),
            hint: Some("pass --force to overwrite".into()),
        });
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| CliError {
            code: EXIT_SINK_WRITE,
            message: format!("cannot create config directory {}: {e}", parent.display()),
            hint: None,
        })?;
    }

    fs::write(path, DEFAULT_CONFIG_TOML).map_err(|e| CliError {
        code: EXIT_SINK_WRITE,
        message: format!("cannot write {}: {e}", path.display()),
        hint: None,
    })
}
