//! File logging.
//!
//! The terminal belongs to the UI, so log records go to a file through `fern`.
//! Call sites use the `log` macros.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::config::LoggingConfig;

const LOG_FILE_NAME: &str = "chatdeck.log";

/// Install the global logger. Does nothing when logging is disabled.
///
/// Returns the log file path when a logger was installed.
pub fn init(config: &LoggingConfig) -> Result<Option<PathBuf>> {
    if !config.enabled {
        return Ok(None);
    }

    let level = config.level_filter()?;
    let path = match &config.file {
        Some(path) => path.clone(),
        None => get_log_file_path()?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }

    let file = fern::log_file(&path).with_context(|| format!("Failed to open log file: {}", path.display()))?;

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(file)
        .apply()
        .context("A logger is already installed")?;

    log::info!("Logging to {}", path.display());
    Ok(Some(path))
}

/// Default log file location in the user's data directory.
pub fn get_log_file_path() -> Result<PathBuf> {
    dirs::data_local_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
        .map(|dir| dir.join("chatdeck").join(LOG_FILE_NAME))
}
