//! File-based logging for focusrec.
//!
//! The panel owns the terminal, so log output goes to daily-rotated files
//! under the XDG state directory instead. Rotated files older than the
//! retention window are pruned at startup. Levels are controlled through
//! RUST_LOG and default to "info".

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use tracing_appender::rolling;
use tracing_subscriber::prelude::*;

/// Base name of the log files; the daily appender suffixes a date.
pub const LOG_FILE_PREFIX: &str = "focusrec.log";

/// Rotated files kept before startup pruning removes the oldest.
const LOG_RETENTION_DAYS: usize = 7;

/// Keeps the non-blocking writer flushing for the program lifetime.
static APPENDER_GUARD: OnceLock<tracing_appender::non_blocking::WorkerGuard> = OnceLock::new();

/// Initializes daily-rotated, non-blocking file logging.
///
/// # Errors
/// - If the log directory cannot be determined or created
/// - If logging was already initialized
pub fn init_logging() -> Result<(), anyhow::Error> {
    let log_dir = get_log_dir()?;

    if let Err(e) = prune_old_logs(&log_dir) {
        eprintln!("Warning: Failed to prune old logs: {e}");
    }

    let (writer, guard) =
        tracing_appender::non_blocking(rolling::daily(&log_dir, LOG_FILE_PREFIX));
    APPENDER_GUARD
        .set(guard)
        .map_err(|_| anyhow::anyhow!("Logging already initialized"))?;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_ansi(false),
        )
        .init();

    tracing::debug!("Logging initialized. Log directory: {}", log_dir.display());
    Ok(())
}

/// Determines the log directory, creating it if needed.
///
/// Prefers XDG_STATE_HOME if set, otherwise uses ~/.local/state/focusrec.
///
/// # Errors
/// - If the home directory cannot be determined
/// - If the log directory cannot be created
pub fn get_log_dir() -> Result<PathBuf, anyhow::Error> {
    let log_dir = match std::env::var("XDG_STATE_HOME") {
        Ok(xdg_state) => PathBuf::from(xdg_state).join("focusrec"),
        Err(_) => dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
            .join(".local/state/focusrec"),
    };

    fs::create_dir_all(&log_dir)?;

    Ok(log_dir)
}

/// Removes rotated log files beyond the retention window, newest first.
fn prune_old_logs(log_dir: &Path) -> Result<(), anyhow::Error> {
    let mut rotated: Vec<(PathBuf, std::time::SystemTime)> = fs::read_dir(log_dir)?
        .filter_map(|entry| {
            let path = entry.ok()?.path();
            let name = path.file_name()?.to_string_lossy().into_owned();
            // The daily appender names files focusrec.log.YYYY-MM-DD.
            if !name.starts_with(LOG_FILE_PREFIX) {
                return None;
            }
            let modified = fs::metadata(&path).ok()?.modified().ok()?;
            Some((path, modified))
        })
        .collect();

    rotated.sort_by(|a, b| b.1.cmp(&a.1));

    for (path, _) in rotated.into_iter().skip(LOG_RETENTION_DAYS) {
        if let Err(e) = fs::remove_file(&path) {
            eprintln!("Warning: Failed to delete old log file {}: {e}", path.display());
        }
    }

    Ok(())
}
