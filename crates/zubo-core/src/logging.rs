//! Logging init: stderr for interactive/CI runs, or a file under the XDG state dir.

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,zubo_core=debug,zubo_cli=debug";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Append logs to `~/.local/state/zubo/zubo.log` and return its path.
/// On failure the caller falls back to [`init_logging_stderr`].
pub fn init_logging() -> Result<PathBuf> {
    let log_dir = xdg::BaseDirectories::with_prefix("zubo")?.get_state_home();
    fs::create_dir_all(&log_dir)?;
    let log_file_path = log_dir.join("zubo.log");

    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file_path)?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {}", e))?;

    tracing::info!("zubo logging initialized at {}", log_file_path.display());
    Ok(log_file_path)
}

/// Log to stderr. Default for the CLI.
pub fn init_logging_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
