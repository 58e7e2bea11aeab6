//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "FLASHDECK_LOG";

const DEFAULT_FILTER: &str = "flashdeck=info,warn";
const LOG_FILE_NAME: &str = "flashdeck.log";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/flashdeck/logs/` so the terminal
/// stays free for the TUI. Log level is controlled by `FLASHDECK_LOG`.
///
/// # Examples
/// ```bash
/// FLASHDECK_LOG=debug flashdeck --demo
/// FLASHDECK_LOG=flashdeck_app=trace flashdeck --drives drives.json
/// ```
pub fn init() -> Result<()> {
    let log_dir = get_log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, LOG_FILE_NAME);

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(true)
                .with_line_number(true)
                .with_timer(fmt::time::ChronoLocal::new(
                    "%Y-%m-%d %H:%M:%S%.3f".to_string(),
                )),
        )
        .init();

    tracing::info!("═══════════════════════════════════════════════════════");
    tracing::info!("flashdeck starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Build the filter from `FLASHDECK_LOG`, falling back to the default
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Get the log directory path
fn get_log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("flashdeck").join("logs"))
}

/// Get the log file path for the current day
pub fn get_current_log_file() -> Result<PathBuf> {
    let dir = get_log_directory()?;
    Ok(dir.join(LOG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_log_file_lives_under_flashdeck_dir() {
        let path = get_current_log_file().unwrap();
        assert!(path.ends_with("flashdeck/logs/flashdeck.log"));
    }

    #[test]
    #[serial]
    fn test_env_filter_default() {
        std::env::remove_var(LOG_ENV_VAR);
        let filter = env_filter();
        assert!(filter.to_string().contains("flashdeck=info"));
    }

    #[test]
    #[serial]
    fn test_env_filter_from_env() {
        std::env::set_var(LOG_ENV_VAR, "debug");
        let filter = env_filter();
        std::env::remove_var(LOG_ENV_VAR);
        assert!(filter.to_string().contains("debug"));
    }
}
