//! Logging configuration using tracing

use std::path::PathBuf;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::error::Result;

/// Environment variable controlling the log filter
pub const LOG_ENV_VAR: &str = "CALLPANE_LOG";

/// Filter used when `CALLPANE_LOG` is unset or invalid
///
/// Targets match by prefix, so `callpane` covers every workspace crate.
pub const DEFAULT_FILTER: &str = "callpane=info,warn";

/// Initialize the logging subsystem
///
/// Logs are written to `~/.local/share/callpane/logs/` because the TUI owns
/// stdout. Log level is controlled by the `CALLPANE_LOG` environment variable.
///
/// # Examples
/// ```bash
/// CALLPANE_LOG=debug callpane --demo
/// CALLPANE_LOG=callpane_service=trace callpane service.did --exec ./server
/// ```
pub fn init() -> Result<()> {
    let log_dir = log_directory()?;
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, &log_dir, "callpane.log");

    let env_filter =
        EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(env_filter)
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
    tracing::info!("Callpane starting");
    tracing::info!("Log directory: {}", log_dir.display());
    tracing::info!("═══════════════════════════════════════════════════════");

    Ok(())
}

/// Directory holding the daily log files
pub fn log_directory() -> Result<PathBuf> {
    let base = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    Ok(base.join("callpane").join("logs"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logs_live_under_callpane_logs() {
        let dir = log_directory().unwrap();
        assert!(dir.ends_with("callpane/logs"));
    }

    #[test]
    fn test_default_filter_logs_callpane_at_info() {
        use tracing_subscriber::filter::LevelFilter;

        let filter = EnvFilter::try_new(DEFAULT_FILTER).unwrap();
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }
}
