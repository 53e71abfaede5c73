use std::path::Path;

use tracing::warn;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use popcorn_core::config::AppConfig;

const DEFAULT_FILTER: &str = "popcorn=info";
const LOG_FILE_PREFIX: &str = "popcorn.log";

/// Install the global subscriber: a daily rolling log file, plus stderr when
/// `verbose`. `RUST_LOG` overrides the default filter.
///
/// When the log directory cannot be used, logs go to stderr instead and no
/// guard is returned. Otherwise keep the guard alive for the whole run so
/// buffered lines flush.
pub fn init(verbose: bool) -> Option<WorkerGuard> {
    let log_dir = AppConfig::log_dir();
    let (file, guard, file_error) = match file_appender(&log_dir) {
        Ok(appender) => {
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let stderr = (verbose || file.is_none()).then(|| fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(filter)
        .with(file)
        .with(stderr)
        .init();

    if let Some(e) = file_error {
        warn!(dir = %log_dir.display(), error = %e, "Log file unavailable, logging to stderr");
    }
    guard
}

/// Daily rolling appender in `log_dir`, creating the directory if needed.
fn file_appender(log_dir: &Path) -> Result<RollingFileAppender, InitError> {
    RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(LOG_FILE_PREFIX)
        .build(log_dir)
}
