//! File logging. The terminal belongs to the UI, so logs never go to stdout.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable holding the log filter directives.
pub const LOG_ENV: &str = "MONSTERDEX_LOG";

/// Installs a file subscriber when `log_file` is set. Keep the returned guard
/// alive for the whole run so buffered lines get flushed.
pub fn init(log_file: Option<&Path>) -> Option<WorkerGuard> {
    let path = log_file?;
    let directory = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let file_name = path.file_name()?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));

    let result = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(writer).with_ansi(false).with_target(false))
        .try_init();
    if result.is_err() {
        return None;
    }
    Some(guard)
}
