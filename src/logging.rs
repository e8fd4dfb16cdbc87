use crate::config::LoggingConfig;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Installs the global subscriber. Keep the guard alive until exit so
/// buffered lines get flushed.
///
/// An unusable log directory is reported on stderr and logging falls back
/// to stderr.
pub fn initialize_logging(config: &LoggingConfig) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let (non_blocking, guard, ansi) = match &config.directory {
        Some(dir) => match std::fs::create_dir_all(dir) {
            Ok(()) => {
                let file_appender = tracing_appender::rolling::daily(dir, "gmaps-geo.log");
                let (writer, guard) = tracing_appender::non_blocking(file_appender);
                (writer, guard, false)
            }
            Err(e) => {
                eprintln!(
                    "Could not create log directory {}: {}. Logging to stderr.",
                    dir.display(),
                    e
                );
                stderr_writer()
            }
        },
        None => stderr_writer(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(ansi))
        .init();

    tracing::debug!("Logging initialized.");
    guard
}

fn stderr_writer() -> (NonBlocking, WorkerGuard, bool) {
    let (writer, guard) = tracing_appender::non_blocking(std::io::stderr());
    (writer, guard, true)
}
