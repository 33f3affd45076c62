//! Logging and tracing configuration
//!
//! The terminal gets a compact layer; every run additionally writes a
//! plain-text `runner.log` into its results directory so the streamed
//! runner output survives next to the test artifacts.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize tracing for a run.
///
/// Log level is controlled by the `RUST_LOG` environment variable; the
/// default is INFO for this crate and WARN for dependencies. Returns the
/// guard that flushes the file writer - hold it until the run is over.
pub fn init(result_dir: &Path) -> WorkerGuard {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("uirunner=info,warn"));

    let file_appender = tracing_appender::rolling::never(result_dir, "runner.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .with(
            fmt::layer()
                .with_writer(file_writer)
                .with_ansi(false)
                .with_target(true),
        )
        .init();

    guard
}
