//! Logging Infrastructure
//!
//! Structured logging with console output in development and
//! daily-rotated file output when a log directory is configured.

use std::path::Path;
use tracing_subscriber::EnvFilter;

/// Initialize the logger
///
/// `RUST_LOG` overrides the default `info` level filter.
pub fn init_logger(log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_file(false)
        .with_line_number(false)
        .with_thread_ids(false)
        .with_target(false);

    if let Some(dir) = log_dir {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Failed to create log directory {dir}: {e}");
        } else if Path::new(dir).exists() {
            let file_appender = tracing_appender::rolling::daily(dir, "hrms-server");
            subscriber.with_writer(file_appender).init();
            return;
        }
    }

    subscriber.init();
}
