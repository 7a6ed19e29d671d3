//! Execution log setup
//!
//! Events go to stderr filtered by `RUST_LOG` (default `warn`, `info` with
//! `--verbose`). When a log file is configured, a second ANSI-free layer
//! appends every `info`-and-above event to it.

use console::style;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

/// Keeps the file writer flushing until dropped at process exit
pub type LogGuard = Option<tracing_appender::non_blocking::WorkerGuard>;

pub fn init(verbose: bool, log_file: Option<&Path>) -> LogGuard {
    let default_level = if verbose { "info" } else { "warn" };
    let stderr_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(stderr_filter);

    let appender = match log_file.map(file_appender) {
        Some(Ok(appender)) => appender,
        Some(Err(message)) => {
            eprintln!("{} Execution log disabled: {}", style("!").yellow(), message);
            let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
            return None;
        }
        None => {
            let _ = tracing_subscriber::registry().with(stderr_layer).try_init();
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(appender);
    let file_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_writer(non_blocking)
        .with_filter(EnvFilter::new("info"));

    let _ = tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .try_init();
    Some(guard)
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, String> {
    let directory = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| format!("invalid log file path: {}", path.display()))?;

    RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(directory)
        .map_err(|e| format!("{}: {}", path.display(), e))
}
