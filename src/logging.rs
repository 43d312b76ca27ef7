//! Tracing subscriber setup

use std::path::Path;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const DEFAULT_FILTER: &str = "info";

/// Install the global subscriber
///
/// Logs go to `log_file` when given, otherwise to stderr, so stdout stays
/// free for command output. `RUST_LOG` overrides the default `info` filter.
/// The returned guard must be held until exit to flush buffered lines.
pub fn init(log_file: Option<&Path>, json: bool) -> anyhow::Result<WorkerGuard> {
    let (writer, guard) = match log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            let file_name = path
                .file_name()
                .with_context(|| format!("log path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("failed to create log directory {}", dir.display()))?;
            tracing_appender::non_blocking(tracing_appender::rolling::never(dir, file_name))
        }
        None => tracing_appender::non_blocking(std::io::stderr()),
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let layer = fmt::layer().with_writer(writer).with_ansi(false);
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(layer.json()).try_init()?;
    } else {
        registry.with(layer).try_init()?;
    }

    Ok(guard)
}
