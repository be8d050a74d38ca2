use anyhow::{anyhow, Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

/// Where log lines may go for a given front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogSink {
    /// The screen belongs to the UI; only a log file is allowed
    FileOnly,
    /// Stderr unless a log file is given
    Stderr,
}

fn filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. `RUST_LOG` wins over `level`.
pub fn init(sink: LogSink, log_file: Option<&Path>, level: &str) -> Result<()> {
    match (sink, log_file) {
        (_, Some(path)) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter(level))
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .try_init()
                .map_err(|e| anyhow!(e))
        }
        (LogSink::Stderr, None) => tracing_subscriber::fmt()
            .with_env_filter(filter(level))
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(|e| anyhow!(e)),
        (LogSink::FileOnly, None) => Ok(()),
    }
}
