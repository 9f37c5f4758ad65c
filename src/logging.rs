//! Logging setup
//!
//! The terminal front end owns stdout/stderr while it runs, so log lines
//! go to a file when one is configured and are discarded otherwise.

use crate::backend::BackendKind;
use crate::config::LoggingOptions;
use anyhow::{anyhow, Context, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

/// Where log output ends up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSink {
    File(std::path::PathBuf),
    Stderr,
    Discard,
}

impl LogSink {
    pub fn choose(options: &LoggingOptions, backend: BackendKind) -> Self {
        match (&options.file, backend) {
            (Some(path), _) => LogSink::File(path.clone()),
            (None, BackendKind::Graphics) => LogSink::Stderr,
            (None, BackendKind::Terminal) => LogSink::Discard,
        }
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init(options: &LoggingOptions, backend: BackendKind) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&options.level)
            .with_context(|| format!("Invalid log level {:?}", options.level))?,
    };

    let sink = LogSink::choose(options, backend);
    let (writer, ansi) = match &sink {
        LogSink::File(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Failed to open log file {:?}", path))?;
            (BoxMakeWriter::new(Mutex::new(file)), false)
        }
        LogSink::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogSink::Discard => (BoxMakeWriter::new(std::io::sink), false),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to install logger: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_sink_selection() {
        let mut options = LoggingOptions::default();
        assert_eq!(LogSink::choose(&options, BackendKind::Terminal), LogSink::Discard);
        assert_eq!(LogSink::choose(&options, BackendKind::Graphics), LogSink::Stderr);

        options.file = Some(PathBuf::from("/tmp/chostty.log"));
        assert_eq!(
            LogSink::choose(&options, BackendKind::Terminal),
            LogSink::File(PathBuf::from("/tmp/chostty.log"))
        );
    }
}
