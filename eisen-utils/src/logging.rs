//! Tracing setup
//!
//! The board owns the terminal while it runs, so it logs to a file under
//! the state directory. One-shot commands log to stderr and keep stdout for
//! their output. Either way the filter comes from `EISEN_LOG`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::EnvFilter;

use crate::{paths, EisenError, Result};

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "EISEN_LOG";

/// Name of the board's log file inside [`paths::log_dir`]
pub const LOG_FILE_NAME: &str = "eisen.log";

/// Where log lines go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogOutput {
    Stderr,
    /// Append to this file, creating parent directories as needed
    File(PathBuf),
}

#[derive(Debug, Clone)]
pub struct LogConfig {
    pub output: LogOutput,
    /// `EnvFilter` directives, e.g. `eisen_client=debug,reqwest=warn`
    pub filter: String,
    /// Add target, file and line to every record
    pub verbose: bool,
}

/// Use the filter from the environment when it is set and non-empty
fn resolve_filter(from_env: Option<String>, fallback: &str) -> String {
    from_env
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| fallback.to_string())
}

impl LogConfig {
    /// Interactive board: file output
    pub fn tui() -> Self {
        Self {
            output: LogOutput::File(paths::log_dir().join(LOG_FILE_NAME)),
            filter: resolve_filter(std::env::var(LOG_ENV).ok(), "warn"),
            verbose: false,
        }
    }

    /// One-shot commands: stderr output
    pub fn cli() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: resolve_filter(std::env::var(LOG_ENV).ok(), "warn"),
            verbose: false,
        }
    }

    /// Everything from the eisen crates, with source locations
    pub fn development() -> Self {
        Self {
            output: LogOutput::Stderr,
            filter: "info,eisen_client=debug,eisen_protocol=debug,eisen_utils=debug".into(),
            verbose: true,
        }
    }
}

fn file_writer(path: &Path) -> Result<BoxMakeWriter> {
    if let Some(dir) = path.parent() {
        paths::ensure_dir(dir).map_err(|e| EisenError::FileWrite {
            path: dir.to_path_buf(),
            source: e,
        })?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| EisenError::FileWrite {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(BoxMakeWriter::new(Mutex::new(file)))
}

/// Install the global subscriber
///
/// Fails on an invalid filter, an unwritable log file, or when a
/// subscriber is already installed.
pub fn init_logging_with_config(config: LogConfig) -> Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .map_err(|e| EisenError::config(format!("Invalid log filter: {}", e)))?;

    let (writer, ansi) = match &config.output {
        LogOutput::Stderr => (BoxMakeWriter::new(std::io::stderr), true),
        LogOutput::File(path) => (file_writer(path)?, false),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(config.verbose)
        .with_file(config.verbose)
        .with_line_number(config.verbose)
        .try_init()
        .map_err(|e| EisenError::internal(format!("Failed to init logging: {}", e)))
}
