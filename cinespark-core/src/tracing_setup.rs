//! Logging for the CineSpark client
//!
//! Two sinks share one subscriber. The console shows what the user asked
//! for with `--log-level` (or `RUST_LOG`) and only for CineSpark's own
//! crates, so HTTP client chatter stays out of the terminal. The file under
//! `<data dir>/logs` records everything from the last run: catalog requests
//! and status mapping, favorites and theme loads, rejected store changes
//! and the terms the search debouncer settled on.

use std::fs::{File, create_dir_all};
use std::path::{Path, PathBuf};

use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// File name of the per-run log, replaced on every start.
pub const LOG_FILE_NAME: &str = "cinespark-last-run.log";

/// Crates whose events reach the console.
const CONSOLE_TARGETS: [&str; 3] = ["cinespark", "cinespark_core", "cinespark_search"];

/// Failure to install the log sinks.
#[derive(Debug, thiserror::Error)]
pub enum TracingSetupError {
    #[error("Cannot open log file {path}: {source}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInstalled(#[from] tracing_subscriber::util::TryInitError),
}

/// Path of the per-run log inside `logs_dir`.
pub fn log_file_path(logs_dir: &Path) -> PathBuf {
    logs_dir.join(LOG_FILE_NAME)
}

/// Console filter directives: CineSpark crates at `level`, everything else
/// limited to errors.
pub fn console_directives(level: Level) -> String {
    let level = level.to_string().to_lowercase();
    std::iter::once("error".to_string())
        .chain(CONSOLE_TARGETS.iter().map(|target| format!("{target}={level}")))
        .collect::<Vec<_>>()
        .join(",")
}

/// Installs the console and file sinks.
///
/// `logs_dir` defaults to `./logs`. The file keeps trace level for
/// CineSpark and debug for the HTTP stack regardless of `console_level`.
///
/// # Errors
///
/// - `TracingSetupError::LogFile` - The logs directory or file cannot be created
/// - `TracingSetupError::AlreadyInstalled` - Called twice in one process
pub fn init_tracing(console_level: Level, logs_dir: Option<&Path>) -> Result<(), TracingSetupError> {
    let logs_dir = logs_dir.unwrap_or_else(|| Path::new("logs"));
    let log_path = log_file_path(logs_dir);
    let log_file = create_dir_all(logs_dir)
        .and_then(|()| File::create(&log_path))
        .map_err(|source| TracingSetupError::LogFile {
            path: log_path.clone(),
            source,
        })?;

    // stdout carries command output
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(console_directives(console_level)));
    let console_layer = fmt::layer()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_filter(console_filter);

    let file_layer = fmt::layer()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(false)
        .with_writer(log_file)
        .with_filter(EnvFilter::new("trace,hyper=debug,reqwest=debug"));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    tracing::debug!(console = %console_level, file = %log_path.display(), "Logging started");
    Ok(())
}

/// CLI log levels for user control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CliLogLevel {
    /// Only error messages
    Error,
    /// Warning and error messages
    #[default]
    Warn,
    /// Informational, warning, and error messages
    Info,
    /// Debug, informational, warning, and error messages
    Debug,
    /// All messages including detailed tracing
    Trace,
}

impl CliLogLevel {
    /// Converts CLI log level to tracing Level enum.
    ///
    /// # Examples
    /// ```
    /// use cinespark_core::tracing_setup::CliLogLevel;
    ///
    /// let level = CliLogLevel::Info.as_tracing_level();
    /// assert_eq!(level, tracing::Level::INFO);
    /// ```
    pub fn as_tracing_level(self) -> Level {
        match self {
            CliLogLevel::Error => Level::ERROR,
            CliLogLevel::Warn => Level::WARN,
            CliLogLevel::Info => Level::INFO,
            CliLogLevel::Debug => Level::DEBUG,
            CliLogLevel::Trace => Level::TRACE,
        }
    }
}

impl std::fmt::Display for CliLogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliLogLevel::Error => write!(f, "error"),
            CliLogLevel::Warn => write!(f, "warn"),
            CliLogLevel::Info => write!(f, "info"),
            CliLogLevel::Debug => write!(f, "debug"),
            CliLogLevel::Trace => write!(f, "trace"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_console_directives_scope_to_cinespark() {
        assert_eq!(
            console_directives(Level::DEBUG),
            "error,cinespark=debug,cinespark_core=debug,cinespark_search=debug"
        );
    }

    #[test]
    fn test_log_file_lands_in_logs_dir() {
        assert_eq!(
            log_file_path(Path::new("/data/cinespark/logs")),
            Path::new("/data/cinespark/logs/cinespark-last-run.log")
        );
    }

    #[test]
    fn test_unwritable_logs_dir_is_reported() {
        let temp_dir = tempfile::tempdir().unwrap();
        let blocker = temp_dir.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();

        let error = init_tracing(Level::WARN, Some(&blocker)).unwrap_err();
        assert!(matches!(error, TracingSetupError::LogFile { .. }));
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(CliLogLevel::Error.as_tracing_level(), Level::ERROR);
        assert_eq!(CliLogLevel::default().as_tracing_level(), Level::WARN);
        assert_eq!(CliLogLevel::Trace.to_string(), "trace");
    }
}
