//! Shared logging setup for imgindex binaries.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

pub const DEFAULT_LOG_FILTER: &str = "imgindex=info,imgindex_logging=info";

/// Logging configuration for a binary.
pub struct LogConfig<'a> {
    pub app_name: &'a str,
    /// Directory for the rolling log file. `None` disables file logging.
    pub log_dir: Option<&'a Path>,
    pub verbose: bool,
}

/// Keeps the non-blocking file writer alive; hold it until exit.
pub struct LogGuard {
    file: Option<WorkerGuard>,
}

impl LogGuard {
    pub fn has_file_writer(&self) -> bool {
        self.file.is_some()
    }
}

/// Initialize tracing with a daily rolling file writer and stderr output.
///
/// The console only shows warnings unless `verbose` is set, so command
/// output on stdout stays machine-readable.
pub fn init_logging(config: LogConfig<'_>) -> Result<LogGuard> {
    let file_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let console_filter = if config.verbose {
        file_filter.clone()
    } else {
        EnvFilter::new("warn")
    };

    let mut file_guard = None;
    let file_layer = match config.log_dir {
        Some(dir) => match ensure_dir(dir) {
            Ok(dir) => {
                let appender =
                    tracing_appender::rolling::daily(dir, log_file_name(config.app_name));
                let (writer, guard) = tracing_appender::non_blocking(appender);
                file_guard = Some(guard);
                Some(
                    tracing_subscriber::fmt::layer()
                        .with_writer(writer)
                        .with_ansi(false)
                        .with_filter(file_filter),
                )
            }
            Err(err) => {
                eprintln!("Warning: file logging disabled: {:#}", err);
                None
            }
        },
        None => None,
    };

    tracing_subscriber::registry()
        .with(file_layer)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_filter(console_filter),
        )
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(LogGuard { file: file_guard })
}

fn ensure_dir(dir: &Path) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create logs directory: {}", dir.display()))?;
    Ok(dir.to_path_buf())
}

fn log_file_name(app_name: &str) -> String {
    format!("{}.log", sanitize_name(app_name))
}

fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|ch| if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' { ch } else { '_' })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_name_is_sanitized() {
        assert_eq!(log_file_name("imgindex"), "imgindex.log");
        assert_eq!(log_file_name("img index/v2"), "img_index_v2.log");
    }

    // The only test that installs the global subscriber.
    #[test]
    fn init_logging_attaches_file_writer() {
        let temp = tempfile::TempDir::new().unwrap();
        let log_dir = temp.path().join("logs");
        let guard = init_logging(LogConfig {
            app_name: "imgindex-test",
            log_dir: Some(&log_dir),
            verbose: false,
        })
        .unwrap();
        assert!(guard.has_file_writer());
        assert!(log_dir.is_dir());
    }

    #[test]
    fn ensure_dir_creates_nested_directories() {
        let temp = tempfile::TempDir::new().unwrap();
        let nested = temp.path().join("a").join("logs");
        let created = ensure_dir(&nested).unwrap();
        assert!(created.is_dir());
    }
}
