//! Tracing setup.
//!
//! The player owns the terminal, so it logs to a file. Plain subcommands
//! log to stderr, quiet unless `-v` is given.

use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LogConfig;

/// Where log lines go.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogTarget {
    /// Log file from the config (used while the player is on screen)
    File,
    Stderr,
}

/// Filter directive for stderr output given the `-v` count.
pub fn stderr_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::builder().parse(level))
        .unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. `RUST_LOG` always wins over the config.
///
/// Failing to open the log file falls back to stderr at `warn`; a
/// subscriber that is already installed is left in place.
pub fn init_logging(config: &LogConfig, target: LogTarget, verbose: u8) {
    if target == LogTarget::File {
        if let Some(path) = config.file_path() {
            match open_log_file(&path) {
                Ok(file) => {
                    let layer = fmt::layer()
                        .with_target(true)
                        .with_ansi(false)
                        .with_writer(Mutex::new(file))
                        .with_filter(build_filter(&config.level));
                    if tracing_subscriber::registry().with(layer).try_init().is_ok() {
                        tracing::info!(path = %path.display(), "Logging initialized");
                    }
                    return;
                }
                Err(e) => eprintln!("Cannot open log file {}: {}", path.display(), e),
            }
        }
    }

    let level = match target {
        LogTarget::Stderr => stderr_level(verbose),
        LogTarget::File => "warn",
    };
    let layer = fmt::layer()
        .with_target(true)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .with_writer(std::io::stderr)
        .with_filter(build_filter(level));
    let _ = tracing_subscriber::registry().with(layer).try_init();
}

fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(stderr_level(0), "warn");
        assert_eq!(stderr_level(1), "info");
        assert_eq!(stderr_level(2), "debug");
        assert_eq!(stderr_level(7), "trace");
    }

    #[test]
    fn log_file_is_created_with_parents() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("logs").join("reelsync.log");
        open_log_file(&path).unwrap();
        assert!(path.exists());
    }
}
