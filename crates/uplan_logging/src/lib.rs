#![deny(missing_docs)]
//! Shared logging utilities for the u:plan workspace.
//!
//! This crate provides the `uplan_*` logging macros used across the codebase,
//! a minimal test initializer for the global logger and the initializer used
//! by the `uplan` binary.

use std::fmt;
use std::fs::File;
use std::path::Path;
use std::str::FromStr;

use log::LevelFilter;
use serde::{Deserialize, Serialize};
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

/// Default log file, relative to the current working directory.
pub const DEFAULT_LOG_FILE: &str = "./uplan.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! uplan_trace {
    ($($arg:tt)*) => {{
        log::trace!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! uplan_info {
    ($($arg:tt)*) => {{
        log::info!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! uplan_debug {
    ($($arg:tt)*) => {{
        log::debug!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! uplan_warn {
    ($($arg:tt)*) => {{
        log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! uplan_error {
    ($($arg:tt)*) => {{
        log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogDestination {
    /// Write to the log file only.
    #[default]
    File,
    /// Write to the terminal (stderr for warnings and errors).
    Terminal,
    /// Write to both file and terminal.
    Both,
    /// Install no logger.
    Off,
}

impl FromStr for LogDestination {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "file" => Ok(Self::File),
            "terminal" => Ok(Self::Terminal),
            "both" => Ok(Self::Both),
            "off" => Ok(Self::Off),
            other => Err(format!(
                "unknown log destination '{other}' (expected file, terminal, both or off)"
            )),
        }
    }
}

impl fmt::Display for LogDestination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::File => "file",
            Self::Terminal => "terminal",
            Self::Both => "both",
            Self::Off => "off",
        };
        f.write_str(label)
    }
}

/// Initialize the global logger with the specified destination.
///
/// For `LogDestination::File` or `Both`, creates (truncates) `log_path`.
/// A second call is ignored, as is a file that cannot be created.
pub fn initialize(destination: LogDestination, level: LevelFilter, log_path: &Path) {
    let loggers = build_loggers(destination, level, log_path);
    if loggers.is_empty() {
        return;
    }
    let _ = CombinedLogger::init(loggers);
}

/// Initializes a simple terminal logger for use in unit tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    // Ignore the error if a logger was already set by another test.
    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_loggers(
    destination: LogDestination,
    level: LevelFilter,
    log_path: &Path,
) -> Vec<Box<dyn SharedLogger>> {
    let config = build_config();
    match destination {
        LogDestination::Off => Vec::new(),
        LogDestination::File => create_file_logger(level, config, log_path)
            .map(|logger| vec![logger as Box<dyn SharedLogger>])
            .unwrap_or_default(),
        LogDestination::Terminal => vec![TermLogger::new(
            level,
            config,
            TerminalMode::Stderr,
            ColorChoice::Auto,
        )],
        LogDestination::Both => {
            let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
                level,
                config.clone(),
                TerminalMode::Stderr,
                ColorChoice::Auto,
            )];
            if let Some(file_logger) = create_file_logger(level, config, log_path) {
                loggers.push(file_logger);
            }
            loggers
        }
    }
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}

fn create_file_logger(
    level: LevelFilter,
    config: Config,
    log_path: &Path,
) -> Option<Box<WriteLogger<File>>> {
    match File::create(log_path) {
        Ok(file) => Some(WriteLogger::new(level, config, file)),
        Err(err) => {
            eprintln!(
                "Warning: Could not create log file at {:?}: {}",
                log_path, err
            );
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destination_parses_case_insensitively() {
        assert_eq!("Both".parse::<LogDestination>(), Ok(LogDestination::Both));
        assert_eq!(" off ".parse::<LogDestination>(), Ok(LogDestination::Off));
        assert!("syslog".parse::<LogDestination>().is_err());
    }

    #[test]
    fn off_builds_no_loggers() {
        let dir = tempfile::tempdir().unwrap();
        let loggers = build_loggers(
            LogDestination::Off,
            LevelFilter::Info,
            &dir.path().join("uplan.log"),
        );
        assert!(loggers.is_empty());
    }

    #[test]
    fn both_creates_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("uplan.log");
        let loggers = build_loggers(LogDestination::Both, LevelFilter::Info, &path);
        assert_eq!(loggers.len(), 2);
        assert!(path.exists());
    }

    #[test]
    fn unwritable_file_destination_falls_back_to_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("uplan.log");
        let loggers = build_loggers(LogDestination::File, LevelFilter::Info, &path);
        assert!(loggers.is_empty());
    }
}
