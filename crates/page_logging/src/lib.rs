#![deny(missing_docs)]
//! Shared logging utilities for the word count workspace.
//!
//! This crate provides the `page_*` logging macros used across the codebase,
//! a logger initializer for embedding applications, and a minimal test
//! initializer for the global logger.

use std::fs::File;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, ConfigBuilder, SharedLogger, TermLogger, TerminalMode,
    WriteLogger,
};

#[doc(hidden)]
pub use log;

/// File written by [`LogDestination::File`] and [`LogDestination::Both`].
pub const LOG_FILE_NAME: &str = "wordcount.log";

/// Logs a trace-level message using the global logging facade.
#[macro_export]
macro_rules! page_trace {
    ($($arg:tt)*) => {{
        $crate::log::trace!($($arg)*);
    }};
}

/// Logs a debug-level message using the global logging facade.
#[macro_export]
macro_rules! page_debug {
    ($($arg:tt)*) => {{
        $crate::log::debug!($($arg)*);
    }};
}

/// Logs an info-level message using the global logging facade.
#[macro_export]
macro_rules! page_info {
    ($($arg:tt)*) => {{
        $crate::log::info!($($arg)*);
    }};
}

/// Logs a warn-level message using the global logging facade.
#[macro_export]
macro_rules! page_warn {
    ($($arg:tt)*) => {{
        $crate::log::warn!($($arg)*);
    }};
}

/// Logs an error-level message using the global logging facade.
#[macro_export]
macro_rules! page_error {
    ($($arg:tt)*) => {{
        $crate::log::error!($($arg)*);
    }};
}

/// Destination for log output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogDestination {
    /// Write to [`LOG_FILE_NAME`] in the log directory.
    File,
    /// Write to the terminal.
    Terminal,
    /// Write to both file and terminal.
    Both,
}

/// Initializes the global logger, writing any log file to the current directory.
pub fn initialize(destination: LogDestination) -> Option<PathBuf> {
    initialize_in(destination, Path::new("."))
}

/// Initializes the global logger at info level, writing any log file to `log_dir`.
///
/// Returns the log file path when a file logger was installed. Only the first
/// successful call installs a logger; later calls return `None`.
pub fn initialize_in(destination: LogDestination, log_dir: &Path) -> Option<PathBuf> {
    let level = LevelFilter::Info;
    let config = build_config();

    let wants_file = matches!(destination, LogDestination::File | LogDestination::Both);
    let wants_terminal = matches!(destination, LogDestination::Terminal | LogDestination::Both);

    let mut loggers: Vec<Box<dyn SharedLogger>> = Vec::new();
    if wants_terminal {
        loggers.push(TermLogger::new(
            level,
            config.clone(),
            TerminalMode::Mixed,
            ColorChoice::Auto,
        ));
    }
    let log_path = if wants_file {
        let log_path = log_dir.join(LOG_FILE_NAME);
        match File::create(&log_path) {
            Ok(file) => {
                loggers.push(WriteLogger::new(level, config, file));
                Some(log_path)
            }
            Err(err) => {
                eprintln!("Warning: Could not create log file at {:?}: {}", log_path, err);
                None
            }
        }
    } else {
        None
    };

    if loggers.is_empty() {
        return None;
    }
    CombinedLogger::init(loggers).ok().and(log_path)
}

/// Initializes a simple terminal logger for use in tests.
///
/// This safely no-ops if another logger has already been initialized.
pub fn initialize_for_tests() {
    // Use debug level in debug builds, info in release builds.
    let level = if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let _ = CombinedLogger::init(vec![TermLogger::new(
        level,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )]);
}

fn build_config() -> Config {
    ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_target_level(LevelFilter::Error)
        .build()
}
