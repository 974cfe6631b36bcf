//! Logging setup
//!
//! Library code logs through the `log` macros. By default `env_logger` writes
//! to stderr filtered by `RUST_LOG`; with file logging enabled every debug
//! line goes to a log file instead so it never mixes with status output.

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::OpenOptions;
use std::path::Path;

pub const LOG_FILE: &str = "gitship-debug.log";

/// Where log output goes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LogDestination {
    /// `RUST_LOG`-filtered output on stderr
    #[default]
    Stderr,
    /// Debug-level output appended to a file
    File(String),
}

impl LogDestination {
    pub fn from_flags(log: bool, log_file: Option<&str>) -> Self {
        if log || log_file.is_some() {
            Self::File(log_file.unwrap_or(LOG_FILE).to_string())
        } else {
            Self::Stderr
        }
    }
}

/// Install the global logger. Calling it twice is harmless.
pub fn init(destination: &LogDestination) -> Result<()> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

    if let LogDestination::File(path) = destination {
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(Path::new(path))
            .with_context(|| format!("Failed to open log file {path}"))?;
        builder
            .filter_level(LevelFilter::Debug)
            .target(Target::Pipe(Box::new(file)));
    }

    // Another logger may already be installed (tests, embedding binaries)
    let _ = builder.try_init();
    Ok(())
}
