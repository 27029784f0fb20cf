// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Logging initialization
//!
//! Console output always; with the `file-logging` feature and a configured
//! directory, JSON logs are additionally written to a timestamped run folder:
//!
//! ```text
//! <file_dir>/
//!   └── run_20250101_120000/
//!       └── anatomy.log
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::cli::CrateDebugFlags;
use crate::config::{LogFormat, LoggingOptions};

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Keeps log writers alive; drop it only at shutdown
pub struct LoggingGuard {
    #[cfg(feature = "file-logging")]
    _file_guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
    log_dir: Option<PathBuf>,
}

impl LoggingGuard {
    /// Run folder receiving JSON logs, if file logging is active
    pub fn log_dir(&self) -> Option<&Path> {
        self.log_dir.as_deref()
    }
}

/// Name of the per-run folder created below the configured log directory
pub fn run_folder_name() -> String {
    format!("run_{}", Utc::now().format("%Y%m%d_%H%M%S"))
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Fails if the log folder cannot be created, if file logging is requested
/// without the `file-logging` feature, or if a global subscriber is already set.
pub fn init_logging(debug_flags: &CrateDebugFlags, options: &LoggingOptions) -> Result<LoggingGuard> {
    let filter = debug_flags.to_filter_string(&options.level);
    let mut layers: Vec<BoxedLayer> = Vec::new();

    let console_layer = match options.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_filter(EnvFilter::new(&filter))
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_filter(EnvFilter::new(&filter))
            .boxed(),
    };
    layers.push(console_layer);

    let guard = match &options.file_dir {
        None => LoggingGuard {
            #[cfg(feature = "file-logging")]
            _file_guards: Vec::new(),
            log_dir: None,
        },
        Some(base_dir) => attach_file_layer(base_dir, &filter, &mut layers)?,
    };

    Registry::default()
        .with(layers)
        .try_init()
        .context("A global tracing subscriber is already installed")?;

    Ok(guard)
}

#[cfg(feature = "file-logging")]
fn attach_file_layer(base_dir: &Path, filter: &str, layers: &mut Vec<BoxedLayer>) -> Result<LoggingGuard> {
    let run_folder = base_dir.join(run_folder_name());
    std::fs::create_dir_all(&run_folder)
        .with_context(|| format!("Failed to create log directory: {}", run_folder.display()))?;

    let appender = tracing_appender::rolling::never(&run_folder, "anatomy.log");
    let (non_blocking, file_guard) = tracing_appender::non_blocking(appender);

    layers.push(
        tracing_subscriber::fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .json()
            .with_filter(EnvFilter::new(filter))
            .boxed(),
    );

    Ok(LoggingGuard {
        _file_guards: vec![file_guard],
        log_dir: Some(run_folder),
    })
}

#[cfg(not(feature = "file-logging"))]
fn attach_file_layer(base_dir: &Path, _filter: &str, _layers: &mut Vec<BoxedLayer>) -> Result<LoggingGuard> {
    anyhow::bail!(
        "File logging to {} requested but the `file-logging` feature is disabled",
        base_dir.display()
    )
}

/// Initialize console logging with default options
pub fn init_logging_default(debug_flags: &CrateDebugFlags) -> Result<LoggingGuard> {
    init_logging(debug_flags, &LoggingOptions::default())
}
