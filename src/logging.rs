use anyhow::{Context, Result};
use camino::Utf8Path;
use std::fs::{self, File};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Default log file name, created in the working directory
pub const DEFAULT_LOG_FILE: &str = "log_elvui.log";

/// Setup logging to a single file that is truncated at the start of each run.
///
/// # Arguments
/// * `log_file` - Path of the log file (e.g., "log_elvui.log")
/// * `debug_mode` - If true, use debug level; otherwise use info level.
///   `RUST_LOG` overrides both when set.
/// * `console_output` - If true, also log to stderr
///
/// # Returns
/// A guard that must be held for the duration of the program to keep logging active
pub fn setup_logging(
    log_file: &Utf8Path,
    debug_mode: bool,
    console_output: bool,
) -> Result<WorkerGuard> {
    if let Some(parent) = log_file.parent() {
        if !parent.as_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent))?;
        }
    }

    let file = File::create(log_file)
        .with_context(|| format!("Failed to create log file: {}", log_file))?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    let default_level = if debug_mode { "debug" } else { "info" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false) // No ANSI codes in log files
        .with_target(true);

    let console_layer = console_output.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_ansi(true)
            .with_target(false)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::info!(
        "Logging initialized: file={}, debug={}, console={}",
        log_file,
        debug_mode,
        console_output
    );

    Ok(guard)
}
