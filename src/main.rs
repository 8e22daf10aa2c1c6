//! ElvUI Updater - command-line entry point.
//!
//! # Execution Flow
//!
//! 1. Initialize logging → `log_elvui.log` in the working directory
//! 2. Load and validate `settings.json`
//! 3. Scan the addon directory, query the catalog, compare versions
//! 4. If outdated: delete the old folders, download and extract the release
//!
//! Exit status is 0 for every normal completion (updated, up-to-date, or
//! not installed) and 1 for any error.

use anyhow::{Context, Result};
use camino::Utf8Path;
use elvui_updater::config::DEFAULT_CONFIG_FILE;
use elvui_updater::logging::DEFAULT_LOG_FILE;
use elvui_updater::services::ReqwestClient;
use elvui_updater::{APP_NAME, ConfigManager, UpdateError, UpdateOutcome, Updater, VERSION};
use std::process::ExitCode;

fn main() -> ExitCode {
    let _guard = match elvui_updater::logging::setup_logging(
        Utf8Path::new(DEFAULT_LOG_FILE),
        false,
        false,
    ) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("error when creating log file: {:#}", e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Starting {} v{}", APP_NAME, VERSION);

    match run() {
        Ok(outcome) => {
            tracing::info!("{}", outcome.summary());
            ExitCode::SUCCESS
        }
        Err(e) => {
            let kind = e
                .downcast_ref::<UpdateError>()
                .map(UpdateError::kind)
                .unwrap_or("unknown");
            tracing::error!(kind, "{:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Load configuration and run one update check
fn run() -> Result<UpdateOutcome> {
    let settings = ConfigManager::new(DEFAULT_CONFIG_FILE)
        .load_settings()
        .context("config check error")?;

    let http = ReqwestClient::new().context("http client setup failed")?;
    let mut updater = Updater::new(settings, http);
    let outcome = updater.run().context("update run failed")?;

    Ok(outcome)
}
