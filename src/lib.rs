// ElvUI Updater - keeps a World of Warcraft ElvUI installation current
//
// This is the library crate containing the update workflow and data structures.
// The binary crate (main.rs) wires logging, configuration and exit codes.

pub mod config;
pub mod error;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use error::UpdateError;
pub use models::{LocalAddonEntry, RemoteAddonRecord, Settings, UpdateOutcome, UpdatePhase};
pub use services::Updater;

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
