//! Data models for the ElvUI updater.
//!
//! - [`Settings`]: Run configuration loaded from `settings.json`
//! - [`RemoteAddonRecord`]: One package entry from the remote catalog
//! - [`LocalAddonEntry`]: One addon folder found on disk
//! - [`UpdatePhase`] / [`UpdateOutcome`]: Progress and result of a run
//!
//! All models are rebuilt on every run; nothing is persisted except the
//! addon folders themselves and the log file.

pub mod addon;
pub mod catalog;
pub mod settings;

pub use addon::{LocalAddonEntry, UpdateOutcome, UpdatePhase};
pub use catalog::{ELVUI_SLUG, RemoteAddonRecord};
pub use settings::Settings;
