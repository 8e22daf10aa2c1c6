use crate::error::UpdateError;
use camino::Utf8PathBuf;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Run configuration from settings.json
///
/// Holds the WoW addon directory, the folder names that make up the ElvUI
/// installation and the catalog API endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(rename = "wow_addon_directory", default)]
    pub addon_directory: Utf8PathBuf,

    #[serde(rename = "elvui_folders", default)]
    pub tracked_folders: IndexSet<String>,

    #[serde(rename = "api", default)]
    pub api_endpoint: String,
}

impl Settings {
    /// Check that every required field is present and non-empty.
    ///
    /// Fields are checked in the order api, folders, directory so the
    /// first missing one is reported.
    pub fn validate(&self) -> Result<(), UpdateError> {
        if self.api_endpoint.trim().is_empty() {
            return Err(UpdateError::Config(
                "API url not present in config file".to_string(),
            ));
        }

        if self.tracked_folders.is_empty() {
            return Err(UpdateError::Config(
                "ElvUI folders not present in config file".to_string(),
            ));
        }

        if self.tracked_folders.iter().any(|f| f.trim().is_empty()) {
            return Err(UpdateError::Config(
                "ElvUI folders contain an empty name".to_string(),
            ));
        }

        if self.addon_directory.as_str().trim().is_empty() {
            return Err(UpdateError::Config(
                "WoW addon directory not present in config file".to_string(),
            ));
        }

        Ok(())
    }

    /// Check if a folder name belongs to the tracked ElvUI installation
    pub fn is_tracked(&self, folder_name: &str) -> bool {
        self.tracked_folders.contains(folder_name)
    }
}
