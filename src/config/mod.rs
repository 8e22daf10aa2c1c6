use crate::error::UpdateError;
use crate::models::Settings;
use camino::{Utf8Path, Utf8PathBuf};
use config::{Config, File, FileFormat};

/// Default configuration file name, looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "settings.json";

/// Configuration manager for loading the JSON settings file.
///
/// The file is read once at startup:
/// ```json
/// { "wow_addon_directory": "...", "elvui_folders": ["ElvUI"], "api": "https://..." }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager for the given settings file.
    ///
    /// # Arguments
    /// * `config_path` - Path to the JSON settings file (e.g., "settings.json")
    pub fn new<P: AsRef<Utf8Path>>(config_path: P) -> Self {
        Self {
            config_path: config_path.as_ref().to_path_buf(),
        }
    }

    /// Load and validate the settings file.
    ///
    /// # Errors
    /// Returns [`UpdateError::Config`] if the file is missing, is not valid
    /// JSON, has fields of the wrong type, or fails [`Settings::validate`].
    pub fn load_settings(&self) -> Result<Settings, UpdateError> {
        if !self.config_path.is_file() {
            return Err(UpdateError::Config(format!(
                "config file not found: {}",
                self.config_path
            )));
        }

        let source = Config::builder()
            .add_source(File::new(self.config_path.as_str(), FileFormat::Json).required(true))
            .build()
            .map_err(|e| {
                UpdateError::Config(format!("Failed to read {}: {}", self.config_path, e))
            })?;

        let settings: Settings = source.try_deserialize().map_err(|e| {
            UpdateError::Config(format!("Failed to parse {}: {}", self.config_path, e))
        })?;

        settings.validate()?;

        tracing::info!("Loaded settings from {}", self.config_path);
        Ok(settings)
    }

    /// Get the settings file path.
    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}
