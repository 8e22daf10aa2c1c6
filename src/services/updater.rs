use crate::error::UpdateError;
use crate::models::{RemoteAddonRecord, Settings, UpdateOutcome, UpdatePhase};
use crate::services::archive::extract_archive;
use crate::services::catalog::{HttpClient, fetch_elvui_record};
use crate::services::scanner::{installed_version, scan, tracked_addons};
use crate::services::version::{AddonVersion, is_outdated, parse_version};
use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use std::fs;
use std::io;

/// File name of the downloaded release inside the staging directory
const ARCHIVE_FILE_NAME: &str = "elvui.zip";

/// Drives one check-and-update run for the configured ElvUI installation.
///
/// The run is strictly linear and fail-fast: scan the addon directory, query
/// the catalog, compare installed and published versions, and if any tracked
/// folder is older, delete the bundled folders, download the release and
/// extract it. Nothing is rolled back when a later step fails.
pub struct Updater<C: HttpClient> {
    settings: Settings,
    http: C,
    phase: UpdatePhase,
}

impl<C: HttpClient> Updater<C> {
    /// Create an updater for validated `settings` using `http` for all
    /// network access.
    pub fn new(settings: Settings, http: C) -> Self {
        Self {
            settings,
            http,
            phase: UpdatePhase::Checking,
        }
    }

    /// Current phase of the run
    pub fn phase(&self) -> UpdatePhase {
        self.phase
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Run the full check-and-update workflow.
    ///
    /// The addon directory is scanned before any network access, so an
    /// unreadable directory fails without touching the API. When no tracked
    /// folder is installed the catalog is not queried at all.
    pub fn run(&mut self) -> Result<UpdateOutcome, UpdateError> {
        self.phase = UpdatePhase::Checking;
        let addon_dir = self.settings.addon_directory.clone();

        tracing::info!("WoW addons directory: {}", addon_dir);
        tracing::info!("API: {}", self.settings.api_endpoint);

        let addons = scan(&addon_dir)?;
        let (present, tracked) = tracked_addons(&self.settings, &addons);
        if !present {
            tracing::info!("No tracked ElvUI folder found in {}", addon_dir);
            self.transition(UpdatePhase::Done);
            return Ok(UpdateOutcome::NotInstalled);
        }

        let record = fetch_elvui_record(&self.http, &self.settings.api_endpoint)?;
        tracing::info!(
            "Catalog version of {}: {} ({} folders)",
            record.identifier,
            record.version,
            record.bundled_folders.len()
        );

        let mut outdated_from = None;
        let mut newest_installed: Option<(AddonVersion, String)> = None;
        for addon in &tracked {
            let installed = installed_version(&addon_dir, &addon.folder_name)?;
            let outdated = is_outdated(&installed, &record.version)?;

            tracing::info!("addon: {} installed version: {}", addon.folder_name, installed);
            tracing::info!("addon: {} remote version: {}", addon.folder_name, record.version);

            if outdated {
                tracing::warn!("Outdated !");
                outdated_from = Some(installed);
                break;
            }
            let parsed = parse_version(&installed)?;
            if newest_installed
                .as_ref()
                .is_none_or(|(newest, _)| parsed > *newest)
            {
                newest_installed = Some((parsed, installed));
            }
        }

        let Some(from) = outdated_from else {
            self.transition(UpdatePhase::UpToDate);
            tracing::info!("nothing to do, addon is up-to-date");
            self.transition(UpdatePhase::Done);
            return Ok(UpdateOutcome::UpToDate {
                installed: newest_installed
                    .map(|(_, installed)| installed)
                    .unwrap_or_default(),
                remote: record.version,
            });
        };

        self.transition(UpdatePhase::Outdated);
        remove_bundled_folders(&addon_dir, &record.bundled_folders)?;
        self.install_release(&record)?;

        tracing::info!("Updated ElvUI from {} to {}", from, record.version);
        Ok(UpdateOutcome::Updated {
            from,
            to: record.version,
        })
    }

    /// Download the release archive into a temporary staging directory and
    /// extract it into the addon directory.
    fn install_release(&mut self, record: &RemoteAddonRecord) -> Result<(), UpdateError> {
        self.transition(UpdatePhase::Downloading);

        let staging_dir = tempfile::Builder::new()
            .prefix("elvui-updater-")
            .tempdir()
            .map_err(|source| UpdateError::Staging {
                path: Utf8PathBuf::from(std::env::temp_dir().to_string_lossy().into_owned()),
                source,
            })?;
        let staging_path = Utf8PathBuf::try_from(staging_dir.path().to_path_buf()).map_err(|e| {
            UpdateError::Staging {
                path: Utf8PathBuf::from(e.as_path().to_string_lossy().into_owned()),
                source: io::Error::new(io::ErrorKind::InvalidData, "non UTF-8 temp directory"),
            }
        })?;
        let archive_path = staging_path.join(ARCHIVE_FILE_NAME);

        tracing::info!("Downloading {} to {}", record.download_url, archive_path);
        let bytes = self
            .http
            .download_to_file(&record.download_url, &archive_path)?;
        tracing::info!("Downloaded {} bytes", bytes);

        self.transition(UpdatePhase::Extracting);
        let files = extract_archive(&archive_path, &self.settings.addon_directory)?;
        tracing::info!("Extracted {} files into {}", files, self.settings.addon_directory);

        self.transition(UpdatePhase::Done);
        Ok(())
    }

    fn transition(&mut self, next: UpdatePhase) {
        debug_assert!(
            self.phase.can_transition_to(next),
            "illegal phase transition {} -> {}",
            self.phase,
            next
        );
        tracing::debug!("Update phase: {} -> {}", self.phase, next);
        self.phase = next;
    }
}

/// Recursively delete each of `folders` under `addon_dir`.
///
/// Missing folders are skipped. Names must be a single plain path component
/// so a bad catalog entry can never delete the addon directory itself or
/// anything outside it.
///
/// # Returns
/// The number of folders removed
///
/// # Errors
/// Returns [`UpdateError::Deletion`] on the first failure; earlier deletions
/// are not undone.
pub fn remove_bundled_folders(
    addon_dir: &Utf8Path,
    folders: &[String],
) -> Result<usize, UpdateError> {
    let mut removed = 0;

    for folder in folders {
        let path = addon_dir.join(folder);

        if !is_plain_folder_name(folder) {
            return Err(UpdateError::Deletion {
                path,
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("refusing to delete '{}': not a plain folder name", folder),
                ),
            });
        }

        if !path.exists() {
            tracing::debug!("Folder {} not present, skipping", path);
            continue;
        }

        fs::remove_dir_all(&path).map_err(|source| UpdateError::Deletion {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Removed {}", path);
        removed += 1;
    }

    Ok(removed)
}

fn is_plain_folder_name(name: &str) -> bool {
    let mut components = Utf8Path::new(name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Utf8Component::Normal(_)), None)
    )
}
