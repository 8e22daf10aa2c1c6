//! Local addon inventory and installed version discovery.
//!
//! Addons live as folders directly under the WoW `Interface/AddOns`
//! directory. Each folder carries a `<Folder>_Mainline.toc` manifest with a
//! `## Version: <value>` line.

use crate::error::UpdateError;
use crate::models::{LocalAddonEntry, Settings};
use camino::Utf8Path;
use regex::Regex;
use std::fs::{self, File};
use std::io::{BufRead, BufReader};
use std::sync::LazyLock;

/// Matches the version directive of a TOC manifest, e.g. `## Version: v13.80`
static VERSION_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s*Version\s*:(.*)$").expect("Invalid TOC version regex"));

/// List the addon folders directly under `directory`.
///
/// Plain files are skipped. Entries are sorted by folder name so logs are
/// reproducible across runs.
///
/// # Errors
/// Returns [`UpdateError::DirectoryAccess`] if the directory cannot be listed
pub fn scan(directory: &Utf8Path) -> Result<Vec<LocalAddonEntry>, UpdateError> {
    let access_error = |source| UpdateError::DirectoryAccess {
        path: directory.to_path_buf(),
        source,
    };

    let mut addons = Vec::new();
    for entry in fs::read_dir(directory).map_err(access_error)? {
        let entry = entry.map_err(access_error)?;
        let file_type = entry.file_type().map_err(access_error)?;
        if !file_type.is_dir() {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) => addons.push(LocalAddonEntry::new(name)),
            Err(name) => {
                tracing::warn!("Skipping addon folder with non UTF-8 name: {:?}", name);
            }
        }
    }

    addons.sort();
    tracing::debug!("Found {} addon folders in {}", addons.len(), directory);
    Ok(addons)
}

/// Keep the scanned entries that belong to the tracked ElvUI installation.
///
/// Returns whether any tracked folder is present, plus the matching entries
/// in scan order.
pub fn tracked_addons(
    settings: &Settings,
    addons: &[LocalAddonEntry],
) -> (bool, Vec<LocalAddonEntry>) {
    let tracked: Vec<LocalAddonEntry> = addons
        .iter()
        .filter(|addon| settings.is_tracked(&addon.folder_name))
        .cloned()
        .collect();

    (!tracked.is_empty(), tracked)
}

/// Read the installed version of `folder_name` from its TOC manifest.
///
/// The first `## Version:` line wins. Surrounding whitespace and one leading
/// `v` are stripped from the value.
///
/// # Errors
/// - [`UpdateError::FileNotFound`] if the manifest cannot be opened or read
/// - [`UpdateError::EmptyVersion`] if the version line has no value
/// - [`UpdateError::VersionNotFound`] if no version line exists
pub fn installed_version(
    addon_directory: &Utf8Path,
    folder_name: &str,
) -> Result<String, UpdateError> {
    let entry = LocalAddonEntry::new(folder_name);
    let toc_path = addon_directory
        .join(&entry.folder_name)
        .join(entry.toc_file_name());

    let file = File::open(&toc_path).map_err(|source| UpdateError::FileNotFound {
        path: toc_path.clone(),
        source,
    })?;

    for line_result in BufReader::new(file).lines() {
        let line = line_result.map_err(|source| UpdateError::FileNotFound {
            path: toc_path.clone(),
            source,
        })?;

        if let Some(captures) = VERSION_LINE.captures(line.trim()) {
            let value = captures[1].trim();
            let version = value.strip_prefix('v').unwrap_or(value);
            if version.is_empty() {
                return Err(UpdateError::EmptyVersion(toc_path));
            }
            return Ok(version.to_string());
        }
    }

    Err(UpdateError::VersionNotFound(toc_path))
}
