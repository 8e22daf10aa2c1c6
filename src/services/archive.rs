//! Zip extraction into the addon directory.

use crate::error::UpdateError;
use camino::Utf8Path;
use std::fs::{self, File};
use std::io;
use zip::ZipArchive;

/// Extract every entry of the zip at `archive_path` into `dest`.
///
/// A single archive handle is used for all entries. Directory entries are
/// created with their parents; file entries truncate any existing file.
/// Extraction stops at the first failing entry and leaves already
/// extracted files in place.
///
/// # Returns
/// The number of files written
///
/// # Errors
/// - [`UpdateError::ArchiveOpen`] if the file is missing or not a zip
/// - [`UpdateError::Extraction`] if an entry cannot be read or written, or
///   its name would land outside `dest`
pub fn extract_archive(archive_path: &Utf8Path, dest: &Utf8Path) -> Result<usize, UpdateError> {
    let open_error = |reason: String| UpdateError::ArchiveOpen {
        path: archive_path.to_path_buf(),
        reason,
    };

    let file = File::open(archive_path).map_err(|e| open_error(e.to_string()))?;
    let mut archive = ZipArchive::new(file).map_err(|e| open_error(e.to_string()))?;

    tracing::info!(
        "Extracting {} entries from {} into {}",
        archive.len(),
        archive_path,
        dest
    );

    let mut files_written = 0;
    for index in 0..archive.len() {
        let mut entry = archive.by_index(index).map_err(|e| UpdateError::Extraction {
            entry: format!("entry #{}", index),
            reason: e.to_string(),
        })?;

        let name = entry.name().to_string();
        let extraction_error = |reason: String| UpdateError::Extraction {
            entry: name.clone(),
            reason,
        };

        let relative = entry
            .enclosed_name()
            .ok_or_else(|| extraction_error("path escapes the addon directory".to_string()))?;
        let out_path = dest.as_std_path().join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&out_path).map_err(|e| extraction_error(e.to_string()))?;
            continue;
        }

        if let Some(parent) = out_path.parent() {
            fs::create_dir_all(parent).map_err(|e| extraction_error(e.to_string()))?;
        }

        let mut out_file = File::create(&out_path).map_err(|e| extraction_error(e.to_string()))?;
        io::copy(&mut entry, &mut out_file).map_err(|e| extraction_error(e.to_string()))?;

        tracing::debug!("Extracted {}", name);
        files_written += 1;
    }

    Ok(files_written)
}
