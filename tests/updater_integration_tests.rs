//! Integration tests for the Updater workflow
//!
//! These tests verify:
//! - The outdated path deletes, downloads and extracts
//! - The up-to-date path leaves the disk untouched, run after run
//! - Failures stop the run without rolling back earlier steps
//! - No network access happens before the addon directory is readable

use camino::{Utf8Path, Utf8PathBuf};
use elvui_updater::services::HttpClient;
use elvui_updater::{Settings, UpdateError, UpdateOutcome, UpdatePhase, Updater};
use mockall::mock;
use mockall::predicate::{always, eq};
use std::collections::BTreeMap;
use std::fs;
use std::io::{Cursor, Write};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

mock! {
    pub Http {}

    impl HttpClient for Http {
        fn get_bytes(&self, url: &str) -> Result<Vec<u8>, UpdateError>;
        fn download_to_file(&self, url: &str, dest: &Utf8Path) -> Result<u64, UpdateError>;
    }
}

const API: &str = "https://api.example.com/addons";
const ARCHIVE_URL: &str = "https://cdn.example.com/elvui-95.0.zip";

fn create_addon_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, path)
}

fn settings_for(dir: &Utf8Path) -> Settings {
    Settings {
        addon_directory: dir.to_path_buf(),
        tracked_folders: ["ElvUI", "ElvUI_Options"]
            .into_iter()
            .map(String::from)
            .collect(),
        api_endpoint: API.to_string(),
    }
}

fn install_addon(dir: &Utf8Path, folder: &str, version: &str) {
    let folder_path = dir.join(folder);
    fs::create_dir_all(&folder_path).unwrap();
    fs::write(
        folder_path.join(format!("{}_Mainline.toc", folder)),
        format!("## Interface: 110002\n## Title: {}\n## Version: {}\n", folder, version),
    )
    .unwrap();
}

fn catalog_json(version: &str) -> Vec<u8> {
    format!(
        r#"[
            {{"slug":"tukui","url":"https://cdn.example.com/tukui.zip","version":"20.44","directories":["Tukui"]}},
            {{"slug":"elvui","url":"{}","version":"{}","directories":["ElvUI","ElvUI_Options","ElvUI_Libraries"]}}
        ]"#,
        ARCHIVE_URL, version
    )
    .into_bytes()
}

fn release_zip(version: &str) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for folder in ["ElvUI", "ElvUI_Options", "ElvUI_Libraries"] {
        writer.add_directory(format!("{}/", folder), options).unwrap();
        writer
            .start_file(format!("{}/{}_Mainline.toc", folder, folder), options)
            .unwrap();
        write!(writer, "## Version: v{}\n", version).unwrap();
    }
    writer.start_file("ElvUI/Core/init.lua", options).unwrap();
    writer.write_all(b"local E = unpack(ElvUI)\n").unwrap();

    writer.finish().unwrap().into_inner()
}

/// Every file under `dir` with its contents, for before/after comparisons
fn snapshot(dir: &Utf8Path) -> BTreeMap<Utf8PathBuf, Vec<u8>> {
    let mut files = BTreeMap::new();
    let mut pending = vec![dir.to_path_buf()];
    while let Some(current) = pending.pop() {
        for entry in current.read_dir_utf8().unwrap() {
            let entry = entry.unwrap();
            let path = entry.path().to_path_buf();
            if path.is_dir() {
                files.insert(path.clone(), Vec::new());
                pending.push(path);
            } else {
                files.insert(path.clone(), fs::read(&path).unwrap());
            }
        }
    }
    files
}

fn catalog_mock(version: &'static str) -> MockHttp {
    let mut http = MockHttp::new();
    http.expect_get_bytes()
        .with(eq(API))
        .times(1)
        .returning(move |_| Ok(catalog_json(version)));
    http
}

#[test]
fn test_outdated_addon_is_replaced() {
    let (_temp_dir, dir) = create_addon_dir();
    install_addon(&dir, "ElvUI", "94.9");
    install_addon(&dir, "ElvUI_Options", "94.9");
    fs::write(dir.join("ElvUI/obsolete.lua"), "-- removed upstream").unwrap();
    install_addon(&dir, "Details", "1.0.0");

    let mut http = catalog_mock("95.0");
    let archive = release_zip("95.0");
    http.expect_download_to_file()
        .with(eq(ARCHIVE_URL), always())
        .times(1)
        .returning(move |_, dest| {
            fs::write(dest, &archive).unwrap();
            Ok(archive.len() as u64)
        });

    let mut updater = Updater::new(settings_for(&dir), http);
    let outcome = updater.run().unwrap();

    assert_eq!(
        outcome,
        UpdateOutcome::Updated {
            from: "94.9".to_string(),
            to: "95.0".to_string(),
        }
    );
    assert_eq!(updater.phase(), UpdatePhase::Done);

    // Old files are gone, new release is in place
    assert!(!dir.join("ElvUI/obsolete.lua").exists());
    assert!(dir.join("ElvUI/Core/init.lua").is_file());
    assert!(dir.join("ElvUI_Libraries").is_dir());
    let toc = fs::read_to_string(dir.join("ElvUI/ElvUI_Mainline.toc")).unwrap();
    assert_eq!(toc, "## Version: v95.0\n");

    // Unrelated addons are untouched
    assert!(dir.join("Details/Details_Mainline.toc").is_file());
}

#[test]
fn test_first_outdated_folder_stops_version_checks() {
    let (_temp_dir, dir) = create_addon_dir();
    install_addon(&dir, "ElvUI", "94.9");
    // Scanned after ElvUI; never read because ElvUI is already outdated
    fs::create_dir_all(dir.join("ElvUI_Options")).unwrap();

    let mut http = catalog_mock("95.0");
    let archive = release_zip("95.0");
    http.expect_download_to_file()
        .times(1)
        .returning(move |_, dest| {
            fs::write(dest, &archive).unwrap();
            Ok(archive.len() as u64)
        });

    let mut updater = Updater::new(settings_for(&dir), http);
    assert!(updater.run().unwrap().has_changes());
    assert!(dir.join("ElvUI_Options/ElvUI_Options_Mainline.toc").is_file());
}

#[test]
fn test_up_to_date_is_idempotent() {
    let (_temp_dir, dir) = create_addon_dir();
    install_addon(&dir, "ElvUI", "v95.0");
    install_addon(&dir, "ElvUI_Options", "95.0");

    let before = snapshot(&dir);

    for _ in 0..2 {
        let mut http = catalog_mock("95.0");
        http.expect_download_to_file().never();

        let mut updater = Updater::new(settings_for(&dir), http);
        let outcome = updater.run().unwrap();

        assert_eq!(
            outcome,
            UpdateOutcome::UpToDate {
                installed: "95.0".to_string(),
                remote: "95.0".to_string(),
            }
        );
        assert_eq!(snapshot(&dir), before);
    }
}

#[test]
fn test_newer_installed_version_is_left_alone() {
    let (_temp_dir, dir) = create_addon_dir();
    install_addon(&dir, "ElvUI", "13.81");

    let mut http = catalog_mock("13.80");
    http.expect_download_to_file().never();

    let mut updater = Updater::new(settings_for(&dir), http);
    assert!(matches!(
        updater.run().unwrap(),
        UpdateOutcome::UpToDate { .. }
    ));
}

#[test]
fn test_unreadable_directory_makes_no_requests() {
    let (_temp_dir, dir) = create_addon_dir();
    let missing = dir.join("Interface").join("AddOns");

    // No expectations set: any HTTP call panics
    let http = MockHttp::new();
    let mut updater = Updater::new(settings_for(&missing), http);

    assert!(matches!(
        updater.run(),
        Err(UpdateError::DirectoryAccess { .. })
    ));
}

#[test]
fn test_download_failure_does_not_restore_deleted_folders() {
    let (_temp_dir, dir) = create_addon_dir();
    install_addon(&dir, "ElvUI", "94.9");

    let mut http = catalog_mock("95.0");
    http.expect_download_to_file().times(1).returning(|url, _| {
        Err(UpdateError::HttpStatus {
            url: url.to_string(),
            status: 404,
        })
    });

    let mut updater = Updater::new(settings_for(&dir), http);
    assert!(matches!(
        updater.run(),
        Err(UpdateError::HttpStatus { status: 404, .. })
    ));
    assert!(!dir.join("ElvUI").exists());
    assert_eq!(updater.phase(), UpdatePhase::Downloading);
}

#[test]
fn test_corrupt_archive_fails_extraction() {
    let (_temp_dir, dir) = create_addon_dir();
    install_addon(&dir, "ElvUI", "94.9");

    let mut http = catalog_mock("95.0");
    http.expect_download_to_file().times(1).returning(|_, dest| {
        fs::write(dest, b"<html>not a zip</html>").unwrap();
        Ok(22)
    });

    let mut updater = Updater::new(settings_for(&dir), http);
    assert!(matches!(
        updater.run(),
        Err(UpdateError::ArchiveOpen { .. })
    ));
    assert_eq!(updater.phase(), UpdatePhase::Extracting);
}

#[test]
fn test_missing_catalog_entry_is_fatal() {
    let (_temp_dir, dir) = create_addon_dir();
    install_addon(&dir, "ElvUI", "94.9");

    let mut http = MockHttp::new();
    http.expect_get_bytes()
        .times(1)
        .returning(|_| Ok(br#"[{"slug":"tukui","url":"","version":"20.44","directories":[]}]"#.to_vec()));
    http.expect_download_to_file().never();

    let mut updater = Updater::new(settings_for(&dir), http);
    assert!(matches!(updater.run(), Err(UpdateError::NotFound(_))));
    assert!(dir.join("ElvUI").exists());
}

#[test]
fn test_missing_toc_is_fatal() {
    let (_temp_dir, dir) = create_addon_dir();
    fs::create_dir_all(dir.join("ElvUI")).unwrap();

    let mut http = catalog_mock("95.0");
    http.expect_download_to_file().never();

    let mut updater = Updater::new(settings_for(&dir), http);
    assert!(matches!(
        updater.run(),
        Err(UpdateError::FileNotFound { .. })
    ));
}
