//! Error taxonomy for the update check.
//!
//! Every variant is fatal: the run stops at the first error and `main` exits
//! with status 1 after logging it.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur while checking for or applying an ElvUI update
#[derive(Error, Debug)]
pub enum UpdateError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Failed to initialise HTTP client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("Failed to make HTTP request to {url}: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid HTTP status from {url}: {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("Failed to decode catalog JSON: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("No data received from API")]
    EmptyCatalog,

    #[error("{0} not found in API data")]
    NotFound(String),

    #[error("Cannot read addon directory {path}: {source}")]
    DirectoryAccess {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot open TOC file {path}: {source}")]
    FileNotFound {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Version not found in TOC file {0}")]
    VersionNotFound(Utf8PathBuf),

    #[error("Version found but empty in TOC file {0}")]
    EmptyVersion(Utf8PathBuf),

    #[error("Invalid version string '{input}': {reason}")]
    VersionParse { input: String, reason: String },

    #[error("Failed to stage download at {path}: {source}")]
    Staging {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to delete folder {path}: {source}")]
    Deletion {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open archive {path}: {reason}")]
    ArchiveOpen { path: Utf8PathBuf, reason: String },

    #[error("Failed to extract {entry}: {reason}")]
    Extraction { entry: String, reason: String },
}

impl UpdateError {
    /// Short name of the failure kind, used as a structured log field
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::ClientSetup(_) => "client_setup",
            Self::Network { .. } => "network",
            Self::HttpStatus { .. } => "http_status",
            Self::Decode(_) => "decode",
            Self::EmptyCatalog => "empty_catalog",
            Self::NotFound(_) => "not_found",
            Self::DirectoryAccess { .. } => "directory_access",
            Self::FileNotFound { .. } => "file_not_found",
            Self::VersionNotFound(_) => "version_not_found",
            Self::EmptyVersion(_) => "empty_version",
            Self::VersionParse { .. } => "version_parse",
            Self::Staging { .. } => "staging",
            Self::Deletion { .. } => "deletion",
            Self::ArchiveOpen { .. } => "archive_open",
            Self::Extraction { .. } => "extraction",
        }
    }
}
