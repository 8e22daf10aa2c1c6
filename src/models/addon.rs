use std::fmt;

/// An addon folder found directly under the WoW addon directory
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LocalAddonEntry {
    pub folder_name: String,
}

impl LocalAddonEntry {
    pub fn new(folder_name: impl Into<String>) -> Self {
        Self {
            folder_name: folder_name.into(),
        }
    }

    /// File name of this addon's retail manifest, e.g. `ElvUI_Mainline.toc`
    pub fn toc_file_name(&self) -> String {
        format!("{}_Mainline.toc", self.folder_name)
    }
}

/// Phase of a single update run.
///
/// A run moves `Checking -> UpToDate -> Done` or
/// `Checking -> Outdated -> Downloading -> Extracting -> Done`. When no
/// tracked folder is installed it goes straight from `Checking` to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdatePhase {
    /// Comparing installed versions against the catalog.
    Checking,
    /// Nothing to update.
    UpToDate,
    /// At least one tracked folder is older than the catalog version.
    Outdated,
    /// Fetching the release archive.
    Downloading,
    /// Unpacking the archive into the addon directory.
    Extracting,
    /// Run finished.
    Done,
}

impl UpdatePhase {
    /// Returns true if `next` is a legal successor of this phase.
    #[must_use]
    pub fn can_transition_to(&self, next: UpdatePhase) -> bool {
        matches!(
            (self, next),
            (Self::Checking, Self::UpToDate)
                | (Self::Checking, Self::Outdated)
                | (Self::Checking, Self::Done)
                | (Self::UpToDate, Self::Done)
                | (Self::Outdated, Self::Downloading)
                | (Self::Downloading, Self::Extracting)
                | (Self::Extracting, Self::Done)
        )
    }

    /// Returns true if this phase represents completion.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Returns a display string for this phase.
    #[must_use]
    pub fn display(&self) -> &'static str {
        match self {
            Self::Checking => "Checking",
            Self::UpToDate => "Up-to-date",
            Self::Outdated => "Outdated",
            Self::Downloading => "Downloading",
            Self::Extracting => "Extracting",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for UpdatePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display())
    }
}

/// Result of a completed (non-failing) run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// None of the tracked folders exist in the addon directory.
    NotInstalled,
    /// Every tracked folder is at or above the catalog version.
    UpToDate { installed: String, remote: String },
    /// Old folders were removed and the new archive extracted.
    Updated { from: String, to: String },
}

impl UpdateOutcome {
    /// Check if the run changed anything on disk
    pub fn has_changes(&self) -> bool {
        matches!(self, Self::Updated { .. })
    }

    /// Get a one-line summary for the log
    pub fn summary(&self) -> String {
        match self {
            Self::NotInstalled => "ElvUI is not installed, nothing to do".to_string(),
            Self::UpToDate { installed, .. } => {
                format!("nothing to do, addon is up-to-date ({})", installed)
            }
            Self::Updated { from, to } => format!("updated ElvUI from {} to {}", from, to),
        }
    }
}
