//! Version parsing and ordering.
//!
//! Addon authors do not always publish strict semantic versions: ElvUI ships
//! two-segment versions such as `13.80`, some addons use four segments, and
//! TOC files sometimes carry a `v` prefix or a pre-release glued to the last
//! number (`1.0beta`). Numeric segments are compared one by one with missing
//! ones treated as zero; the pre-release is ordered with [`semver`] rules.

use crate::error::UpdateError;
use semver::{BuildMetadata, Prerelease};
use std::cmp::Ordering;
use std::fmt;

/// A leniently parsed addon version
#[derive(Debug, Clone)]
pub struct AddonVersion {
    segments: Vec<u64>,
    pre: Prerelease,
    build: BuildMetadata,
}

impl AddonVersion {
    /// Numeric segments as written, without padding
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    pub fn pre(&self) -> &Prerelease {
        &self.pre
    }

    pub fn build(&self) -> &BuildMetadata {
        &self.build
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

impl Ord for AddonVersion {
    /// Build metadata does not take part in the ordering.
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.pre.cmp(&other.pre))
    }
}

impl PartialOrd for AddonVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for AddonVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for AddonVersion {}

impl fmt::Display for AddonVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core: Vec<String> = self.segments.iter().map(u64::to_string).collect();
        write!(f, "{}", core.join("."))?;
        if !self.pre.is_empty() {
            write!(f, "-{}", self.pre)?;
        }
        if !self.build.is_empty() {
            write!(f, "+{}", self.build)?;
        }
        Ok(())
    }
}

/// Parse a version string leniently.
///
/// Accepts an optional leading `v`, one or more dot-separated numeric
/// segments with optional leading zeros, then an optional pre-release
/// (introduced by `-` or starting directly with a letter) and optional
/// `+build` metadata.
///
/// # Errors
/// Returns [`UpdateError::VersionParse`] for anything else
pub fn parse_version(input: &str) -> Result<AddonVersion, UpdateError> {
    let parse_error = |reason: String| UpdateError::VersionParse {
        input: input.to_string(),
        reason,
    };

    let trimmed = input.trim();
    let text = trimmed.strip_prefix('v').unwrap_or(trimmed);

    let (text, build) = match text.split_once('+') {
        Some((rest, build)) => (rest, Some(build)),
        None => (text, None),
    };

    let core_end = text
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(text.len());
    let (core, rest) = text.split_at(core_end);

    let pre = if rest.is_empty() {
        None
    } else if let Some(pre) = rest.strip_prefix('-') {
        Some(pre)
    } else if rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        Some(rest)
    } else {
        return Err(parse_error(format!("unexpected '{}' after version number", rest)));
    };

    let segments = core
        .split('.')
        .map(|segment| {
            if segment.is_empty() {
                return Err(parse_error("empty numeric segment".to_string()));
            }
            segment
                .parse::<u64>()
                .map_err(|e| parse_error(format!("'{}': {}", segment, e)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if pre.is_some_and(str::is_empty) {
        return Err(parse_error("empty pre-release".to_string()));
    }
    if build.is_some_and(str::is_empty) {
        return Err(parse_error("empty build metadata".to_string()));
    }

    let pre = match pre {
        Some(pre) => Prerelease::new(pre).map_err(|e| parse_error(e.to_string()))?,
        None => Prerelease::EMPTY,
    };
    let build = match build {
        Some(build) => BuildMetadata::new(build).map_err(|e| parse_error(e.to_string()))?,
        None => BuildMetadata::EMPTY,
    };

    Ok(AddonVersion {
        segments,
        pre,
        build,
    })
}

/// Compare two version strings by precedence.
///
/// Build metadata does not take part in the ordering.
pub fn compare(a: &str, b: &str) -> Result<Ordering, UpdateError> {
    let a = parse_version(a)?;
    let b = parse_version(b)?;
    Ok(a.cmp(&b))
}

/// Returns true if `installed` is strictly older than `remote`.
pub fn is_outdated(installed: &str, remote: &str) -> Result<bool, UpdateError> {
    Ok(compare(installed, remote)? == Ordering::Less)
}
