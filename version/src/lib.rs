// Re-export semver for users of this library
pub use semver::Version as SemverVersion;
use clap::ValueEnum;
use serde::Serialize;
use tracing::debug;

mod analyzer;
mod descriptor;
mod error;

pub use analyzer::{
    BREAKING_KEYWORDS, BumpLevel, BumpSuggestion, PendingChanges, classify_pending_changes,
    suggest_bump,
};
pub use descriptor::{PackageDescriptor, read_stored_version, write_stored_version};
pub use error::{Result, ResultExt, VersionError};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionType {
    Major,
    Minor,
    Patch,
}

// Central structure for version management
pub struct Version;

impl Version {
    /// Parses a strict `MAJOR.MINOR.PATCH` version.
    ///
    /// Pre-release and build suffixes are rejected.
    ///
    /// # Errors
    /// Returns `InvalidVersion` for anything else
    pub fn parse(version: &str) -> Result<SemverVersion> {
        changelog::parse_release_version(version)
            .ok_or_else(|| VersionError::InvalidVersion(version.to_string()))
    }

    /// Increments one component and resets the lower ones.
    ///
    /// # Errors
    /// Returns `Overflow` if the component is already at its maximum
    pub fn increment(version: &SemverVersion, version_type: VersionType) -> Result<SemverVersion> {
        let overflow = || VersionError::Overflow(version.clone());
        let new_version = match version_type {
            VersionType::Major => {
                SemverVersion::new(version.major.checked_add(1).ok_or_else(overflow)?, 0, 0)
            }
            VersionType::Minor => SemverVersion::new(
                version.major,
                version.minor.checked_add(1).ok_or_else(overflow)?,
                0,
            ),
            VersionType::Patch => SemverVersion::new(
                version.major,
                version.minor,
                version.patch.checked_add(1).ok_or_else(overflow)?,
            ),
        };
        debug!(from = %version, to = %new_version, ?version_type, "incremented version");
        Ok(new_version)
    }

    /// Parses `current` and increments it.
    ///
    /// # Errors
    /// Returns `InvalidVersion` or `Overflow`
    pub fn apply_bump(current: &str, version_type: VersionType) -> Result<SemverVersion> {
        let current = Self::parse(current)?;
        Self::increment(&current, version_type)
    }
}
