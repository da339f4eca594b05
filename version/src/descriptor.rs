use crate::error::{Result, ResultExt, VersionError};
use crate::{SemverVersion, Version};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Descriptor file names probed by [`PackageDescriptor::detect`], in order
const DESCRIPTOR_NAMES: [&str; 2] = ["setup.py", "pyproject.toml"];

// A `version = '...'` assignment; only the first one counts
static VERSION_ASSIGNMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(\bversion\s*=\s*['"])([^'"\r\n]+)(['"])"#).expect("Failed to compile version assignment regex")
});

/// Returns the value of the first `version = "..."` assignment in `text`.
///
/// # Errors
/// Returns `VersionNotFound` if there is no such assignment
pub fn read_stored_version(text: &str) -> Result<String> {
    VERSION_ASSIGNMENT
        .captures(text)
        .map(|caps| caps[2].trim().to_string())
        .ok_or(VersionError::VersionNotFound)
}

/// Rewrites the first `version = "..."` assignment to `version`, keeping
/// its quotes and everything else in `text`.
///
/// # Errors
/// Returns `WriteFailed` if there is nothing to replace
pub fn write_stored_version(text: &str, version: &SemverVersion) -> Result<String> {
    if !VERSION_ASSIGNMENT.is_match(text) {
        return Err(VersionError::WriteFailed);
    }

    let updated = VERSION_ASSIGNMENT.replacen(text, 1, |caps: &Captures| {
        format!("{}{version}{}", &caps[1], &caps[3])
    });
    Ok(updated.into_owned())
}

/// A packaging descriptor holding the project version
#[derive(Debug, Clone)]
pub struct PackageDescriptor {
    path: PathBuf,
}

impl PackageDescriptor {
    #[must_use]
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Finds the descriptor in `dir`, trying `setup.py` then `pyproject.toml`
    ///
    /// # Errors
    /// Returns `DescriptorNotFound` if neither exists
    pub fn detect(dir: &Path) -> Result<Self> {
        DESCRIPTOR_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
            .map(|path| {
                debug!(path = %path.display(), "detected packaging descriptor");
                Self { path }
            })
            .ok_or_else(|| VersionError::DescriptorNotFound(dir.to_path_buf()))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads and parses the stored version
    ///
    /// # Errors
    /// Returns error if the file cannot be read, has no version, or the
    /// version is not `MAJOR.MINOR.PATCH`
    pub fn read_version(&self) -> Result<SemverVersion> {
        let text = self.read()?;
        let stored = read_stored_version(&text)
            .with_context(|| format!("Failed to read version from {}", self.path.display()))?;
        Version::parse(&stored)
    }

    /// Stores `version` in the descriptor
    ///
    /// # Errors
    /// Returns error if the file has no version assignment or cannot be
    /// written
    pub fn write_version(&self, version: &SemverVersion) -> Result<()> {
        let text = self.read()?;
        let updated = write_stored_version(&text, version)
            .with_context(|| format!("Failed to update {}", self.path.display()))?;
        changelog::write_atomic(&self.path, &updated)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        info!(path = %self.path.display(), %version, "stored new version");
        Ok(())
    }

    fn read(&self) -> Result<String> {
        fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {}", self.path.display()))
    }
}
