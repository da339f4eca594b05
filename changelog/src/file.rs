use crate::config::ChangelogConfig;
use crate::editor::insert_entry;
use crate::error::ChangelogError;
use crate::types::{Category, Result};
use crate::utils::parse_release_version;
use crate::validator::{Finding, validate};
use crate::writer::write_atomic;
use crate::{create_release, latest_version, release_notes, skeleton};
use chrono::{Local, NaiveDate};
use semver::Version as SemverVersion;
use std::fs;
use std::path::PathBuf;
use tracing::debug;

/// A changelog file on disk and its current contents
#[derive(Debug, Clone)]
pub struct Changelog {
    path: PathBuf,
    content: String,
    config: ChangelogConfig,
}

impl Changelog {
    /// Reads the changelog at `path`
    ///
    /// # Errors
    /// Returns error if the file cannot be read
    pub fn open(path: impl Into<PathBuf>, config: ChangelogConfig) -> Result<Self> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|e| {
            ChangelogError::Io(e).with_context(format!("Failed to read {}", path.display()))
        })?;
        debug!(path = %path.display(), bytes = content.len(), "read changelog");

        Ok(Self {
            path,
            content,
            config,
        })
    }

    /// Creates a new changelog at `path` unless one already exists.
    ///
    /// Returns the changelog and whether it was created.
    ///
    /// # Errors
    /// Returns error if the file cannot be read or written
    pub fn create(path: impl Into<PathBuf>, config: ChangelogConfig) -> Result<(Self, bool)> {
        let path = path.into();
        if path.exists() {
            return Ok((Self::open(path, config)?, false));
        }

        let content = skeleton(&config);
        write_atomic(&path, &content)?;
        Ok((
            Self {
                path,
                content,
                config,
            },
            true,
        ))
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    #[must_use]
    pub const fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    /// Adds an entry to the `[Unreleased]` section and saves the file
    ///
    /// # Errors
    /// Returns error if the category or message is invalid, there is no
    /// `[Unreleased]` section, or the file cannot be written
    pub fn add_entry(&mut self, category: &str, message: &str) -> Result<Category> {
        let category = category.parse::<Category>()?;
        let updated = insert_entry(&self.content, category, message)?;
        self.commit(updated)?;
        Ok(category)
    }

    /// Promotes `[Unreleased]` to a release dated today and saves the file
    ///
    /// Returns the release date.
    ///
    /// # Errors
    /// Returns error if the release is rejected or the file cannot be written
    pub fn create_release(&mut self, version: &str) -> Result<NaiveDate> {
        let today = Local::now().date_naive();
        let updated = create_release(&self.content, version, today, &self.config)?;
        self.commit(updated)?;
        Ok(today)
    }

    #[must_use]
    pub fn validate(&self) -> Vec<Finding> {
        validate(&self.content, &self.config)
    }

    #[must_use]
    pub fn latest_version(&self) -> SemverVersion {
        latest_version(&self.content)
    }

    /// Text of the release `version`, or of the latest release
    ///
    /// # Errors
    /// Returns error if the version is malformed or not in the changelog
    pub fn release_notes(&self, version: Option<&str>) -> Result<String> {
        let version = version
            .map(|v| parse_release_version(v).ok_or_else(|| ChangelogError::InvalidVersion(v.to_string())))
            .transpose()?;
        release_notes(&self.content, version.as_ref())
    }

    fn commit(&mut self, updated: String) -> Result<()> {
        write_atomic(&self.path, &updated).map_err(|e| {
            ChangelogError::Io(e).with_context(format!("Failed to write {}", self.path.display()))
        })?;
        self.content = updated;
        Ok(())
    }
}
