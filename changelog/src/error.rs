use semver::Version as SemverVersion;
use thiserror::Error;

/// Errors that can occur when working with changelogs
#[derive(Error, Debug)]
pub enum ChangelogError {
    #[error("Failed to read or write changelog file: {0}")]
    Io(#[from] std::io::Error),

    #[error(
        "Invalid entry type '{0}'. Must be one of: added, changed, deprecated, removed, fixed, security"
    )]
    InvalidCategory(String),

    #[error("Invalid changelog entry: {0}")]
    InvalidEntry(String),

    #[error("Version '{0}' is not in semantic versioning format (x.y.z)")]
    InvalidVersion(String),

    #[error("Could not find {0} in changelog")]
    SectionNotFound(String),

    #[error("No changes found in [Unreleased] section")]
    EmptyRelease,

    #[error("Version {requested} is not newer than the latest release {latest}")]
    VersionNotNewer {
        requested: SemverVersion,
        latest: SemverVersion,
    },

    #[error("Invalid changelog configuration: {0}")]
    InvalidConfig(String),

    #[error("Release {0} not found in changelog")]
    MissingRelease(String),

    #[error("{0}: {1}")]
    WithContext(String, Box<ChangelogError>),
}

impl ChangelogError {
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    /// Text shown to the person running the command line tool
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(e) => format!("File operation failed: {e}"),
            Self::SectionNotFound(what) => {
                format!("Could not find {what} in changelog. Is it a Keep a Changelog file?")
            }
            Self::EmptyRelease => {
                "No changes found in [Unreleased] section, nothing to release".to_string()
            }
            Self::VersionNotNewer { requested, latest } => format!(
                "Version {requested} is not newer than the latest release {latest} (use --force to release it anyway)"
            ),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
            other => other.to_string(),
        }
    }

    /// Whether the failure leaves the changelog in a usable state and only
    /// reports that there was nothing to do
    #[must_use]
    pub fn is_warning(&self) -> bool {
        match self {
            Self::EmptyRelease => true,
            Self::WithContext(_, inner) => inner.is_warning(),
            _ => false,
        }
    }
}
