use semver::Version as SemverVersion;
use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VersionError {
    #[error("Invalid version format: {0}")]
    InvalidVersion(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Version not found in packaging descriptor")]
    VersionNotFound,

    #[error("Could not update version: no version assignment to replace")]
    WriteFailed,

    #[error("No setup.py or pyproject.toml found in {0}")]
    DescriptorNotFound(PathBuf),

    #[error("Version {0} cannot be bumped any further")]
    Overflow(SemverVersion),

    #[error("{0}: {1}")]
    WithContext(String, Box<VersionError>),
}

impl VersionError {
    /// Add context to an error
    #[must_use]
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        VersionError::WithContext(context.into(), Box::new(self))
    }

    /// Get a user-friendly message for command line display
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            VersionError::InvalidVersion(version) => {
                format!("Invalid version format: '{version}' (expected MAJOR.MINOR.PATCH)")
            }
            VersionError::DescriptorNotFound(dir) => format!(
                "Could not find setup.py or pyproject.toml in {}",
                dir.display()
            ),
            VersionError::VersionNotFound => {
                "Could not find a version assignment in the packaging descriptor".to_string()
            }
            VersionError::WithContext(ctx, err) => format!("{}: {}", ctx, err.user_message()),
            _ => format!("{}", self),
        }
    }
}

pub type Result<T> = result::Result<T, VersionError>;

// Helper trait for adding context to results
pub trait ResultExt<T, E> {
    /// Wraps the error with a lazily built context message
    ///
    /// # Errors
    /// Returns the converted, wrapped error of `self`
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for result::Result<T, E>
where
    E: Into<VersionError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let version_err: VersionError = err.into();
            version_err.with_context(context())
        })
    }
}
