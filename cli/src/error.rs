use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Changelog error: {0}")]
    Changelog(#[from] ::changelog::ChangelogError),

    #[error("Changelog validation failed with {0} issue(s)")]
    ValidationFailed(usize),

    #[error("Anyhow error: {0}")]
    AnyhowError(#[from] anyhow::Error),

    #[error("{0}: {1}")]
    WithContext(String, Box<CliError>),
}

impl CliError {
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        Self::WithContext(context.into(), Box::new(self))
    }

    pub fn user_message(&self) -> String {
        match self {
            Self::Changelog(err) => err.user_message(),
            Self::ValidationFailed(count) => {
                format!("Changelog validation failed with {count} issue(s)")
            }
            Self::AnyhowError(err) => format!("{err:#}"),
            Self::WithContext(ctx, err) => format!("{ctx}: {}", err.user_message()),
        }
    }

    /// Failures that only report there was nothing to do
    pub fn is_warning(&self) -> bool {
        match self {
            Self::Changelog(err) => err.is_warning(),
            Self::WithContext(_, err) => err.is_warning(),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;

pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: Into<CliError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let cli_err: CliError = err.into();
            cli_err.with_context(context())
        })
    }
}
