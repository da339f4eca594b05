//! Keep a Changelog editing: entry insertion, release promotion and
//! structural validation over the raw Markdown text.
//!
//! Every operation is a function from the document text to new text (or a
//! report). [`Changelog`] wraps them with file reads and atomic writes.

mod config;
mod editor;
mod error;
mod file;
mod formatter;
mod parser;
mod position;
mod types;
mod utils;
mod validator;
mod version;
mod writer;

pub use crate::config::ChangelogConfig;
pub use crate::editor::{add_entry, insert_entry};
pub use crate::error::ChangelogError;
pub use crate::file::Changelog;
pub use crate::formatter::{HeaderFormatter, ReleaseHeaderFormatter, UNRELEASED_HEADER};
pub use crate::parser::Parser;
pub use crate::types::{
    Category, CategoryBlock, ChangelogDocument, Result, Section, SectionHeading,
};
pub use crate::utils::parse_release_version;
pub use crate::validator::{Finding, validate};
pub use crate::version::{DefaultVersionUpdater, VersionUpdater};
pub use crate::writer::write_atomic;
pub use semver::Version as SemverVersion;

use chrono::NaiveDate;

/// Promotes `[Unreleased]` to `## [version] - date` and opens a fresh
/// `[Unreleased]` section above it.
///
/// # Errors
///
/// `InvalidVersion`, `SectionNotFound`, `EmptyRelease`, or `VersionNotNewer`
/// when `config.enforce_monotonic_releases` is set.
pub fn create_release(
    content: &str,
    version: &str,
    date: NaiveDate,
    config: &ChangelogConfig,
) -> Result<String> {
    DefaultVersionUpdater::new(&ReleaseHeaderFormatter, config)
        .update_with_version(content, version, date)
}

/// Version of the first release heading, `0.0.0` when there is none.
#[must_use]
pub fn latest_version(content: &str) -> SemverVersion {
    Parser::new()
        .parse(content)
        .releases()
        .next()
        .map_or_else(|| SemverVersion::new(0, 0, 0), |(version, _)| version.clone())
}

/// Text of one release section, heading included.
///
/// Without a version the first release section is returned.
///
/// # Errors
///
/// `MissingRelease` if the changelog has no such release.
pub fn release_notes(content: &str, version: Option<&SemverVersion>) -> Result<String> {
    let document = Parser::new().parse(content);
    let section = match version {
        Some(version) => document.release(version),
        None => document.releases().next().map(|(_, section)| section),
    };

    section
        .map(|section| content[section.body()].trim().to_string())
        .ok_or_else(|| {
            ChangelogError::MissingRelease(
                version.map_or_else(|| "any".to_string(), ToString::to_string),
            )
        })
}

/// A new changelog citing the conventions and holding an empty
/// `[Unreleased]` section.
#[must_use]
pub fn skeleton(config: &ChangelogConfig) -> String {
    format!(
        "# {title}\n\
         \n\
         All notable changes to this project will be documented in this file.\n\
         \n\
         The format is based on [{convention}]({convention_url}),\n\
         and this project adheres to [{versioning}]({versioning_url}).\n\
         \n\
         {UNRELEASED_HEADER}\n",
        title = config.title,
        convention = config.convention_name,
        convention_url = config.convention_url,
        versioning = config.versioning_name,
        versioning_url = config.versioning_url,
    )
}
