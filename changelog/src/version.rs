use crate::config::ChangelogConfig;
use crate::error::ChangelogError;
use crate::formatter::{HeaderFormatter, UNRELEASED_HEADER};
use crate::parser::Parser;
use crate::types::Result;
use crate::utils::parse_release_version;
use chrono::NaiveDate;
use std::fmt::Write;
use tracing::debug;

pub trait VersionUpdater {
    /// Turns the `[Unreleased]` section into the release `version` dated `date`.
    ///
    /// # Errors
    /// Returns error if the version is malformed or the changelog has nothing
    /// to release
    fn update_with_version(&self, content: &str, version: &str, date: NaiveDate) -> Result<String>;
}

pub struct DefaultVersionUpdater<'a> {
    header_formatter: &'a dyn HeaderFormatter,
    config: &'a ChangelogConfig,
}

impl<'a> DefaultVersionUpdater<'a> {
    pub fn new(header_formatter: &'a dyn HeaderFormatter, config: &'a ChangelogConfig) -> Self {
        Self {
            header_formatter,
            config,
        }
    }
}

impl VersionUpdater for DefaultVersionUpdater<'_> {
    fn update_with_version(&self, content: &str, version: &str, date: NaiveDate) -> Result<String> {
        let requested = parse_release_version(version)
            .ok_or_else(|| ChangelogError::InvalidVersion(version.to_string()))?;

        let document = Parser::new().parse(content);
        let unreleased = document
            .unreleased()
            .ok_or_else(|| ChangelogError::SectionNotFound("[Unreleased] section".to_string()))?;

        // The promoted section is bounded by the heading that follows it
        if !unreleased.bounded {
            return Err(ChangelogError::SectionNotFound(
                "a version section after [Unreleased]".to_string(),
            ));
        }

        if !unreleased.has_known_category() {
            return Err(ChangelogError::EmptyRelease);
        }

        if self.config.enforce_monotonic_releases {
            if let Some(latest) = document.highest_release() {
                if requested <= *latest {
                    return Err(ChangelogError::VersionNotNewer {
                        requested,
                        latest: latest.clone(),
                    });
                }
            }
        }

        let mut rendered_date = String::new();
        write!(rendered_date, "{}", date.format(&self.config.date_format)).map_err(|_| {
            ChangelogError::InvalidConfig(format!(
                "date format '{}' is not a valid strftime pattern",
                self.config.date_format
            ))
        })?;
        let release_header = self
            .header_formatter
            .format(&requested.to_string(), &rendered_date);
        debug!(line = unreleased.line, header = %release_header, "promoting unreleased section");

        let heading = unreleased.heading_span.clone();
        let mut result = String::with_capacity(content.len() + UNRELEASED_HEADER.len() + 2);
        result.push_str(&content[..heading.start]);
        result.push_str(UNRELEASED_HEADER);
        result.push_str("\n\n");
        result.push_str(&release_header);
        result.push_str(&content[heading.end..]);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formatter::ReleaseHeaderFormatter;

    const CHANGELOG: &str = "# Changelog

## [Unreleased]

### Added
- Shiny feature

### Removed
- Legacy API

## [1.4.0] - 2024-01-01
### Added
- Initial release
";

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    fn release(content: &str, version: &str, config: &ChangelogConfig) -> Result<String> {
        DefaultVersionUpdater::new(&ReleaseHeaderFormatter, config)
            .update_with_version(content, version, date())
    }

    #[test]
    fn test_release_promotes_unreleased_section() {
        let updated = release(CHANGELOG, "2.0.0", &ChangelogConfig::default()).unwrap();

        assert_eq!(
            updated,
            CHANGELOG.replace(
                "## [Unreleased]\n",
                "## [Unreleased]\n\n## [2.0.0] - 2024-06-30\n"
            )
        );
    }

    #[test]
    fn test_release_keeps_entries_under_new_heading() {
        let updated = release(CHANGELOG, "2.0.0", &ChangelogConfig::default()).unwrap();
        let document = Parser::new().parse(&updated);

        let unreleased = document.unreleased().unwrap();
        assert!(unreleased.categories.is_empty());

        let (version, section) = document.releases().next().unwrap();
        assert_eq!(version.to_string(), "2.0.0");
        assert_eq!(section.categories[0].entries, ["Shiny feature"]);
        assert_eq!(section.categories[1].entries, ["Legacy API"]);
        assert_eq!(document.sections[1].line, unreleased.line + 2);
    }

    #[test]
    fn test_release_rejects_malformed_versions() {
        for version in ["1.2", "v1.2.3", "1.2.3-rc1", "latest"] {
            let err = release(CHANGELOG, version, &ChangelogConfig::default()).unwrap_err();
            assert!(matches!(err, ChangelogError::InvalidVersion(_)), "{version}");
        }
    }

    #[test]
    fn test_release_requires_following_section() {
        let content = "# Changelog\n\n## [Unreleased]\n### Added\n- Thing\n";
        let err = release(content, "1.0.0", &ChangelogConfig::default()).unwrap_err();
        assert!(matches!(err, ChangelogError::SectionNotFound(_)));
    }

    #[test]
    fn test_release_requires_unreleased_section() {
        let content = "# Changelog\n\n## [1.0.0] - 2024-01-01\n### Added\n- Thing\n";
        let err = release(content, "1.1.0", &ChangelogConfig::default()).unwrap_err();
        assert!(matches!(err, ChangelogError::SectionNotFound(_)));
    }

    #[test]
    fn test_release_without_changes_is_empty() {
        let content = "# Changelog\n\n## [Unreleased]\n\n## [1.0.0] - 2024-01-01\n### Added\n- x\n";
        let err = release(content, "1.1.0", &ChangelogConfig::default()).unwrap_err();
        assert!(matches!(err, ChangelogError::EmptyRelease));
        assert!(err.is_warning());
    }

    #[test]
    fn test_release_must_be_newer_than_latest() {
        for version in ["1.4.0", "1.3.9", "0.1.0"] {
            let err = release(CHANGELOG, version, &ChangelogConfig::default()).unwrap_err();
            assert!(
                matches!(err, ChangelogError::VersionNotNewer { .. }),
                "{version}"
            );
        }
    }

    #[test]
    fn test_release_guard_can_be_disabled() {
        let config = ChangelogConfig {
            enforce_monotonic_releases: false,
            ..ChangelogConfig::default()
        };
        let updated = release(CHANGELOG, "1.3.0", &config).unwrap();
        assert!(updated.contains("## [1.3.0] - 2024-06-30\n"));
    }

    #[test]
    fn test_release_uses_configured_date_format() {
        let config = ChangelogConfig {
            date_format: "%d.%m.%Y".to_string(),
            ..ChangelogConfig::default()
        };
        let updated = release(CHANGELOG, "1.5.0", &config).unwrap();
        assert!(updated.contains("## [1.5.0] - 30.06.2024\n"));
    }

    #[test]
    fn test_release_rejects_bad_date_format() {
        let config = ChangelogConfig {
            date_format: "%Q".to_string(),
            ..ChangelogConfig::default()
        };
        let err = release(CHANGELOG, "1.5.0", &config).unwrap_err();
        assert!(matches!(err, ChangelogError::InvalidConfig(ref msg) if msg.contains("%Q")));
    }
}
