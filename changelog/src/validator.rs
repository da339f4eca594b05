use crate::config::ChangelogConfig;
use crate::parser::Parser;
use crate::types::{ChangelogDocument, SectionHeading};
use semver::Version as SemverVersion;
use std::collections::HashSet;
use std::fmt;

/// A structural problem found in a changelog
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Finding {
    MissingTitle(String),
    MissingUnreleased,
    MissingConventionReference(String),
    MissingVersioningReference(String),
    DuplicateVersion(SemverVersion),
    /// Two consecutive release headings that are not strictly descending
    VersionOrder {
        above: SemverVersion,
        below: SemverVersion,
    },
    MissingReleaseDate {
        version: SemverVersion,
        line: usize,
    },
    UnknownCategory {
        name: String,
        line: usize,
    },
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingTitle(title) => write!(f, "Missing main title '# {title}'"),
            Self::MissingUnreleased => write!(f, "Missing [Unreleased] section"),
            Self::MissingConventionReference(name) => {
                write!(f, "Missing reference to {name} format")
            }
            Self::MissingVersioningReference(name) => write!(f, "Missing reference to {name}"),
            Self::DuplicateVersion(version) => write!(f, "Duplicate version number {version}"),
            Self::VersionOrder { above, below } => write!(
                f,
                "Version ordering issue: {above} should come after {below}"
            ),
            Self::MissingReleaseDate { version, line } => write!(
                f,
                "line {line}: release {version} has no '- YYYY-MM-DD' date"
            ),
            Self::UnknownCategory { name, line } => write!(
                f,
                "line {line}: unknown category '{name}' (expected Added, Changed, Deprecated, Removed, Fixed or Security)"
            ),
        }
    }
}

/// Checks a changelog against the Keep a Changelog conventions.
///
/// Findings come out in a fixed order: document-level checks first, then
/// release headings top to bottom. An empty list means the changelog is valid.
#[must_use]
pub fn validate(content: &str, config: &ChangelogConfig) -> Vec<Finding> {
    let document = Parser::new().parse(content);
    let mut findings = Vec::new();

    let has_title = document
        .title
        .as_deref()
        .is_some_and(|title| title.eq_ignore_ascii_case(&config.title));
    if !has_title {
        findings.push(Finding::MissingTitle(config.title.clone()));
    }

    if document.unreleased().is_none() {
        findings.push(Finding::MissingUnreleased);
    }

    if !content.contains(&config.convention_name) {
        findings.push(Finding::MissingConventionReference(
            config.convention_name.clone(),
        ));
    }

    if !content.contains(&config.versioning_name) {
        findings.push(Finding::MissingVersioningReference(
            config.versioning_name.clone(),
        ));
    }

    findings.extend(duplicate_versions(&document));
    findings.extend(ordering_issues(&document));
    findings.extend(heading_issues(&document));

    findings
}

fn duplicate_versions(document: &ChangelogDocument) -> Vec<Finding> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();

    document
        .releases()
        .filter(|(version, _)| !seen.insert(*version) && reported.insert(*version))
        .map(|(version, _)| Finding::DuplicateVersion(version.clone()))
        .collect()
}

fn ordering_issues(document: &ChangelogDocument) -> Vec<Finding> {
    let versions: Vec<&SemverVersion> = document.releases().map(|(version, _)| version).collect();

    versions
        .windows(2)
        .filter(|pair| pair[0] <= pair[1])
        .map(|pair| Finding::VersionOrder {
            above: pair[0].clone(),
            below: pair[1].clone(),
        })
        .collect()
}

fn heading_issues(document: &ChangelogDocument) -> Vec<Finding> {
    let mut findings = Vec::new();

    for section in &document.sections {
        if let SectionHeading::Release {
            version,
            date: None,
        } = &section.heading
        {
            findings.push(Finding::MissingReleaseDate {
                version: version.clone(),
                line: section.line,
            });
        }

        findings.extend(
            section
                .categories
                .iter()
                .filter(|block| block.category.is_none())
                .map(|block| Finding::UnknownCategory {
                    name: block.name.clone(),
                    line: block.line,
                }),
        );
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID: &str = "# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/),
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).

## [Unreleased]

## [1.1.0] - 2024-02-01
### Fixed
- Rounding

## [1.0.0] - 2024-01-01
### Added
- Initial release
";

    fn check(content: &str) -> Vec<Finding> {
        validate(content, &ChangelogConfig::default())
    }

    #[test]
    fn test_valid_changelog_has_no_findings() {
        assert_eq!(check(VALID), Vec::new());
    }

    #[test]
    fn test_missing_unreleased() {
        let findings = check(&VALID.replace("## [Unreleased]\n", ""));
        assert_eq!(findings, [Finding::MissingUnreleased]);
    }

    #[test]
    fn test_missing_title_and_references() {
        let findings = check("## [Unreleased]\n");
        assert_eq!(
            findings,
            [
                Finding::MissingTitle("Changelog".to_string()),
                Finding::MissingConventionReference("Keep a Changelog".to_string()),
                Finding::MissingVersioningReference("Semantic Versioning".to_string()),
            ]
        );
    }

    #[test]
    fn test_ascending_versions_are_flagged() {
        let content = VALID
            .replace("## [1.1.0] - 2024-02-01", "## [1.0.0] - 2024-02-01")
            .replace("## [1.0.0] - 2024-01-01", "## [2.0.0] - 2024-01-01");
        let findings = check(&content);

        assert!(findings.contains(&Finding::VersionOrder {
            above: SemverVersion::new(1, 0, 0),
            below: SemverVersion::new(2, 0, 0),
        }));
    }

    #[test]
    fn test_one_ordering_finding_per_adjacent_pair() {
        let content = "# Changelog\nKeep a Changelog, Semantic Versioning\n## [Unreleased]\n\
            ## [1.0.0] - 2024-01-01\n## [2.0.0] - 2024-01-02\n## [3.0.0] - 2024-01-03\n## [0.1.0] - 2023-01-01\n";
        let findings = check(content);

        assert_eq!(
            findings,
            [
                Finding::VersionOrder {
                    above: SemverVersion::new(1, 0, 0),
                    below: SemverVersion::new(2, 0, 0),
                },
                Finding::VersionOrder {
                    above: SemverVersion::new(2, 0, 0),
                    below: SemverVersion::new(3, 0, 0),
                },
            ]
        );
    }

    #[test]
    fn test_duplicate_versions() {
        let content = "# Changelog\nKeep a Changelog, Semantic Versioning\n## [Unreleased]\n\
            ## [1.0.0] - 2024-01-02\n## [1.0.0] - 2024-01-01\n## [1.0.0] - 2024-01-01\n";
        let findings = check(content);

        assert_eq!(
            findings
                .iter()
                .filter(|f| matches!(f, Finding::DuplicateVersion(_)))
                .count(),
            1
        );
        assert!(findings.contains(&Finding::DuplicateVersion(SemverVersion::new(1, 0, 0))));
    }

    #[test]
    fn test_release_without_date_and_unknown_category() {
        let content = VALID
            .replace("## [1.1.0] - 2024-02-01", "## [1.1.0]")
            .replace("### Fixed", "### Bugfixes");
        let findings = check(&content);

        assert_eq!(
            findings,
            [
                Finding::MissingReleaseDate {
                    version: SemverVersion::new(1, 1, 0),
                    line: 10,
                },
                Finding::UnknownCategory {
                    name: "Bugfixes".to_string(),
                    line: 11,
                },
            ]
        );
    }

    #[test]
    fn test_validation_is_repeatable() {
        let content = "## [1.0.0]\n## [1.0.0]\n### Misc\n";
        assert_eq!(check(content), check(content));
        assert!(!check(content).is_empty());
    }

    #[test]
    fn test_finding_messages() {
        assert_eq!(
            Finding::MissingUnreleased.to_string(),
            "Missing [Unreleased] section"
        );
        assert_eq!(
            Finding::VersionOrder {
                above: SemverVersion::new(1, 0, 0),
                below: SemverVersion::new(2, 0, 0),
            }
            .to_string(),
            "Version ordering issue: 1.0.0 should come after 2.0.0"
        );
    }
}
