use crate::error::ChangelogError;
use crate::formatter::{format_category_block, format_entry};
use crate::parser::Parser;
use crate::position::{end_of_last_content_line, splice_lines};
use crate::types::{Category, Result};
use tracing::debug;

/// Adds `- message` under `### category` in the `[Unreleased]` section.
///
/// The category is matched case-insensitively against the six Keep a
/// Changelog kinds. Content outside the inserted lines is returned unchanged.
///
/// # Errors
///
/// `InvalidCategory` for an unknown category, `InvalidEntry` for an empty or
/// multi-line message, `SectionNotFound` when there is no `[Unreleased]`
/// heading.
pub fn add_entry(content: &str, category: &str, message: &str) -> Result<String> {
    let category = category.parse::<Category>()?;
    insert_entry(content, category, message)
}

/// Typed variant of [`add_entry`].
///
/// # Errors
///
/// Same as [`add_entry`], minus `InvalidCategory`.
pub fn insert_entry(content: &str, category: Category, message: &str) -> Result<String> {
    let message = normalize_message(message)?;

    let document = Parser::new().parse(content);
    let unreleased = document
        .unreleased()
        .ok_or_else(|| ChangelogError::SectionNotFound("[Unreleased] section".to_string()))?;

    let (position, insertion) = if let Some(block) = unreleased.category_block(category) {
        debug!(category = %category, line = block.line, "appending to existing category");
        (
            end_of_last_content_line(content, block.span.clone()),
            format_entry(message),
        )
    } else if let Some(first) = unreleased.body_categories().next() {
        debug!(category = %category, before = %first.name, "inserting new category block");
        (
            first.span.start,
            format!("{}\n", format_category_block(category, message)),
        )
    } else {
        debug!(category = %category, "inserting first category block");
        (
            end_of_last_content_line(content, unreleased.body()),
            format!("\n{}", format_category_block(category, message)),
        )
    };

    Ok(splice_lines(content, position, &insertion))
}

fn normalize_message(message: &str) -> Result<&str> {
    let message = message.trim();
    if message.is_empty() {
        return Err(ChangelogError::InvalidEntry(
            "message must not be empty".to_string(),
        ));
    }
    if message.contains(['\n', '\r']) {
        return Err(ChangelogError::InvalidEntry(
            "message must fit on a single line".to_string(),
        ));
    }
    Ok(message)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHANGELOG: &str = "# Changelog

## [Unreleased]

### Added
- First feature

### Fixed
- First fix

## [1.0.0] - 2024-01-01
### Added
- Initial release
";

    #[test]
    fn test_append_to_existing_category() {
        let updated = add_entry(CHANGELOG, "added", "Second feature").unwrap();

        assert_eq!(
            updated,
            CHANGELOG.replace(
                "- First feature\n",
                "- First feature\n- Second feature\n"
            )
        );
    }

    #[test]
    fn test_append_to_last_category_before_next_release() {
        let updated = add_entry(CHANGELOG, "FIXED", "Second fix").unwrap();

        assert_eq!(
            updated,
            CHANGELOG.replace("- First fix\n", "- First fix\n- Second fix\n")
        );
    }

    #[test]
    fn test_new_category_goes_before_first_existing_one() {
        let updated = add_entry(CHANGELOG, "security", "Rotate keys").unwrap();

        assert_eq!(
            updated,
            CHANGELOG.replace(
                "### Added\n- First feature",
                "### Security\n- Rotate keys\n\n### Added\n- First feature"
            )
        );
    }

    #[test]
    fn test_new_category_in_empty_unreleased_section() {
        let content = "# Changelog\n\n## [Unreleased]\n\n## [1.0.0] - 2024-01-01\n";
        let updated = add_entry(content, "changed", "Tweak defaults").unwrap();

        assert_eq!(
            updated,
            "# Changelog\n\n## [Unreleased]\n\n### Changed\n- Tweak defaults\n\n## [1.0.0] - 2024-01-01\n"
        );
    }

    #[test]
    fn test_unreleased_heading_at_end_of_file_without_newline() {
        let updated = add_entry("# Changelog\n\n## [Unreleased]", "added", "Thing").unwrap();
        assert_eq!(
            updated,
            "# Changelog\n\n## [Unreleased]\n\n### Added\n- Thing\n"
        );
    }

    #[test]
    fn test_entries_after_horizontal_rule_are_ignored() {
        let content = "## [Unreleased]\n### Fixed\n- bug\n\n---\n### Added\n- footer\n";
        let updated = add_entry(content, "added", "Real feature").unwrap();

        assert_eq!(
            updated,
            "## [Unreleased]\n### Added\n- Real feature\n\n### Fixed\n- bug\n\n---\n### Added\n- footer\n"
        );
    }

    #[test]
    fn test_only_unreleased_section_is_touched() {
        let updated = add_entry(CHANGELOG, "added", "Fresh").unwrap();
        let release_start = CHANGELOG.find("## [1.0.0]").unwrap();
        assert!(updated.ends_with(&CHANGELOG[release_start..]));
        assert_eq!(updated.matches("- Fresh\n").count(), 1);
    }

    #[test]
    fn test_message_is_trimmed() {
        let updated = add_entry(CHANGELOG, "added", "  Padded  ").unwrap();
        assert!(updated.contains("- First feature\n- Padded\n"));
    }

    #[test]
    fn test_invalid_category() {
        let err = add_entry(CHANGELOG, "improved", "Anything").unwrap_err();
        assert!(matches!(err, ChangelogError::InvalidCategory(_)));
    }

    #[test]
    fn test_invalid_messages() {
        assert!(matches!(
            add_entry(CHANGELOG, "added", "   ").unwrap_err(),
            ChangelogError::InvalidEntry(_)
        ));
        assert!(matches!(
            add_entry(CHANGELOG, "added", "two\nlines").unwrap_err(),
            ChangelogError::InvalidEntry(_)
        ));
    }

    #[test]
    fn test_missing_unreleased_section() {
        let err = add_entry("# Changelog\n\n## [1.0.0] - 2024-01-01\n", "added", "x").unwrap_err();
        assert!(matches!(err, ChangelogError::SectionNotFound(_)));
    }
}
