use once_cell::sync::Lazy;
use regex::Regex;
use semver::Version as SemverVersion;

pub static STRICT_VERSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").expect("Failed to compile version regex")
});

/// `## [label] rest`, the heading of any top-level changelog section
pub static SECTION_HEADING_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^##\s*\[([^\]]*)\](.*)$").expect("Failed to compile section heading regex")
});

/// The ` - YYYY-MM-DD` part following a release heading's bracket
pub static RELEASE_DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*-\s*([0-9]{4}-[0-9]{2}-[0-9]{2})\b")
        .expect("Failed to compile release date regex")
});

pub static CHANGELOG_CATEGORY_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^###\s+(.+?)\s*$").expect("Failed to compile category regex"));

pub static CHANGELOG_ITEM_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^- (.+)$").expect("Failed to compile item regex"));

pub static HORIZONTAL_RULE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^ {0,3}(?:-{3,}|\*{3,}|_{3,})\s*$")
        .expect("Failed to compile horizontal rule regex")
});

/// Parses a plain `MAJOR.MINOR.PATCH` version.
///
/// Pre-release and build suffixes, a leading `v` and surrounding whitespace
/// are all rejected.
pub fn parse_release_version(version: &str) -> Option<SemverVersion> {
    let captures = STRICT_VERSION_PATTERN.captures(version)?;
    let component = |idx: usize| captures.get(idx)?.as_str().parse::<u64>().ok();

    Some(SemverVersion::new(component(1)?, component(2)?, component(3)?))
}
