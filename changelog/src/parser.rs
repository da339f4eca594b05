use crate::types::{Category, CategoryBlock, ChangelogDocument, Section, SectionHeading};
use crate::utils::{
    CHANGELOG_CATEGORY_PATTERN, CHANGELOG_ITEM_PATTERN, HORIZONTAL_RULE_PATTERN,
    RELEASE_DATE_PATTERN, SECTION_HEADING_PATTERN, parse_release_version,
};

/// A line of the source text with its byte offsets
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a> {
    pub number: usize,
    pub start: usize,
    /// Offset just past the line terminator
    pub end: usize,
    /// Line content without `\n` or `\r\n`
    pub text: &'a str,
}

pub(crate) fn lines(content: &str) -> impl Iterator<Item = Line<'_>> {
    let mut offset = 0;
    content
        .split_inclusive('\n')
        .enumerate()
        .map(move |(idx, raw)| {
            let start = offset;
            offset += raw.len();
            let text = raw.strip_suffix('\n').unwrap_or(raw);
            let text = text.strip_suffix('\r').unwrap_or(text);
            Line {
                number: idx + 1,
                start,
                end: offset,
                text,
            }
        })
}

#[derive(Debug, Default)]
struct ParserState {
    current_section: Option<Section>,
    current_category: Option<CategoryBlock>,
    body_end: Option<usize>,
}

/// Line-based changelog parser.
///
/// Heading detection only; anything that is not a `## [...]` heading, a
/// `### Category` heading, a `- ` bullet or a horizontal rule is carried
/// along inside the byte spans untouched.
#[derive(Debug, Clone, Default)]
pub struct Parser;

impl Parser {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    #[must_use]
    pub fn parse(&self, content: &str) -> ChangelogDocument {
        let mut document = ChangelogDocument::default();
        let mut state = ParserState::default();

        for line in lines(content) {
            self.parse_line(line, &mut state, &mut document);
        }

        Self::close_section(&mut state, &mut document, content.len(), false);
        document
    }

    fn parse_line(&self, line: Line<'_>, state: &mut ParserState, document: &mut ChangelogDocument) {
        if let Some(captures) = SECTION_HEADING_PATTERN.captures(line.text) {
            let label = captures.get(1).map_or("", |m| m.as_str()).trim();
            let rest = captures.get(2).map_or("", |m| m.as_str());
            self.handle_section_header(line, label, rest, state, document);
        } else if state.current_section.is_none() {
            if document.title.is_none() {
                if let Some(title) = line.text.strip_prefix("# ") {
                    document.title = Some(title.trim().to_string());
                }
            }
        } else if HORIZONTAL_RULE_PATTERN.is_match(line.text) {
            Self::close_category(state, line.start);
            state.body_end.get_or_insert(line.start);
        } else if let Some(captures) = CHANGELOG_CATEGORY_PATTERN.captures(line.text) {
            let name = captures.get(1).map_or("", |m| m.as_str());
            self.handle_category_header(line, name, state);
        } else if line.text.starts_with("## ") || line.text.starts_with("# ") {
            Self::close_category(state, line.start);
        } else if let Some(captures) = CHANGELOG_ITEM_PATTERN.captures(line.text) {
            if let (Some(block), Some(item)) = (state.current_category.as_mut(), captures.get(1)) {
                block.entries.push(item.as_str().trim_end().to_string());
            }
        }
    }

    fn handle_section_header(
        &self,
        line: Line<'_>,
        label: &str,
        rest: &str,
        state: &mut ParserState,
        document: &mut ChangelogDocument,
    ) {
        Self::close_section(state, document, line.start, true);

        let heading = if label.eq_ignore_ascii_case("unreleased") {
            SectionHeading::Unreleased
        } else if let Some(version) = parse_release_version(label) {
            let date = RELEASE_DATE_PATTERN
                .captures(rest)
                .and_then(|captures| captures.get(1))
                .map(|m| m.as_str().to_string());
            SectionHeading::Release { version, date }
        } else {
            SectionHeading::Other(label.to_string())
        };

        state.current_section = Some(Section {
            heading,
            line: line.number,
            heading_span: line.start..line.start + line.text.len(),
            span: line.start..line.end,
            body_end: line.end,
            bounded: false,
            categories: Vec::new(),
        });
    }

    fn handle_category_header(&self, line: Line<'_>, name: &str, state: &mut ParserState) {
        Self::close_category(state, line.start);

        if state.body_end.is_some() {
            // Headings after a horizontal rule are footer content
            return;
        }

        state.current_category = Some(CategoryBlock {
            name: name.to_string(),
            category: name.parse::<Category>().ok(),
            line: line.number,
            span: line.start..line.end,
            entries: Vec::new(),
        });
    }

    fn close_category(state: &mut ParserState, end: usize) {
        if let Some(mut block) = state.current_category.take() {
            block.span.end = end;
            if let Some(section) = state.current_section.as_mut() {
                section.categories.push(block);
            }
        }
    }

    fn close_section(
        state: &mut ParserState,
        document: &mut ChangelogDocument,
        end: usize,
        bounded: bool,
    ) {
        Self::close_category(state, end);
        if let Some(mut section) = state.current_section.take() {
            section.span.end = end;
            section.body_end = state.body_end.take().unwrap_or(end);
            section.bounded = bounded;
            document.sections.push(section);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version as SemverVersion;

    const SAMPLE: &str = "# Changelog

All notable changes to this project will be documented in this file.

## [Unreleased]

### Added
- New endpoint
- Another one

### Fixed
- Crash on start

## [1.1.0] - 2024-03-01
### Changed
- Faster lookups

## [1.0.0] - 2024-01-01
### Added
- Initial release

---
[Unreleased]: https://example.com/compare
";

    #[test]
    fn test_parse_title_and_sections() {
        let document = Parser::new().parse(SAMPLE);

        assert_eq!(document.title.as_deref(), Some("Changelog"));
        assert_eq!(document.sections.len(), 3);
        assert_eq!(document.sections[0].heading, SectionHeading::Unreleased);
        assert_eq!(
            document.sections[1].heading,
            SectionHeading::Release {
                version: SemverVersion::new(1, 1, 0),
                date: Some("2024-03-01".to_string()),
            }
        );
        assert!(document.sections[0].bounded);
        assert!(!document.sections[2].bounded);
    }

    #[test]
    fn test_parse_category_entries() {
        let document = Parser::new().parse(SAMPLE);
        let unreleased = document.unreleased().unwrap();

        let added = unreleased.category_block(Category::Added).unwrap();
        assert_eq!(added.entries, ["New endpoint", "Another one"]);
        assert_eq!(added.line, 7);

        let fixed = unreleased.category_block(Category::Fixed).unwrap();
        assert_eq!(fixed.entries, ["Crash on start"]);
        assert!(unreleased.category_block(Category::Removed).is_none());
    }

    #[test]
    fn test_spans_cover_the_document() {
        let document = Parser::new().parse(SAMPLE);
        let unreleased = document.unreleased().unwrap();
        let text = &SAMPLE[unreleased.span.clone()];

        assert!(text.starts_with("## [Unreleased]\n"));
        assert!(text.ends_with("- Crash on start\n\n"));
        assert_eq!(&SAMPLE[unreleased.heading_span.clone()], "## [Unreleased]");

        let last = document.sections.last().unwrap();
        assert_eq!(last.span.end, SAMPLE.len());
        assert!(SAMPLE[last.body_end..].starts_with("---\n"));
    }

    #[test]
    fn test_horizontal_rule_ends_category_blocks() {
        let content = "## [Unreleased]\n### Added\n- one\n---\n- footer\n";
        let document = Parser::new().parse(content);
        let unreleased = document.unreleased().unwrap();

        assert_eq!(unreleased.body_end, content.find("---").unwrap());
        assert_eq!(unreleased.categories[0].entries, ["one"]);
    }

    #[test]
    fn test_unknown_and_non_version_headings() {
        let content = "## [next]\n### Improved\n- thing\n## [1.0]\n";
        let document = Parser::new().parse(content);

        assert_eq!(
            document.sections[0].heading,
            SectionHeading::Other("next".to_string())
        );
        assert_eq!(document.sections[0].categories[0].category, None);
        assert_eq!(document.sections[0].categories[0].name, "Improved");
        assert_eq!(
            document.sections[1].heading,
            SectionHeading::Other("1.0".to_string())
        );
        assert_eq!(document.releases().count(), 0);
    }

    #[test]
    fn test_crlf_line_endings() {
        let content = "# Changelog\r\n\r\n## [Unreleased]\r\n### Fixed\r\n- bug\r\n";
        let document = Parser::new().parse(content);
        let unreleased = document.unreleased().unwrap();

        assert_eq!(document.title.as_deref(), Some("Changelog"));
        assert_eq!(&content[unreleased.heading_span.clone()], "## [Unreleased]");
        assert_eq!(unreleased.categories[0].entries, ["bug"]);
    }

    #[test]
    fn test_release_without_date() {
        let document = Parser::new().parse("## [2.0.0]\n");
        assert_eq!(
            document.sections[0].heading,
            SectionHeading::Release {
                version: SemverVersion::new(2, 0, 0),
                date: None,
            }
        );
    }
}
