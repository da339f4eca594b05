use crate::error::ChangelogError;
use semver::Version as SemverVersion;
use std::fmt;
use std::ops::Range;
use std::str::FromStr;

/// Type alias for Result with `ChangelogError`
pub type Result<T> = std::result::Result<T, ChangelogError>;

/// The six kinds of change a Keep a Changelog section may list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Category {
    Added,
    Changed,
    Deprecated,
    Removed,
    Fixed,
    Security,
}

impl Category {
    pub const ALL: [Self; 6] = [
        Self::Added,
        Self::Changed,
        Self::Deprecated,
        Self::Removed,
        Self::Fixed,
        Self::Security,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "Added",
            Self::Changed => "Changed",
            Self::Deprecated => "Deprecated",
            Self::Removed => "Removed",
            Self::Fixed => "Fixed",
            Self::Security => "Security",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ChangelogError;

    fn from_str(s: &str) -> Result<Self> {
        let needle = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str().eq_ignore_ascii_case(needle))
            .ok_or_else(|| ChangelogError::InvalidCategory(s.to_string()))
    }
}

/// What a `## [...]` heading names
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionHeading {
    Unreleased,
    Release {
        version: SemverVersion,
        date: Option<String>,
    },
    /// A bracketed label that is neither `Unreleased` nor a plain version
    Other(String),
}

/// A `### Name` block and the bullet entries below it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryBlock {
    pub name: String,
    /// `None` when the heading is not one of the six known categories
    pub category: Option<Category>,
    /// 1-based line number of the heading
    pub line: usize,
    /// Byte range from the heading to the start of whatever closes the block
    pub span: Range<usize>,
    pub entries: Vec<String>,
}

/// One `## [...]` section of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub heading: SectionHeading,
    /// 1-based line number of the heading
    pub line: usize,
    /// Byte range of the heading text, line terminator excluded
    pub heading_span: Range<usize>,
    /// Byte range from the heading to the next `## [` heading or end of document
    pub span: Range<usize>,
    /// Start of the first horizontal rule inside `span`, or `span.end`
    pub body_end: usize,
    /// Whether another `## [` heading follows this section
    pub bounded: bool,
    pub categories: Vec<CategoryBlock>,
}

impl Section {
    /// The part of the section that entries are added to and read from
    #[must_use]
    pub fn body(&self) -> Range<usize> {
        self.span.start..self.body_end
    }

    /// Category blocks that start before any horizontal rule
    pub fn body_categories(&self) -> impl Iterator<Item = &CategoryBlock> + '_ {
        self.categories
            .iter()
            .filter(move |block| block.span.start < self.body_end)
    }

    #[must_use]
    pub fn category_block(&self, category: Category) -> Option<&CategoryBlock> {
        self.body_categories()
            .find(|block| block.category == Some(category))
    }

    #[must_use]
    pub fn has_known_category(&self) -> bool {
        self.categories.iter().any(|block| block.category.is_some())
    }

    #[must_use]
    pub const fn release_version(&self) -> Option<&SemverVersion> {
        match &self.heading {
            SectionHeading::Release { version, .. } => Some(version),
            _ => None,
        }
    }
}

/// A changelog split into its typed sections
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangelogDocument {
    /// Text of the first `# ` line, if any
    pub title: Option<String>,
    pub sections: Vec<Section>,
}

impl ChangelogDocument {
    #[must_use]
    pub fn unreleased(&self) -> Option<&Section> {
        self.sections
            .iter()
            .find(|section| section.heading == SectionHeading::Unreleased)
    }

    /// Release sections in document order
    pub fn releases(&self) -> impl Iterator<Item = (&SemverVersion, &Section)> + '_ {
        self.sections
            .iter()
            .filter_map(|section| section.release_version().map(|version| (version, section)))
    }

    #[must_use]
    pub fn release(&self, version: &SemverVersion) -> Option<&Section> {
        self.releases()
            .find(|(candidate, _)| *candidate == version)
            .map(|(_, section)| section)
    }

    /// The highest version among all release headings
    #[must_use]
    pub fn highest_release(&self) -> Option<&SemverVersion> {
        self.releases().map(|(version, _)| version).max()
    }
}
