use crate::VersionType;
use changelog::{Category, Parser};
use serde::Serialize;
use std::fmt;
use tracing::debug;

/// Words that turn a `Changed` entry into a breaking change
pub const BREAKING_KEYWORDS: [&str; 4] = ["breaking", "incompatible", "removed", "deprecated"];

/// Pending `[Unreleased]` entries sorted by their effect on the version
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PendingChanges {
    pub breaking: Vec<String>,
    pub features: Vec<String>,
    pub fixes: Vec<String>,
    pub other: Vec<String>,
}

impl PendingChanges {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.breaking.is_empty()
            && self.features.is_empty()
            && self.fixes.is_empty()
            && self.other.is_empty()
    }
}

/// How far to move the version, `None` when nothing is pending
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BumpLevel {
    None,
    Patch,
    Minor,
    Major,
}

impl BumpLevel {
    /// The increment to apply, or `None` for [`BumpLevel::None`]
    #[must_use]
    pub const fn version_type(self) -> Option<VersionType> {
        match self {
            Self::None => None,
            Self::Patch => Some(VersionType::Patch),
            Self::Minor => Some(VersionType::Minor),
            Self::Major => Some(VersionType::Major),
        }
    }
}

impl fmt::Display for BumpLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::None => "none",
            Self::Patch => "patch",
            Self::Minor => "minor",
            Self::Major => "major",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BumpSuggestion {
    pub level: BumpLevel,
    pub reason: String,
}

fn is_breaking(entry: &str) -> bool {
    let entry = entry.to_lowercase();
    BREAKING_KEYWORDS
        .iter()
        .any(|keyword| entry.contains(keyword))
}

/// Sorts the `[Unreleased]` entries of a changelog into bump buckets.
///
/// Removed entries are breaking, Changed entries are breaking when they
/// mention one of [`BREAKING_KEYWORDS`], Added entries are features, Fixed
/// and Security entries are fixes. Deprecated entries do not count. A
/// changelog without `[Unreleased]` yields empty buckets.
#[must_use]
pub fn classify_pending_changes(content: &str) -> PendingChanges {
    let document = Parser::new().parse(content);
    let mut changes = PendingChanges::default();

    let Some(unreleased) = document.unreleased() else {
        debug!("no [Unreleased] section, nothing pending");
        return changes;
    };

    for block in unreleased.body_categories() {
        let entries = block.entries.iter().cloned();
        match block.category {
            Some(Category::Removed) => changes.breaking.extend(entries),
            Some(Category::Changed) => {
                for entry in entries {
                    if is_breaking(&entry) {
                        changes.breaking.push(entry);
                    } else {
                        changes.other.push(entry);
                    }
                }
            }
            Some(Category::Added) => changes.features.extend(entries),
            Some(Category::Fixed | Category::Security) => changes.fixes.extend(entries),
            Some(Category::Deprecated) | None => {}
        }
    }

    debug!(
        breaking = changes.breaking.len(),
        features = changes.features.len(),
        fixes = changes.fixes.len(),
        other = changes.other.len(),
        "classified pending changes"
    );
    changes
}

/// Picks the bump for a set of pending changes: breaking beats features,
/// features beat fixes and other changes.
#[must_use]
pub fn suggest_bump(changes: &PendingChanges) -> BumpSuggestion {
    let (level, reason) = if !changes.breaking.is_empty() {
        (
            BumpLevel::Major,
            format!("Breaking changes detected: {} items", changes.breaking.len()),
        )
    } else if !changes.features.is_empty() {
        (
            BumpLevel::Minor,
            format!("New features detected: {} items", changes.features.len()),
        )
    } else if !changes.fixes.is_empty() || !changes.other.is_empty() {
        (
            BumpLevel::Patch,
            format!(
                "Bug fixes/patches detected: {} items",
                changes.fixes.len() + changes.other.len()
            ),
        )
    } else {
        (BumpLevel::None, "No unreleased changes found".to_string())
    };

    BumpSuggestion { level, reason }
}
