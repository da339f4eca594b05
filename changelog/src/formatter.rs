use crate::types::Category;

pub const UNRELEASED_HEADER: &str = "## [Unreleased]";

pub trait HeaderFormatter: Send + Sync {
    fn format(&self, version: &str, date: &str) -> String;
}

/// `## [1.2.3] - 2024-01-31`, the Keep a Changelog release heading
#[derive(Debug, Clone, Copy, Default)]
pub struct ReleaseHeaderFormatter;

impl HeaderFormatter for ReleaseHeaderFormatter {
    fn format(&self, version: &str, date: &str) -> String {
        format!("## [{version}] - {date}")
    }
}

#[must_use]
pub fn format_entry(message: &str) -> String {
    format!("- {message}\n")
}

#[must_use]
pub fn format_category_block(category: Category, message: &str) -> String {
    let mut formatted = String::with_capacity(message.len() + 24);
    formatted.push_str("### ");
    formatted.push_str(category.as_str());
    formatted.push('\n');
    formatted.push_str(&format_entry(message));
    formatted
}
