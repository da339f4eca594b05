/// Configuration options for changelog formatting and behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogConfig {
    /// `chrono` format string for release dates
    pub date_format: String,
    /// Expected text of the `# ` title line
    pub title: String,
    /// Name of the changelog convention the document must cite
    pub convention_name: String,
    pub convention_url: String,
    /// Name of the versioning scheme the document must cite
    pub versioning_name: String,
    pub versioning_url: String,
    /// Refuse releases whose version is not above every existing release
    pub enforce_monotonic_releases: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
            title: "Changelog".to_string(),
            convention_name: "Keep a Changelog".to_string(),
            convention_url: "https://keepachangelog.com/en/1.1.0/".to_string(),
            versioning_name: "Semantic Versioning".to_string(),
            versioning_url: "https://semver.org/spec/v2.0.0.html".to_string(),
            enforce_monotonic_releases: true,
        }
    }
}
