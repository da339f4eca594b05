use crate::cli::ChangelogAction;
use crate::error::{CliError, Result, ResultExt};
use crate::ui;
use ::changelog::{Changelog, ChangelogConfig};
use std::path::Path;
use tracing::debug;

pub fn execute(file: &Path, action: ChangelogAction) -> Result<()> {
    debug!(file = %file.display(), ?action, "running changelog command");

    match action {
        ChangelogAction::Add { category, message } => add(file, &category, &message),
        ChangelogAction::Release { version, force } => release(file, &version, force),
        ChangelogAction::Validate => validate(file),
        ChangelogAction::Latest => latest(file),
        ChangelogAction::Notes { version } => notes(file, version.as_deref()),
        ChangelogAction::Init => init(file),
    }
}

fn add(file: &Path, category: &str, message: &str) -> Result<()> {
    let mut changelog = Changelog::open(file, ChangelogConfig::default())?;
    let category = changelog
        .add_entry(category, message)
        .with_context(|| format!("Failed to add entry to {}", file.display()))?;

    ui::success_message(&format!(
        "Added {category} entry to {}: {message}",
        file.display()
    ));
    Ok(())
}

fn release(file: &Path, version: &str, force: bool) -> Result<()> {
    let config = ChangelogConfig {
        enforce_monotonic_releases: !force,
        ..ChangelogConfig::default()
    };
    let mut changelog = Changelog::open(file, config)?;
    let date = changelog.create_release(version)?;

    ui::success_message(&format!(
        "Released {version} ({}) in {}",
        date.format(&changelog.config().date_format),
        file.display()
    ));
    ui::info_message("Started a fresh [Unreleased] section");
    Ok(())
}

fn validate(file: &Path) -> Result<()> {
    let changelog = Changelog::open(file, ChangelogConfig::default())?;
    let findings = changelog.validate();

    if findings.is_empty() {
        ui::success_message(&format!("{} is valid", file.display()));
        return Ok(());
    }

    ui::section_header("Changelog validation");
    for (index, finding) in findings.iter().enumerate() {
        ui::step_message(index + 1, &finding.to_string());
    }
    Err(CliError::ValidationFailed(findings.len()))
}

fn latest(file: &Path) -> Result<()> {
    let changelog = Changelog::open(file, ChangelogConfig::default())?;
    println!("{}", changelog.latest_version());
    Ok(())
}

fn notes(file: &Path, version: Option<&str>) -> Result<()> {
    let changelog = Changelog::open(file, ChangelogConfig::default())?;
    println!("{}", changelog.release_notes(version)?);
    Ok(())
}

fn init(file: &Path) -> Result<()> {
    let (_, created) = Changelog::create(file, ChangelogConfig::default())?;
    if created {
        ui::success_message(&format!("Created {}", file.display()));
    } else {
        ui::warning_message(&format!(
            "{} already exists, leaving it untouched",
            file.display()
        ));
    }
    Ok(())
}
