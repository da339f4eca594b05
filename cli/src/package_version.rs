use crate::cli::{BumpArgs, VersionAction};
use crate::ui;
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;
use version::{
    BumpLevel, BumpSuggestion, PackageDescriptor, PendingChanges, SemverVersion, Version,
    classify_pending_changes, suggest_bump,
};

/// Items listed per bucket before the rest is summarized
const PREVIEW_LIMIT: usize = 3;

#[derive(Debug, Serialize)]
struct SuggestReport<'a> {
    current_version: String,
    new_version: String,
    #[serde(flatten)]
    suggestion: &'a BumpSuggestion,
    changes: &'a PendingChanges,
}

pub fn execute(changelog: &Path, descriptor: Option<PathBuf>, action: VersionAction) -> Result<()> {
    let descriptor = match descriptor {
        Some(path) => PackageDescriptor::open(path),
        None => {
            let dir = std::env::current_dir()?;
            PackageDescriptor::detect(&dir)?
        }
    };
    debug!(descriptor = %descriptor.path().display(), ?action, "running version command");

    match action {
        VersionAction::Current => {
            println!("{}", descriptor.read_version()?);
            Ok(())
        }
        VersionAction::Suggest { json } => suggest(changelog, &descriptor, json),
        VersionAction::Bump(args) => bump(changelog, &descriptor, &args),
    }
}

fn analyze(changelog: &Path) -> Result<(PendingChanges, BumpSuggestion)> {
    // A project without a changelog has nothing pending
    let changes = match fs::read_to_string(changelog) {
        Ok(content) => classify_pending_changes(&content),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(changelog = %changelog.display(), "no changelog, nothing pending");
            PendingChanges::default()
        }
        Err(err) => {
            return Err(err).with_context(|| format!("Failed to read {}", changelog.display()));
        }
    };
    let suggestion = suggest_bump(&changes);
    Ok((changes, suggestion))
}

fn next_version(current: &SemverVersion, level: BumpLevel) -> Result<SemverVersion> {
    match level.version_type() {
        Some(version_type) => Ok(Version::increment(current, version_type)?),
        None => Ok(current.clone()),
    }
}

fn suggest(changelog: &Path, descriptor: &PackageDescriptor, json: bool) -> Result<()> {
    let current = descriptor.read_version()?;
    let (changes, suggestion) = analyze(changelog)?;
    let new_version = next_version(&current, suggestion.level)?;

    if json {
        let report = SuggestReport {
            current_version: current.to_string(),
            new_version: new_version.to_string(),
            suggestion: &suggestion,
            changes: &changes,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    display_analysis(&current, &new_version, &suggestion, &changes);
    Ok(())
}

fn display_analysis(
    current: &SemverVersion,
    new_version: &SemverVersion,
    suggestion: &BumpSuggestion,
    changes: &PendingChanges,
) {
    ui::section_header("Version analysis");
    println!("Current version: {current}");
    println!("Suggested bump:  {}", suggestion.level.to_string().to_uppercase());
    println!("New version:     {new_version}");
    println!("Reason:          {}", suggestion.reason);

    for (title, items) in [
        ("Breaking changes", &changes.breaking),
        ("New features", &changes.features),
        ("Bug fixes", &changes.fixes),
    ] {
        if items.is_empty() {
            continue;
        }
        println!("\n  {title} ({}):", items.len());
        for item in items.iter().take(PREVIEW_LIMIT) {
            println!("    - {item}");
        }
        if items.len() > PREVIEW_LIMIT {
            println!("    ... and {} more", items.len() - PREVIEW_LIMIT);
        }
    }
}

fn bump(changelog: &Path, descriptor: &PackageDescriptor, args: &BumpArgs) -> Result<()> {
    let version_type = match args.version_type {
        Some(version_type) => version_type,
        None => {
            let (_, suggestion) = analyze(changelog)?;
            let Some(version_type) = suggestion.level.version_type() else {
                ui::info_message("No version bump needed - no unreleased changes found");
                return Ok(());
            };
            ui::info_message(&format!(
                "Auto-detected bump type: {} ({})",
                suggestion.level, suggestion.reason
            ));
            version_type
        }
    };

    let current = descriptor.read_version()?;
    let new_version = Version::increment(&current, version_type)?;

    descriptor.write_version(&new_version).with_context(|| {
        format!(
            "Failed to store version {new_version} in {}",
            descriptor.path().display()
        )
    })?;

    ui::success_message(&format!("Version bumped from {current} to {new_version}"));
    ui::info_message("Next steps:");
    ui::step_message(1, &format!("Run `relkit changelog release --version {new_version}`"));
    ui::step_message(2, "Commit the changes");
    ui::step_message(3, "Create a git tag");
    Ok(())
}
