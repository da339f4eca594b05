use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use version::VersionType;

#[derive(Parser)]
#[command(name = "relkit")]
#[command(
    author,
    version,
    about = "Keeps a Keep a Changelog file and the package version in step"
)]
pub struct Cli {
    /// Enable verbose output with additional information
    #[clap(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Edit and check the changelog
    Changelog {
        /// Changelog file to work on
        #[clap(short, long, global = true, default_value = "CHANGELOG.md")]
        file: PathBuf,

        #[clap(subcommand)]
        action: ChangelogAction,
    },

    /// Inspect and bump the version stored in the packaging descriptor
    Version {
        /// Changelog to analyze for pending changes
        #[clap(long, global = true, default_value = "CHANGELOG.md")]
        changelog: PathBuf,

        /// Packaging descriptor holding the version (defaults to setup.py, then pyproject.toml)
        #[clap(short, long, global = true)]
        descriptor: Option<PathBuf>,

        #[clap(subcommand)]
        action: VersionAction,
    },
}

#[derive(Subcommand, Clone, Debug)]
pub enum ChangelogAction {
    /// Add an entry to the [Unreleased] section
    Add {
        /// Category of the change (added, changed, deprecated, removed, fixed, security)
        #[clap(short = 't', long = "type")]
        category: String,

        /// One line describing the change
        #[clap(short, long)]
        message: String,
    },

    /// Turn the [Unreleased] section into a dated release
    Release {
        /// Version to release (MAJOR.MINOR.PATCH)
        #[clap(long)]
        version: String,

        /// Release even if the version is not above the latest release
        #[clap(long, default_value_t = false)]
        force: bool,
    },

    /// Check the changelog structure
    Validate,

    /// Print the latest released version
    Latest,

    /// Print the notes of a release (defaults to the latest one)
    Notes {
        /// Release to print
        #[clap(long)]
        version: Option<String>,
    },

    /// Create a new changelog if none exists
    Init,
}

#[derive(Subcommand, Clone, Debug)]
pub enum VersionAction {
    /// Print the version stored in the packaging descriptor
    Current,

    /// Analyze pending changes and suggest a version bump
    Suggest {
        /// Print the analysis as JSON
        #[clap(long, default_value_t = false)]
        json: bool,
    },

    /// Bump the stored version
    Bump(BumpArgs),
}

#[derive(Args, Clone, Debug)]
#[group(required = true, multiple = false)]
pub struct BumpArgs {
    /// Type of version increment to make (major, minor, patch)
    #[clap(long = "type", value_enum)]
    pub version_type: Option<VersionType>,

    /// Pick the increment from the pending changelog entries
    #[clap(long)]
    pub auto: bool,
}
