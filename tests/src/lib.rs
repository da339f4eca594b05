//! Project fixtures shared by the integration tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

pub const CHANGELOG: &str = r"# Changelog

All notable changes to this project will be documented in this file.

The format is based on [Keep a Changelog](https://keepachangelog.com/en/1.1.0/),
and this project adheres to [Semantic Versioning](https://semver.org/spec/v2.0.0.html).

## [Unreleased]
### Fixed
- Test fix

## [0.1.0] - 2023-01-01
### Added
- Test added

---
[0.1.0]: https://example.com/releases/0.1.0
";

pub const SETUP_PY: &str = r#"from setuptools import setup, find_packages

setup(
    name="test_project",
    version="0.1.0",
    packages=find_packages(),
)
"#;

/// Writes a Python project with a changelog and a `setup.py` into `dir`
///
/// Returns the changelog path.
pub fn create_test_python_project(dir: &Path) -> io::Result<PathBuf> {
    let changelog = dir.join("CHANGELOG.md");
    fs::write(&changelog, CHANGELOG)?;
    fs::write(dir.join("setup.py"), SETUP_PY)?;
    Ok(changelog)
}
