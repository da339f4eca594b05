use std::fs;
use std::io::{self, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::info;

/// Replaces the file at `path` with `contents` in one step.
///
/// The text goes to a temporary file in the same directory which is then
/// renamed over the target, so readers see either the old or the new file.
/// Permissions of an existing target are carried over.
///
/// # Errors
/// Returns error if the temporary file cannot be written or renamed
pub fn write_atomic(path: &Path, contents: &str) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(contents.as_bytes())?;
    file.as_file().sync_all()?;

    if let Ok(metadata) = fs::metadata(path) {
        file.as_file().set_permissions(metadata.permissions())?;
    }

    file.persist(path).map_err(|err| err.error)?;
    info!(path = %path.display(), bytes = contents.len(), "wrote file");
    Ok(())
}
