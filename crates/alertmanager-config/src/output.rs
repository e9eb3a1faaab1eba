//! Atomic file output.

use std::fs::Permissions;
use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::{Result, TranslateError};

/// Mode for a newly created config file. Alertmanager may run as another user.
#[cfg(unix)]
const NEW_FILE_MODE: u32 = 0o644;

/// Replace `path` with `contents` in one step.
///
/// The data goes to a temporary file in the destination directory, is flushed
/// to disk, and is then renamed over `path`. On any failure the temporary file
/// is removed and an existing `path` is left untouched.
///
/// The result keeps the permissions of the file it replaces; a new file is
/// created world-readable.
///
/// # Errors
/// Returns [`TranslateError::OutputWrite`] if any step fails.
pub fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let write_error = |source| TranslateError::OutputWrite {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
    temp.write_all(contents).map_err(write_error)?;
    if let Some(permissions) = target_permissions(path) {
        temp.as_file()
            .set_permissions(permissions)
            .map_err(write_error)?;
    }
    temp.as_file().sync_all().map_err(write_error)?;

    debug!(
        temp = %temp.path().display(),
        path = %path.display(),
        "Renaming temporary file into place"
    );

    temp.persist(path).map_err(|e| write_error(e.error))?;
    Ok(())
}

/// Permissions the written file should end up with.
fn target_permissions(path: &Path) -> Option<Permissions> {
    if let Ok(metadata) = std::fs::metadata(path) {
        return Some(metadata.permissions());
    }
    new_file_permissions()
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(NEW_FILE_MODE))
}

#[cfg(not(unix))]
fn new_file_permissions() -> Option<Permissions> {
    None
}
