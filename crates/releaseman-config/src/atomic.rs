//! Write-then-rename file replacement.
//!
//! Content goes to a temporary file in the target's directory, is synced to
//! disk and then persisted over the target. A crash mid-write leaves the
//! previous file intact. The target keeps its permissions; new files get
//! `0644` on unix.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::{ConfigError, ConfigResult};

/// Atomically replaces `path` with `content`, creating parent directories.
///
/// # Errors
///
/// Returns [`ConfigError::Write`] if any step fails.
pub fn write_atomic(path: impl AsRef<Path>, content: &[u8]) -> ConfigResult<()> {
    let path = path.as_ref();
    let write_err = |reason: String| ConfigError::Write {
        path: path.to_path_buf(),
        reason,
    };

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)
        .map_err(|e| write_err(format!("failed to create {}: {e}", parent.display())))?;

    let mut temp = NamedTempFile::new_in(parent)
        .map_err(|e| write_err(format!("failed to create temporary file: {e}")))?;
    temp.write_all(content)
        .map_err(|e| write_err(format!("failed to write temporary file: {e}")))?;
    apply_permissions(&temp, path)
        .map_err(|e| write_err(format!("failed to set permissions: {e}")))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| write_err(format!("failed to sync temporary file: {e}")))?;
    temp.persist(path)
        .map_err(|e| write_err(format!("failed to replace file: {}", e.error)))?;

    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(())
}

/// Gives the temporary file the target's permissions, or the usual mode for
/// a fresh file, since the temporary file is created private.
fn apply_permissions(temp: &NamedTempFile, path: &Path) -> std::io::Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) => temp.as_file().set_permissions(meta.permissions()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => set_default_permissions(temp),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn set_default_permissions(temp: &NamedTempFile) -> std::io::Result<()> {
    use std::os::unix::fs::PermissionsExt;

    temp.as_file()
        .set_permissions(std::fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn set_default_permissions(_temp: &NamedTempFile) -> std::io::Result<()> {
    Ok(())
}
