use std::fs::{self, Permissions};
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::core::errors::{HmiAuditError, Result};

/// Replace `path` with `bytes` in one rename.
///
/// The content goes to a temporary file next to the target first, so a
/// failure at any point leaves an existing file at `path` untouched. The
/// parent directory must already exist.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let fail = |e: io::Error| HmiAuditError::write_failed(path, &e);

    let mut tmp = NamedTempFile::new_in(dir).map_err(fail)?;
    tmp.write_all(bytes).map_err(fail)?;
    tmp.as_file().sync_all().map_err(fail)?;

    if let Some(permissions) = target_permissions(path) {
        tmp.as_file().set_permissions(permissions).map_err(fail)?;
    }

    tmp.persist(path).map_err(|e| fail(e.error))?;
    Ok(())
}

/// Keep the mode of a file being replaced; new files get the usual 0644
/// instead of the temp file's 0600.
fn target_permissions(path: &Path) -> Option<Permissions> {
    match fs::metadata(path) {
        Ok(meta) => Some(meta.permissions()),
        Err(_) => default_permissions(),
    }
}

#[cfg(unix)]
fn default_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Some(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn default_permissions() -> Option<Permissions> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_new_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.txt");

        write_atomic(&path, b"hello").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "hello");
    }

    #[test]
    fn overwrites_existing_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.txt");
        fs::write(&path, "old content that is longer").unwrap();

        write_atomic(&path, b"new").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
    }

    #[test]
    fn missing_parent_is_write_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing").join("report.txt");

        let result = write_atomic(&path, b"x");

        assert!(matches!(result, Err(HmiAuditError::WriteError { .. })));
        assert!(!path.exists());
    }

    #[test]
    fn leaves_no_temp_files_behind() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("report.txt");

        write_atomic(&path, b"x").unwrap();

        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
