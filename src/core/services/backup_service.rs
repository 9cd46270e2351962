use std::fs::{self, File, FileTimes};
use std::io::{self, BufReader, Read, Write};
use std::path::Path;

use chrono::{Local, NaiveDateTime};
use sha2::{Digest, Sha256};
use tempfile::NamedTempFile;

use crate::core::errors::{HmiAuditError, Result};
use crate::core::models::backup_record::BackupRecord;

/// Suffix format appended to backup file names: `YYYYMMDD_HH_MM_SS`.
pub const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H_%M_%S";

/// Snapshots a live audit trail into a backup directory.
///
/// Backups accumulate; nothing here rotates or prunes old copies.
pub struct BackupService {
    verify: bool,
}

impl BackupService {
    /// Create a service. When `verify` is set, the finished backup is
    /// re-read and compared against the digest of the bytes copied.
    pub fn new(verify: bool) -> Self {
        Self { verify }
    }

    /// Copy `source` into `backup_root`, stamped with the current local time.
    ///
    /// `BackupRecord::path` is the full path of the new backup file.
    pub fn create_backup(&self, source: &Path, backup_root: &Path) -> Result<BackupRecord> {
        self.backup_at(source, backup_root, Local::now().naive_local())
    }

    /// Copy `source` into `backup_root`, stamped with `now`.
    ///
    /// The source is checked before anything is written, so a missing
    /// source leaves the filesystem untouched. The copy keeps the source's
    /// modification time and permission bits.
    ///
    /// The source is read exactly once. The HMI may still be appending to
    /// it, so the digest always describes the bytes that reached the
    /// backup, never a later state of the live file.
    pub fn backup_at(
        &self,
        source: &Path,
        backup_root: &Path,
        now: NaiveDateTime,
    ) -> Result<BackupRecord> {
        if !source.is_file() {
            return Err(HmiAuditError::NotFound {
                path: source.to_path_buf(),
            });
        }

        let dest = backup_root.join(backup_file_name(source, now)?);

        fs::create_dir_all(backup_root)
            .map_err(|e| HmiAuditError::write_failed(backup_root, &e))?;

        let (bytes, sha256) = copy_preserving_metadata(source, backup_root, &dest)?;

        if self.verify && sha256_file(&dest)? != sha256 {
            return Err(HmiAuditError::BackupVerificationFailed {
                original: source.to_path_buf(),
                backup: dest,
            });
        }

        Ok(BackupRecord {
            path: dest,
            sha256,
            bytes,
        })
    }
}

/// Build `<original_filename>_<YYYYMMDD_HH_MM_SS>` for a source path.
pub fn backup_file_name(source: &Path, now: NaiveDateTime) -> Result<String> {
    let name = source.file_name().ok_or_else(|| HmiAuditError::NotFound {
        path: source.to_path_buf(),
    })?;

    Ok(format!(
        "{}_{}",
        name.to_string_lossy(),
        now.format(BACKUP_TIMESTAMP_FORMAT)
    ))
}

/// Lowercase hex SHA-256 of a file's content.
pub fn sha256_file(path: &Path) -> Result<String> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    Ok(format!("{:x}", hasher.finalize()))
}

/// Writer that feeds every byte it passes on into a SHA-256 hasher.
struct HashingWriter<W> {
    inner: W,
    hasher: Sha256,
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.hasher.update(&buf[..n]);
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// Byte-for-byte copy that carries over timestamps and permissions.
///
/// The bytes land in a temporary file inside `backup_root` and are only
/// renamed to `dest` once the copy and its metadata are complete; on any
/// failure the temporary file is removed, so no truncated file ever
/// carries a backup name. Returns the byte count and the hex digest of
/// what was written.
fn copy_preserving_metadata(
    source: &Path,
    backup_root: &Path,
    dest: &Path,
) -> Result<(u64, String)> {
    let mut reader = File::open(source)?;
    let meta = reader.metadata()?;

    let fail = |e: io::Error| HmiAuditError::write_failed(dest, &e);

    let tmp = NamedTempFile::new_in(backup_root).map_err(fail)?;
    let mut writer = HashingWriter {
        inner: tmp,
        hasher: Sha256::new(),
    };
    let bytes = io::copy(&mut reader, &mut writer).map_err(fail)?;
    let HashingWriter { inner: tmp, hasher } = writer;

    let file = tmp.as_file();
    file.sync_all().map_err(fail)?;

    let mut times = FileTimes::new();
    if let Ok(modified) = meta.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    file.set_times(times).map_err(fail)?;

    // Last, so a read-only source mode does not block the steps above.
    file.set_permissions(meta.permissions()).map_err(fail)?;

    tmp.persist(dest).map_err(|e| fail(e.error))?;

    Ok((bytes, format!("{:x}", hasher.finalize())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 11, 28)
            .unwrap()
            .and_hms_opt(14, 35, 2)
            .unwrap()
    }

    fn write_source(dir: &TempDir, content: &str) -> PathBuf {
        let path = dir.path().join("AuditTrail.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn file_name_uses_timestamp_suffix() {
        let name = backup_file_name(Path::new("/share/Audit/AuditTrail.csv"), fixed_now()).unwrap();

        assert_eq!(name, "AuditTrail.csv_20251128_14_35_02");
    }

    #[test]
    fn backup_copies_bytes_into_root() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(&tmp, "Date,Time\n2025-11-28,14:35:02\n");
        let root = tmp.path().join("audit_bu");

        let record = BackupService::new(true)
            .backup_at(&source, &root, fixed_now())
            .unwrap();

        assert_eq!(record.path, root.join("AuditTrail.csv_20251128_14_35_02"));
        assert_eq!(fs::read(&record.path).unwrap(), fs::read(&source).unwrap());
        assert_eq!(record.bytes, 30);
    }

    #[test]
    fn backup_creates_nested_root() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(&tmp, "x");
        let root = tmp.path().join("a").join("b").join("c");

        let path = BackupService::new(false)
            .create_backup(&source, &root)
            .unwrap()
            .path;

        assert!(root.is_dir());
        assert_eq!(path.parent(), Some(root.as_path()));
    }

    #[test]
    fn backup_name_has_timestamp_of_now() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(&tmp, "x");
        let root = tmp.path().join("bu");

        let path = BackupService::new(true)
            .create_backup(&source, &root)
            .unwrap()
            .path;
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        let suffix = name.strip_prefix("AuditTrail.csv_").unwrap();

        assert!(NaiveDateTime::parse_from_str(suffix, BACKUP_TIMESTAMP_FORMAT).is_ok());
    }

    #[test]
    fn backup_preserves_modification_time() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(&tmp, "x");
        let past = std::time::SystemTime::UNIX_EPOCH + std::time::Duration::from_secs(1_700_000_000);
        File::options()
            .write(true)
            .open(&source)
            .unwrap()
            .set_modified(past)
            .unwrap();

        let record = BackupService::new(true)
            .backup_at(&source, &tmp.path().join("bu"), fixed_now())
            .unwrap();

        assert_eq!(fs::metadata(&record.path).unwrap().modified().unwrap(), past);
    }

    #[test]
    fn backup_digest_matches_source() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(&tmp, "abc");

        let record = BackupService::new(true)
            .backup_at(&source, &tmp.path().join("bu"), fixed_now())
            .unwrap();

        assert_eq!(
            record.sha256,
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[cfg(unix)]
    #[test]
    fn backup_preserves_read_only_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let source = write_source(&tmp, "Date,Time\n");
        fs::set_permissions(&source, fs::Permissions::from_mode(0o440)).unwrap();

        let record = BackupService::new(true)
            .backup_at(&source, &tmp.path().join("bu"), fixed_now())
            .unwrap();

        let mode = fs::metadata(&record.path).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o440);
        assert_eq!(fs::read(&record.path).unwrap(), b"Date,Time\n");
    }

    #[test]
    fn growing_source_digest_matches_backup() {
        use std::io::Write;
        use std::sync::Arc;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::thread;
        use std::time::Duration;

        let tmp = TempDir::new().unwrap();
        let mut content = String::from("Date,Time,User,Action,Object,Old value,New value\n");
        for i in 0..20_000 {
            content.push_str(&format!("2025-11-28,14:35:02,Engineer,Parameter change,Speed,{i},{}\n", i + 1));
        }
        let source = write_source(&tmp, &content);
        let root = tmp.path().join("bu");

        let stop = Arc::new(AtomicBool::new(false));
        let appender = {
            let stop = Arc::clone(&stop);
            let source = source.clone();
            thread::spawn(move || {
                let mut file = fs::OpenOptions::new().append(true).open(&source).unwrap();
                while !stop.load(Ordering::Relaxed) {
                    file.write_all(b"2025-11-28,14:40:18,Operator,Logout,,,\n")
                        .unwrap();
                    thread::sleep(Duration::from_micros(200));
                }
            })
        };

        for (verify, offset) in [(true, 0), (false, 30)] {
            for i in 0..10 {
                let now = fixed_now() + chrono::Duration::seconds(offset + i);
                let record = BackupService::new(verify)
                    .backup_at(&source, &root, now)
                    .unwrap();

                assert_eq!(sha256_file(&record.path).unwrap(), record.sha256);
                assert_eq!(fs::metadata(&record.path).unwrap().len(), record.bytes);
            }
        }

        stop.store(true, Ordering::Relaxed);
        appender.join().unwrap();
    }

    #[test]
    fn failed_copy_leaves_no_file_in_root() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(&tmp, "x");
        let root = tmp.path().join("bu");
        // A non-empty directory squatting on the backup name makes the
        // final rename fail after the bytes were written.
        let squatter = root.join("AuditTrail.csv_20251128_14_35_02");
        fs::create_dir_all(&squatter).unwrap();
        fs::write(squatter.join("keep"), "").unwrap();

        let result = BackupService::new(true).backup_at(&source, &root, fixed_now());

        assert!(matches!(result, Err(HmiAuditError::WriteError { .. })));
        assert_eq!(fs::read_dir(&root).unwrap().count(), 1);
    }

    #[test]
    fn successful_backup_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(&tmp, "x");
        let root = tmp.path().join("bu");

        BackupService::new(true)
            .backup_at(&source, &root, fixed_now())
            .unwrap();

        assert_eq!(fs::read_dir(&root).unwrap().count(), 1);
    }

    #[test]
    fn missing_source_fails_without_writing() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("audit_bu");

        let result = BackupService::new(true).create_backup(Path::new("/nonexistent/path.csv"), &root);

        assert!(matches!(result, Err(HmiAuditError::NotFound { .. })));
        assert!(!root.exists());
    }

    #[test]
    fn directory_source_is_not_found() {
        let tmp = TempDir::new().unwrap();

        let result = BackupService::new(true).create_backup(tmp.path(), &tmp.path().join("bu"));

        assert!(matches!(result, Err(HmiAuditError::NotFound { .. })));
    }

    #[test]
    fn root_blocked_by_file_is_write_error() {
        let tmp = TempDir::new().unwrap();
        let source = write_source(&tmp, "x");
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "").unwrap();

        let result = BackupService::new(true).create_backup(&source, &blocker.join("bu"));

        assert!(matches!(result, Err(HmiAuditError::WriteError { .. })));
    }
}
