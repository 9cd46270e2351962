use std::path::PathBuf;

/// Outcome of a successful backup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupRecord {
    /// Full path of the new backup file.
    pub path: PathBuf,
    /// Lowercase hex SHA-256 of the copied bytes.
    pub sha256: String,
    pub bytes: u64,
}
