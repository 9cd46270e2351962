use std::path::{Path, PathBuf};

/// All domain errors for hmi-audit.
///
/// Every variant is fatal for the pipeline run and carries enough
/// context (path, line number, raw row) to diagnose the problem
/// without re-running with extra instrumentation.
#[derive(Debug, thiserror::Error)]
pub enum HmiAuditError {
    #[error(
        "File not found: {path}\n\n  \
         Check that the audit trail path is correct and reachable.\n  \
         Network shares must be mounted before running hmi-audit."
    )]
    NotFound { path: PathBuf },

    #[error(
        "Malformed row at line {line}: {detail}\n\n  \
         Row content: {raw}\n\n  \
         Expected Date as YYYY-MM-DD and Time as HH:MM:SS.\n  \
         The audit trail cannot be summarized while it contains unparsable rows."
    )]
    MalformedRow {
        line: u64,
        raw: String,
        detail: String,
    },

    #[error(
        "Unreadable CSV structure: {detail}\n\n  \
         The export could not be split into rows and fields."
    )]
    InvalidCsv { detail: String },

    #[error(
        "Missing required column '{column}'\n\n  \
         Header found: {found}\n  \
         Expected header: Date,Time,User,Action,Object,Old value,New value"
    )]
    MissingColumn { column: String, found: String },

    #[error(
        "Invalid encoding in {path}\n\n  \
         Audit trail exports must be UTF-8 (a leading BOM is accepted)."
    )]
    InvalidEncoding { path: PathBuf },

    #[error("Cannot write {path}: {reason}")]
    WriteError { path: PathBuf, reason: String },

    #[error(
        "Backup verification failed: {backup} does not match {original}\n\n  \
         The copy differs from the source audit trail and must not be trusted.\n  \
         Check free disk space on the backup volume and run the backup again."
    )]
    BackupVerificationFailed { original: PathBuf, backup: PathBuf },

    #[error("Report rendering failed: {detail}")]
    RenderError { detail: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl HmiAuditError {
    /// Wrap an I/O failure on a file or directory this tool produces.
    pub fn write_failed(path: &Path, e: &std::io::Error) -> Self {
        Self::WriteError {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, HmiAuditError>;
