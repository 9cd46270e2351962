use std::path::{Path, PathBuf};

use crate::cli::commands::pipeline_helpers;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::services::backup_service::BackupService;

/// Execute the `hmi-audit backup` command.
pub fn execute(source: &Path, backup_root: Option<&Path>) -> Result<()> {
    let config = pipeline_helpers::load_config()?;

    let backup_root = backup_root
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.backup.backup_root));

    let record = BackupService::new(config.backup.verify).create_backup(source, &backup_root)?;

    output::header("hmi-audit backup");
    output::success(&format!("Backup created: {}", record.path.display()));
    output::line(&format!("SHA-256: {}", record.sha256));
    output::detail(&format!("{} bytes copied", record.bytes));
    if !config.backup.verify {
        output::warning("Verification disabled in config; copy was not re-hashed");
    }

    Ok(())
}
