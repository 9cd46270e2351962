use std::path::Path;

use crate::cli::{context, output};
use crate::config::app_config::{DEFAULT_CONFIG_FILE, DEFAULT_CONFIG_TEMPLATE};
use crate::core::errors::{HmiAuditError, Result};

/// Execute the `hmi-audit init` command.
///
/// Writes a commented default configuration to `--config` (or
/// `hmi-audit.toml`). An existing file is never overwritten.
pub fn execute() -> Result<()> {
    let path = context::config_path().unwrap_or(Path::new(DEFAULT_CONFIG_FILE));

    if path.exists() {
        return Err(HmiAuditError::InvalidConfig {
            detail: format!(
                "{} already exists. Edit it directly or remove it first.",
                path.display()
            ),
        });
    }

    std::fs::write(path, DEFAULT_CONFIG_TEMPLATE)
        .map_err(|e| HmiAuditError::write_failed(path, &e))?;

    output::header("hmi-audit init");
    output::success(&format!("Created {}", path.display()));
    output::line("Set report_title and default_output_path for this HMI system.");

    Ok(())
}
