use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{HmiAuditError, Result};

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "hmi-audit.toml";

/// Top-level configuration read from `hmi-audit.toml`.
///
/// Every section is optional; a missing section falls back to the
/// defaults of the original single-panel deployment.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub report: ReportConfig,
    pub backup: BackupConfig,
    pub classification: ClassificationConfig,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// With `explicit = None`, reads `hmi-audit.toml` from the current
    /// directory when present and otherwise uses defaults. An explicitly
    /// named file must exist.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => {
                if !p.exists() {
                    return Err(HmiAuditError::InvalidConfig {
                        detail: format!("config file {} not found", p.display()),
                    });
                }
                p.to_path_buf()
            }
            None => {
                let default = PathBuf::from(DEFAULT_CONFIG_FILE);
                if !default.exists() {
                    return Ok(Self::default());
                }
                default
            }
        };

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content).map_err(|e| match e {
            HmiAuditError::InvalidConfig { detail } => HmiAuditError::InvalidConfig {
                detail: format!("{}: {detail}", path.display()),
            },
            other => other,
        })
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| HmiAuditError::InvalidConfig {
            detail: format!("failed to parse TOML: {e}"),
        })?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.classification.engineer_prefix.trim().is_empty() {
            return Err(HmiAuditError::InvalidConfig {
                detail: "classification.engineer_prefix must not be empty".into(),
            });
        }
        if self.classification.parameter_keyword.trim().is_empty() {
            return Err(HmiAuditError::InvalidConfig {
                detail: "classification.parameter_keyword must not be empty".into(),
            });
        }
        if self.report.default_output_path.trim().is_empty() {
            return Err(HmiAuditError::InvalidConfig {
                detail: "report.default_output_path must not be empty".into(),
            });
        }
        if self.backup.backup_root.trim().is_empty() {
            return Err(HmiAuditError::InvalidConfig {
                detail: "backup.backup_root must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// The `[report]` section: identity of the HMI system being reported on.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    pub report_title: String,
    pub default_output_path: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            report_title: "SYSTEM N°1 HMI AUDIT REPORT".to_string(),
            default_output_path: "System1_audit_report.txt".to_string(),
        }
    }
}

/// The `[backup]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackupConfig {
    pub backup_root: String,
    /// Compare SHA-256 digests of source and copy after each backup.
    pub verify: bool,
}

impl Default for BackupConfig {
    fn default() -> Self {
        Self {
            backup_root: "audit_bu".to_string(),
            verify: true,
        }
    }
}

/// The `[classification]` section. Keywords are matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClassificationConfig {
    pub engineer_prefix: String,
    pub parameter_keyword: String,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            engineer_prefix: "eng".to_string(),
            parameter_keyword: "parameter".to_string(),
        }
    }
}

/// Commented default written by `hmi-audit init`.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# hmi-audit configuration

[report]
# Title line of the text report; change it per HMI system.
report_title = "SYSTEM N°1 HMI AUDIT REPORT"
default_output_path = "System1_audit_report.txt"

[backup]
backup_root = "audit_bu"
verify = true

[classification]
# Users whose label starts with this prefix count as engineer accesses.
engineer_prefix = "eng"
# Actions containing this keyword count as parameter changes.
parameter_keyword = "parameter"
"#;
