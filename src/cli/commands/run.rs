use std::path::{Path, PathBuf};

use crate::adapters::parsers::csv_audit_parser::parse_audit_csv;
use crate::cli::commands::pipeline_helpers;
use crate::cli::{ReportFormat, output};
use crate::core::errors::Result;
use crate::core::services::analyzer_service::AnalyzerService;
use crate::core::services::backup_service::BackupService;

/// Execute the `hmi-audit run` command.
///
/// Backup → parse → analyze → write report, strictly in that order.
/// The report is parsed from the backup copy, not the live file, and is
/// only written once every earlier stage has succeeded.
pub fn execute(
    source: &Path,
    backup_root: Option<&Path>,
    output_path: Option<&Path>,
    format: ReportFormat,
) -> Result<()> {
    let config = pipeline_helpers::load_config()?;

    let backup_root = backup_root
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.backup.backup_root));

    output::header("hmi-audit run");

    let record = BackupService::new(config.backup.verify).create_backup(source, &backup_root)?;
    output::success(&format!("Backup created: {}", record.path.display()));
    output::detail(&format!("SHA-256: {} ({} bytes)", record.sha256, record.bytes));

    let events = parse_audit_csv(&record.path)?;
    output::success(&format!("Parsed {} events", events.len()));

    let analyzer = AnalyzerService::from_config(&config.classification);
    let report = analyzer.analyze(&events);

    let destination = pipeline_helpers::resolve_output(output_path, &config.report);
    pipeline_helpers::report_writer(format, &config.report).write(&report, &destination)?;

    pipeline_helpers::print_summary(&report);
    output::success(&format!("Report written to {}", destination.display()));

    Ok(())
}
