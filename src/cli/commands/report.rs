use std::path::Path;

use crate::adapters::parsers::csv_audit_parser::parse_audit_csv;
use crate::cli::commands::pipeline_helpers;
use crate::cli::{ReportFormat, output};
use crate::core::errors::Result;
use crate::core::services::analyzer_service::AnalyzerService;

/// Execute the `hmi-audit report` command.
///
/// Same as `run` without the backup stage, for re-reporting an
/// existing backup.
pub fn execute(file: &Path, output_path: Option<&Path>, format: ReportFormat) -> Result<()> {
    let config = pipeline_helpers::load_config()?;

    let events = parse_audit_csv(file)?;
    output::detail(&format!("Parsed {} events from {}", events.len(), file.display()));

    let report = AnalyzerService::from_config(&config.classification).analyze(&events);

    let destination = pipeline_helpers::resolve_output(output_path, &config.report);
    pipeline_helpers::report_writer(format, &config.report).write(&report, &destination)?;

    output::header("hmi-audit report");
    pipeline_helpers::print_summary(&report);
    output::success(&format!("Report written to {}", destination.display()));

    Ok(())
}
