use std::path::{Path, PathBuf};

use colored::Colorize;

use crate::adapters::report::json_report_writer::JsonReportWriter;
use crate::adapters::report::text_report_writer::TextReportWriter;
use crate::cli::{ReportFormat, context, output};
use crate::config::app_config::{AppConfig, ReportConfig};
use crate::core::errors::Result;
use crate::core::models::analysis_report::AnalysisReport;
use crate::core::traits::report_writer::ReportWriter;

/// Load the configuration named by the global flags, or the default file.
pub fn load_config() -> Result<AppConfig> {
    let config = AppConfig::load(context::config_path())?;
    if let Some(path) = context::config_path() {
        output::detail(&format!("Config: {}", path.display()));
    }
    Ok(config)
}

/// Pick the report writer for the requested format.
pub fn report_writer(format: ReportFormat, config: &ReportConfig) -> Box<dyn ReportWriter> {
    match format {
        ReportFormat::Text => Box::new(TextReportWriter::new(config.clone())),
        ReportFormat::Json => Box::new(JsonReportWriter::new(config.clone())),
    }
}

/// The `--output` flag if given, otherwise the configured default path.
pub fn resolve_output(output: Option<&Path>, config: &ReportConfig) -> PathBuf {
    output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&config.default_output_path))
}

/// Print the report counts to the terminal.
pub fn print_summary(report: &AnalysisReport<'_>) {
    output::line(&format!(
        "Total events: {}",
        report.total_event_count.to_string().bold()
    ));
    output::line(&format!(
        "Parameter changes: {}",
        report.parameter_change_count().to_string().yellow()
    ));
    output::line(&format!(
        "Engineering access events: {}",
        report.engineer_access_count().to_string().cyan()
    ));
}
