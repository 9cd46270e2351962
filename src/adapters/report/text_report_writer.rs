use std::path::Path;

use chrono::{Local, NaiveDateTime};

use crate::adapters::fs::atomic::write_atomic;
use crate::config::app_config::ReportConfig;
use crate::core::errors::Result;
use crate::core::models::analysis_report::AnalysisReport;
use crate::core::traits::report_writer::ReportWriter;

/// Format of the generation timestamp printed under the title.
pub const GENERATED_AT_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

const SEPARATOR: &str = "============================================================";

/// Renders the fixed-layout plain text summary:
///
/// ```text
/// 		SYSTEM N°1 HMI AUDIT REPORT
/// 28-11-2025 15:00:00
/// ============================================================
///
/// Total events: 2
/// Parameter changes: 1
/// Engineering access events: 1
/// ```
pub struct TextReportWriter {
    config: ReportConfig,
}

impl TextReportWriter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }
}

impl ReportWriter for TextReportWriter {
    fn render(&self, report: &AnalysisReport<'_>, generated_at: NaiveDateTime) -> Result<String> {
        Ok(format!(
            "\t\t{title}\n{generated}\n{SEPARATOR}\n\n\
             Total events: {total}\n\
             Parameter changes: {params}\n\
             Engineering access events: {eng}\n",
            title = self.config.report_title,
            generated = generated_at.format(GENERATED_AT_FORMAT),
            total = report.total_event_count,
            params = report.parameter_change_count(),
            eng = report.engineer_access_count(),
        ))
    }

    fn write(&self, report: &AnalysisReport<'_>, output: &Path) -> Result<()> {
        let content = self.render(report, Local::now().naive_local())?;
        write_atomic(output, content.as_bytes())
    }
}
