use std::path::Path;

use chrono::{Local, NaiveDateTime};
use serde::Serialize;

use crate::adapters::fs::atomic::write_atomic;
use crate::config::app_config::ReportConfig;
use crate::core::errors::{HmiAuditError, Result};
use crate::core::models::analysis_report::AnalysisReport;
use crate::core::models::audit_event::AuditEvent;
use crate::core::traits::report_writer::ReportWriter;

/// Machine-readable report: the text report's counts plus the
/// classified events themselves.
pub struct JsonReportWriter {
    config: ReportConfig,
}

#[derive(Serialize)]
struct JsonReport<'r, 'a> {
    title: &'r str,
    generated_at: NaiveDateTime,
    total_event_count: usize,
    parameter_change_count: usize,
    engineer_access_count: usize,
    parameter_change_events: &'r [&'a AuditEvent],
    engineer_access_events: &'r [&'a AuditEvent],
}

impl JsonReportWriter {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }
}

impl ReportWriter for JsonReportWriter {
    fn render(&self, report: &AnalysisReport<'_>, generated_at: NaiveDateTime) -> Result<String> {
        let doc = JsonReport {
            title: &self.config.report_title,
            generated_at,
            total_event_count: report.total_event_count,
            parameter_change_count: report.parameter_change_count(),
            engineer_access_count: report.engineer_access_count(),
            parameter_change_events: &report.parameter_change_events,
            engineer_access_events: &report.engineer_access_events,
        };

        let mut out = serde_json::to_string_pretty(&doc).map_err(|e| HmiAuditError::RenderError {
            detail: e.to_string(),
        })?;
        out.push('\n');
        Ok(out)
    }

    fn write(&self, report: &AnalysisReport<'_>, output: &Path) -> Result<()> {
        let content = self.render(report, Local::now().naive_local())?;
        write_atomic(output, content.as_bytes())
    }
}
