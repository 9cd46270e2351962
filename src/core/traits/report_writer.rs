use std::path::Path;

use chrono::NaiveDateTime;

use crate::core::errors::Result;
use crate::core::models::analysis_report::AnalysisReport;

/// Port for rendering an `AnalysisReport` to a file.
pub trait ReportWriter: Send + Sync {
    /// Render the report as it would be written at `generated_at`.
    fn render(&self, report: &AnalysisReport<'_>, generated_at: NaiveDateTime) -> Result<String>;

    /// Write the report to `output`, replacing any existing file.
    ///
    /// On failure the previous content of `output` (if any) is left
    /// untouched.
    fn write(&self, report: &AnalysisReport<'_>, output: &Path) -> Result<()>;
}
