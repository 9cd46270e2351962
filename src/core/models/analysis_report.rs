use serde::Serialize;

use super::audit_event::AuditEvent;

/// Aggregate produced by the analyzer and consumed by every report writer.
///
/// Holds references into the analyzed event slice; it is built once and
/// never mutated afterwards. Both sublists keep input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport<'a> {
    pub total_event_count: usize,
    pub engineer_access_events: Vec<&'a AuditEvent>,
    pub parameter_change_events: Vec<&'a AuditEvent>,
}

impl AnalysisReport<'_> {
    pub fn engineer_access_count(&self) -> usize {
        self.engineer_access_events.len()
    }

    pub fn parameter_change_count(&self) -> usize {
        self.parameter_change_events.len()
    }
}
