use crate::config::app_config::ClassificationConfig;
use crate::core::models::analysis_report::AnalysisReport;
use crate::core::models::audit_event::AuditEvent;

/// Classifies audit events into engineer accesses and parameter changes.
pub struct AnalyzerService {
    engineer_prefix: String,
    parameter_keyword: String,
}

impl AnalyzerService {
    pub fn new(engineer_prefix: &str, parameter_keyword: &str) -> Self {
        Self {
            engineer_prefix: engineer_prefix.to_string(),
            parameter_keyword: parameter_keyword.to_string(),
        }
    }

    pub fn from_config(config: &ClassificationConfig) -> Self {
        Self::new(&config.engineer_prefix, &config.parameter_keyword)
    }

    /// Whether the event was performed by an engineering-level user.
    pub fn is_engineer_access(&self, event: &AuditEvent) -> bool {
        event.user_starts_with(&self.engineer_prefix)
    }

    /// Whether the event modified a control parameter.
    pub fn is_parameter_change(&self, event: &AuditEvent) -> bool {
        event.action_contains(&self.parameter_keyword)
    }

    /// Build the analysis over `events`.
    ///
    /// The two filters are independent: an event may land in neither,
    /// one, or both sublists. Input order is kept in each.
    pub fn analyze<'a>(&self, events: &'a [AuditEvent]) -> AnalysisReport<'a> {
        AnalysisReport {
            total_event_count: events.len(),
            engineer_access_events: events
                .iter()
                .filter(|e| self.is_engineer_access(e))
                .collect(),
            parameter_change_events: events
                .iter()
                .filter(|e| self.is_parameter_change(e))
                .collect(),
        }
    }
}

impl Default for AnalyzerService {
    fn default() -> Self {
        Self::from_config(&ClassificationConfig::default())
    }
}
