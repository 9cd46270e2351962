use chrono::NaiveDateTime;

use crate::core::models::audit_event::AuditEvent;
use crate::core::services::analyzer_service::AnalyzerService;

/// Filters for listing audit events.
///
/// All filters combine with AND. `last` is applied after the others and
/// keeps the final N matches in file order.
#[derive(Debug, Clone, Default)]
pub struct EventQuery {
    /// Case-insensitive substring of the user label.
    pub user: Option<String>,
    /// Case-insensitive substring of the action.
    pub action: Option<String>,
    /// Keep events at or after this instant.
    pub since: Option<NaiveDateTime>,
    pub last: Option<usize>,
    pub engineer_only: bool,
    pub parameter_changes_only: bool,
}

impl EventQuery {
    /// Whether any filter is set.
    pub fn is_filtered(&self) -> bool {
        self.user.is_some()
            || self.action.is_some()
            || self.since.is_some()
            || self.last.is_some()
            || self.engineer_only
            || self.parameter_changes_only
    }

    pub fn apply<'a>(
        &self,
        events: &'a [AuditEvent],
        analyzer: &AnalyzerService,
    ) -> Vec<&'a AuditEvent> {
        let user = self.user.as_ref().map(|u| u.to_lowercase());
        let action = self.action.as_ref().map(|a| a.to_lowercase());

        let matches: Vec<&AuditEvent> = events
            .iter()
            .filter(|e| {
                user.as_ref()
                    .is_none_or(|u| e.user.to_lowercase().contains(u.as_str()))
            })
            .filter(|e| {
                action
                    .as_ref()
                    .is_none_or(|a| e.action.to_lowercase().contains(a.as_str()))
            })
            .filter(|e| self.since.is_none_or(|since| e.timestamp >= since))
            .filter(|e| !self.engineer_only || analyzer.is_engineer_access(e))
            .filter(|e| !self.parameter_changes_only || analyzer.is_parameter_change(e))
            .collect();

        match self.last {
            Some(n) => {
                let skip = matches.len().saturating_sub(n);
                matches.into_iter().skip(skip).collect()
            }
            None => matches,
        }
    }
}
