use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of an HMI audit trail.
///
/// The timestamp is always present and valid; every other field is
/// whitespace-trimmed text that defaults to an empty string when the
/// export leaves the column blank or omits it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditEvent {
    /// Combined `Date` + `Time`, timezone-naive plant local time.
    pub timestamp: NaiveDateTime,
    pub user: String,
    pub action: String,
    /// Affected control object (e.g. `Speed`); empty for logins/logouts.
    pub object: String,
    pub old_value: String,
    pub new_value: String,
}

impl AuditEvent {
    /// Returns true when the user label starts with `prefix`, ignoring case.
    pub fn user_starts_with(&self, prefix: &str) -> bool {
        self.user.to_lowercase().starts_with(&prefix.to_lowercase())
    }

    /// Returns true when the action contains `keyword`, ignoring case.
    pub fn action_contains(&self, keyword: &str) -> bool {
        self.action.to_lowercase().contains(&keyword.to_lowercase())
    }
}
