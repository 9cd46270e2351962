use crate::core::errors::Result;
use crate::core::models::audit_event::AuditEvent;

/// Port for turning a raw audit trail export into structured events.
///
/// Only the CSV layout of Siemens-style HMI exports ships today; the
/// trait leaves room for other panel vendors' formats.
pub trait AuditParser: Send + Sync {
    /// Parse decoded file content into events, preserving row order.
    ///
    /// Any unparsable row fails the whole parse; no partial result is
    /// returned.
    fn parse(&self, content: &str) -> Result<Vec<AuditEvent>>;
}
