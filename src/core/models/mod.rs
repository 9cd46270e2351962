pub mod analysis_report;
pub mod audit_event;
pub mod backup_record;
