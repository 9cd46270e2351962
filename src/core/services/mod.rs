pub mod analyzer_service;
pub mod backup_service;
pub mod query_service;
