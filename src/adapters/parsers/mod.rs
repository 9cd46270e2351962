pub mod csv_audit_parser;
