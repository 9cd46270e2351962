pub mod json_report_writer;
pub mod text_report_writer;
