pub mod parser;
pub mod report_writer;
