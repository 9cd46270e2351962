pub mod fs;
pub mod parsers;
pub mod report;
