pub mod backup;
pub mod events;
pub mod init;
pub mod pipeline_helpers;
pub mod report;
pub mod run;
