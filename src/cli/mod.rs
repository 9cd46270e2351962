pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Back up, parse and summarize industrial HMI audit trails.
#[derive(Parser, Debug)]
#[command(name = "hmi-audit", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the configuration file (default: ./hmi-audit.toml if present)
    #[arg(long, global = true, env = "HMI_AUDIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Back up the audit trail, then parse, analyze and write the report
    Run {
        /// Live audit trail CSV (local path or mounted share)
        source: PathBuf,
        /// Directory receiving the timestamped backup
        #[arg(long)]
        backup_root: Option<PathBuf>,
        /// Report destination (overwritten if present)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Only snapshot the audit trail into the backup directory
    Backup {
        /// Live audit trail CSV
        source: PathBuf,
        /// Directory receiving the timestamped backup
        #[arg(long)]
        backup_root: Option<PathBuf>,
    },

    /// Write a report from an existing audit trail file, without backup
    Report {
        /// Audit trail CSV (typically a previous backup)
        file: PathBuf,
        /// Report destination (overwritten if present)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// List audit events with optional filters
    Events {
        /// Audit trail CSV
        file: PathBuf,
        /// Filter by user (case-insensitive substring)
        #[arg(long)]
        user: Option<String>,
        /// Filter by action (case-insensitive substring)
        #[arg(long)]
        action: Option<String>,
        /// Show events on or after this date (YYYY-MM-DD)
        #[arg(long)]
        since: Option<String>,
        /// Show last N events
        #[arg(long)]
        last: Option<usize>,
        /// Only engineer access events
        #[arg(long)]
        engineer: bool,
        /// Only parameter change events
        #[arg(long)]
        parameter_changes: bool,
    },

    /// Write a default hmi-audit.toml
    Init,
}

/// Output format of the summary report.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReportFormat {
    Text,
    Json,
}
