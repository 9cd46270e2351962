use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use colored::Colorize;

use crate::adapters::parsers::csv_audit_parser::parse_audit_csv;
use crate::cli::commands::pipeline_helpers;
use crate::cli::{context, output};
use crate::core::errors::{HmiAuditError, Result};
use crate::core::models::audit_event::AuditEvent;
use crate::core::services::analyzer_service::AnalyzerService;
use crate::core::services::query_service::EventQuery;

/// Filters accepted by `hmi-audit events`, as given on the command line.
pub struct EventsArgs<'a> {
    pub user: Option<&'a str>,
    pub action: Option<&'a str>,
    pub since: Option<&'a str>,
    pub last: Option<usize>,
    pub engineer: bool,
    pub parameter_changes: bool,
}

/// Execute the `hmi-audit events` command.
pub fn execute(file: &Path, args: &EventsArgs<'_>) -> Result<()> {
    let config = pipeline_helpers::load_config()?;
    let analyzer = AnalyzerService::from_config(&config.classification);

    let query = EventQuery {
        user: args.user.map(str::to_string),
        action: args.action.map(str::to_string),
        since: args.since.map(parse_since).transpose()?,
        last: args.last,
        engineer_only: args.engineer,
        parameter_changes_only: args.parameter_changes,
    };

    let events = parse_audit_csv(file)?;
    let display = query.apply(&events, &analyzer);

    if display.is_empty() {
        output::header("hmi-audit events");
        output::warning("No audit events found");
        if query.is_filtered() {
            output::line("Try removing filters to see all events.");
        }
        return Ok(());
    }

    if context::is_quiet() {
        return Ok(());
    }

    output::header(&format!(
        "hmi-audit events ({} of {})",
        display.len(),
        events.len()
    ));
    println!();

    for event in &display {
        print_event(event, &analyzer);
    }

    Ok(())
}

/// Parse a `--since` date (`YYYY-MM-DD`) as local midnight.
fn parse_since(s: &str) -> Result<NaiveDateTime> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| HmiAuditError::InvalidConfig {
            detail: format!("Invalid date format: '{s}'. Expected YYYY-MM-DD, e.g. 2025-11-28"),
        })
}

/// Print a single event as a formatted row.
fn print_event(event: &AuditEvent, analyzer: &AnalyzerService) {
    let date = event.timestamp.format("%Y-%m-%d %H:%M:%S").to_string();

    let user = if event.user.is_empty() {
        "—".dimmed().to_string()
    } else if analyzer.is_engineer_access(event) {
        event.user.cyan().to_string()
    } else {
        event.user.clone()
    };

    let action = if analyzer.is_parameter_change(event) {
        event.action.yellow().to_string()
    } else {
        event.action.clone()
    };

    let change = if event.old_value.is_empty() && event.new_value.is_empty() {
        String::new()
    } else {
        format!("{} → {}", event.old_value, event.new_value)
            .dimmed()
            .to_string()
    };

    println!(
        "  {} {} {:<12} {:<18} {} {}",
        date.dimmed(),
        "│".dimmed(),
        user,
        action,
        event.object,
        change,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn since_is_local_midnight() {
        let since = parse_since("2025-11-28").unwrap();

        assert_eq!(since.to_string(), "2025-11-28 00:00:00");
    }

    #[test]
    fn since_rejects_other_formats() {
        assert!(matches!(
            parse_since("28-11-2025"),
            Err(HmiAuditError::InvalidConfig { .. })
        ));
    }
}
