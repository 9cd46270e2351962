use std::path::Path;

use chrono::NaiveDateTime;
use csv::{ReaderBuilder, StringRecord};

use crate::core::errors::{HmiAuditError, Result};
use crate::core::models::audit_event::AuditEvent;
use crate::core::traits::parser::AuditParser;

/// Format of the combined `Date` + `Time` columns.
pub const EVENT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parses HMI audit trail CSV exports.
///
/// Expected header (names are case-sensitive, order is free, extra
/// columns are ignored):
/// ```text
/// Date,Time,User,Action,Object,Old value,New value
/// 2025-11-28,14:35:02,Engineer,Parameter change,Speed,120,150
/// 2025-11-28,14:40:18,Operator,Logout
/// ```
/// `Date` and `Time` are required. Rows may stop early; the missing
/// trailing fields read as empty strings.
pub struct CsvAuditParser;

/// Column positions resolved from the header row.
struct Columns {
    date: usize,
    time: usize,
    user: Option<usize>,
    action: Option<usize>,
    object: Option<usize>,
    old_value: Option<usize>,
    new_value: Option<usize>,
}

impl Columns {
    fn locate(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| headers.iter().position(|h| h == name);
        let require = |name: &str| {
            find(name).ok_or_else(|| HmiAuditError::MissingColumn {
                column: name.to_string(),
                found: headers.iter().collect::<Vec<_>>().join(","),
            })
        };

        Ok(Self {
            date: require("Date")?,
            time: require("Time")?,
            user: find("User"),
            action: find("Action"),
            object: find("Object"),
            old_value: find("Old value"),
            new_value: find("New value"),
        })
    }

    /// Convert one data row into an event, or fail with its line number.
    fn to_event(&self, record: &StringRecord) -> Result<AuditEvent> {
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        let date = field(record, Some(self.date));
        let time = field(record, Some(self.time));

        let timestamp =
            NaiveDateTime::parse_from_str(&format!("{date} {time}"), EVENT_TIMESTAMP_FORMAT)
                .map_err(|e| HmiAuditError::MalformedRow {
                    line,
                    raw: raw_row(record),
                    detail: format!("invalid timestamp '{date} {time}' ({e})"),
                })?;

        Ok(AuditEvent {
            timestamp,
            user: field(record, self.user).to_string(),
            action: field(record, self.action).to_string(),
            object: field(record, self.object).to_string(),
            old_value: field(record, self.old_value).to_string(),
            new_value: field(record, self.new_value).to_string(),
        })
    }
}

/// Trimmed field at `idx`, or `""` when the column or cell is absent.
fn field(record: &StringRecord, idx: Option<usize>) -> &str {
    idx.and_then(|i| record.get(i)).unwrap_or("").trim()
}

fn raw_row(record: &StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}

/// Reader-level failures have no decoded row to show; the csv error
/// message already carries the position when one is known.
fn csv_error(e: csv::Error) -> HmiAuditError {
    HmiAuditError::InvalidCsv {
        detail: e.to_string(),
    }
}

impl AuditParser for CsvAuditParser {
    fn parse(&self, content: &str) -> Result<Vec<AuditEvent>> {
        let content = content.strip_prefix('\u{feff}').unwrap_or(content);

        let mut reader = ReaderBuilder::new()
            .flexible(true)
            .from_reader(content.as_bytes());

        let headers = reader.headers().map_err(csv_error)?.clone();

        // A zero-byte export has no header at all: nothing was logged.
        if headers.is_empty() {
            return Ok(Vec::new());
        }

        let columns = Columns::locate(&headers)?;

        let mut events = Vec::new();
        for record in reader.records() {
            let record = record.map_err(csv_error)?;
            events.push(columns.to_event(&record)?);
        }

        Ok(events)
    }
}

/// Read and parse an audit trail CSV file.
///
/// The file must be UTF-8; a leading byte-order mark is dropped.
pub fn parse_audit_csv(path: &Path) -> Result<Vec<AuditEvent>> {
    if !path.is_file() {
        return Err(HmiAuditError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let bytes = std::fs::read(path)?;
    let content = String::from_utf8(bytes).map_err(|_| HmiAuditError::InvalidEncoding {
        path: path.to_path_buf(),
    })?;

    CsvAuditParser.parse(&content)
}
