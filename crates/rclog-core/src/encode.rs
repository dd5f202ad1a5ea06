//! Output encoders.
//!
//! JSON is a single pretty-printed array. CSV is a header row followed by one
//! row per entry; every column is always present.

use std::fmt;
use std::io::Write;

use crate::entry::LogEntry;
use crate::error::{CoreError, Result};

/// Document format for serialized output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Json => f.write_str("json"),
            OutputFormat::Csv => f.write_str("csv"),
        }
    }
}

/// Write `entries` as an indented JSON array followed by a newline.
pub fn write_json<W: Write, E: LogEntry>(mut out: W, entries: &[E]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, entries)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}

/// Write `entries` as CSV with a header row.
pub fn write_csv<W: Write, E: LogEntry>(out: W, entries: &[E]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(E::CSV_HEADER)?;
    for entry in entries {
        writer.write_record(entry.csv_record())?;
    }
    writer.flush().map_err(CoreError::Io)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{SessionLogEntry, SystemLogEntry};
    use crate::types::{SessionId, SystemId};
    use chrono::{TimeZone, Utc};

    fn system_entry() -> SystemLogEntry {
        SystemLogEntry {
            id: SystemId(17),
            time: Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 30).unwrap(),
            originator: "Jane Doe".into(),
            api_key_name: String::new(),
            resource: "database/42".into(),
            kind: "Database".into(),
            description: "Database \"cache\" updated, memory limit 1GB".into(),
        }
    }

    #[test]
    fn test_output_format_names() {
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Csv.to_string(), "csv");
    }

    #[test]
    fn test_json_is_indented_array() {
        let mut out = Vec::new();
        write_json(&mut out, &[system_entry()]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("[\n  {\n    \"id\": 17,"));
        assert!(text.ends_with("]\n"));
        assert!(!text.contains("apiKeyName"));
    }

    #[test]
    fn test_csv_header_and_quoting() {
        let mut out = Vec::new();
        write_csv(&mut out, &[system_entry()]).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();

        assert_eq!(
            lines.next(),
            Some("id,time,originator,apiKeyName,resource,type,description")
        );
        assert_eq!(
            lines.next(),
            Some(
                "17,2024-03-01T10:15:30Z,Jane Doe,,database/42,Database,\
                 \"Database \"\"cache\"\" updated, memory limit 1GB\""
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_csv_session_rows() {
        let entry = SessionLogEntry {
            id: SessionId::new("a1"),
            time: Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap(),
            user: "ops@example.com".into(),
            user_agent: "curl/8.0".into(),
            ip_address: "192.0.2.10".into(),
            user_role: "Viewer".into(),
            kind: "API".into(),
            action: "Logout".into(),
        };
        let mut out = Vec::new();
        write_csv(&mut out, &[entry.clone(), entry]).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 3);
        assert!(text.starts_with("id,time,user,userAgent,ipAddress,userRole,type,action\n"));
    }
}
