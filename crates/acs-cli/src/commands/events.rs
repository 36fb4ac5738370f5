//! `acs events`: attendance records for a date range.

use std::io::Write;

use acs_core::{AttendanceRecord, EventQuery, normalize};
use acs_device::EventPaginator;
use anyhow::Result;

use super::truncate;

/// Format attendance records as a table.
pub fn format_attendance(records: &[AttendanceRecord]) -> String {
    if records.is_empty() {
        return "No attendance records found.\n".to_string();
    }

    let mut output = format!(
        "{:<10}  {:<8}  {:<8}  {:<22}  METHOD\n",
        "DATE", "TIME", "ID", "NAME"
    );
    output.push_str("──────────  ────────  ────────  ──────────────────────  ──────────────\n");
    for record in records {
        output.push_str(&format!(
            "{:<10}  {:<8}  {:<8}  {:<22}  {}\n",
            record.date,
            record.time,
            record.employee_id.as_str(),
            truncate(&record.employee_name, 22),
            record.method
        ));
    }
    output
}

/// Fetches, normalizes and prints attendance for `query`.
pub async fn run<W: Write>(
    out: &mut W,
    paginator: &EventPaginator,
    query: &EventQuery,
    json: bool,
) -> Result<()> {
    let raw = paginator.fetch_all_events(query).await?;
    let records = normalize(&raw);
    tracing::debug!(raw = raw.len(), attendance = records.len(), "normalized events");

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&records)?)?;
    } else {
        write!(out, "{}", format_attendance(&records))?;
    }
    Ok(())
}
