//! Attendance normalization.
//!
//! Turns raw device events into attendance records: only recognized
//! check-in subtypes with a known employee survive, each is classified by
//! verification method, and the result is ordered chronologically.
//!
//! # Timestamp handling
//!
//! The device emits fixed-width timestamps (`YYYY-MM-DDTHH:MM:SS±HH:MM`).
//! The date is the first 10 characters and the time-of-day is characters
//! 11..19, both taken in the device's local wall clock. The 19-character
//! prefix must parse as `%Y-%m-%dT%H:%M:%S` and render back unchanged;
//! records that fail the check are skipped and logged rather than emitted
//! with garbled fields.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::event::RawEventRecord;
use crate::types::EmployeeId;

/// Minor code reported for face verification.
pub const FACE_MINOR: u32 = 167;

/// Minor codes reported for fingerprint or card verification.
pub const FINGERPRINT_OR_CARD_MINORS: [u32; 3] = [75, 76, 38];

const LOCAL_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const LOCAL_TIMESTAMP_LEN: usize = 19;

/// How an employee identified at the terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttendanceMethod {
    #[serde(rename = "Rostro")]
    Face,
    #[serde(rename = "Huella/Tarjeta")]
    FingerprintOrCard,
}

impl AttendanceMethod {
    /// Classifies an event minor code, or `None` for non-attendance events.
    pub fn from_minor(minor: u32) -> Option<Self> {
        if minor == FACE_MINOR {
            Some(Self::Face)
        } else if FINGERPRINT_OR_CARD_MINORS.contains(&minor) {
            Some(Self::FingerprintOrCard)
        } else {
            None
        }
    }

    /// Label used in the external JSON contract.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Face => "Rostro",
            Self::FingerprintOrCard => "Huella/Tarjeta",
        }
    }
}

impl fmt::Display for AttendanceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recognized check-in/check-out event.
///
/// Serialized with the field names the web frontend expects
/// (`fecha`, `hora`, `id`, `nombre`, `metodo`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendanceRecord {
    /// Calendar date, `YYYY-MM-DD`.
    #[serde(rename = "fecha")]
    pub date: String,
    /// Time of day, `HH:MM:SS`.
    #[serde(rename = "hora")]
    pub time: String,
    #[serde(rename = "id")]
    pub employee_id: EmployeeId,
    #[serde(rename = "nombre")]
    pub employee_name: String,
    #[serde(rename = "metodo")]
    pub method: AttendanceMethod,
}

/// Maps raw device events to attendance records, sorted by date then time.
///
/// Pure apart from logging: the same input always yields the same output.
/// Events repeating a device `serialNo` already seen in `records` are
/// dropped; events without a serial number are never collapsed.
pub fn normalize(records: &[RawEventRecord]) -> Vec<AttendanceRecord> {
    let mut seen_serials = HashSet::new();
    let mut attendance = Vec::new();

    for record in records {
        let Some(method) = AttendanceMethod::from_minor(record.minor) else {
            continue;
        };
        let Some(employee_id) = record.employee_id() else {
            continue;
        };
        if let Some(serial) = record.serial_no {
            if !seen_serials.insert(serial) {
                tracing::debug!(serial, "dropping duplicate event");
                continue;
            }
        }
        let Some((date, time)) = split_local_timestamp(&record.time) else {
            tracing::warn!(
                timestamp = %record.time,
                employee = %employee_id,
                "skipping event with malformed timestamp"
            );
            continue;
        };

        attendance.push(AttendanceRecord {
            date,
            time,
            employee_id,
            employee_name: record.name.clone(),
            method,
        });
    }

    // Stable, so events sharing a second keep device order.
    attendance.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.time.cmp(&b.time)));
    attendance
}

/// Splits a device timestamp into its `YYYY-MM-DD` and `HH:MM:SS` parts.
///
/// The prefix must be exactly the canonical rendering of the parsed value;
/// chrono alone tolerates unpadded fields and stray whitespace.
fn split_local_timestamp(timestamp: &str) -> Option<(String, String)> {
    let local = timestamp.get(..LOCAL_TIMESTAMP_LEN)?;
    let parsed = NaiveDateTime::parse_from_str(local, LOCAL_TIMESTAMP_FORMAT).ok()?;
    if parsed.format(LOCAL_TIMESTAMP_FORMAT).to_string() != local {
        return None;
    }
    Some((
        parsed.format("%Y-%m-%d").to_string(),
        parsed.format("%H:%M:%S").to_string(),
    ))
}
