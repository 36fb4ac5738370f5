//! Raw access-control events as reported by the device.

use serde::{Deserialize, Serialize};

use crate::types::EmployeeId;

/// A device-native event record, one entry of an `AcsEvent.InfoList` page.
///
/// Only the fields the attendance pipeline reads are modelled; everything
/// else the device sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEventRecord {
    /// ISO-like timestamp with an embedded UTC offset,
    /// e.g. `2025-03-01T08:01:02-04:00`.
    #[serde(default)]
    pub time: String,
    /// Employee number of the person who triggered the event. Absent for
    /// events that are not tied to a user (door alarms, tamper, ...).
    #[serde(
        rename = "employeeNoString",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub employee_no: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub major: u32,
    #[serde(default)]
    pub minor: u32,
    /// Device-assigned sequence number, unique per logged event.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial_no: Option<u64>,
}

impl RawEventRecord {
    /// Returns the employee ID, or `None` when it is absent or empty.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        self.employee_no
            .as_deref()
            .and_then(|id| EmployeeId::new(id).ok())
    }
}
