//! Event query parameters and date-range validation.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::{UtcOffset, ValidationError};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Caller-supplied event query, as it arrives from the route layer or CLI.
///
/// Both dates are optional here so that a missing parameter is reported as a
/// [`ValidationError`] instead of a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQuery {
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default)]
    pub end: Option<String>,
}

impl EventQuery {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Validates both dates and returns the inclusive range.
    pub fn validate(&self) -> Result<DateRange, ValidationError> {
        let start = parse_date("start", self.start.as_deref())?;
        let end = parse_date("end", self.end.as_deref())?;
        DateRange::new(start, end)
    }
}

fn parse_date(field: &'static str, value: Option<&str>) -> Result<NaiveDate, ValidationError> {
    let value = value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(ValidationError::MissingField { field })?;

    // chrono accepts unpadded fields; the device filter needs the fixed-width form.
    if value.len() != 10 {
        return Err(ValidationError::InvalidDate {
            field,
            value: value.to_string(),
        });
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| ValidationError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// An inclusive range of calendar days in device-local time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvertedRange {
                start: start.format(DATE_FORMAT).to_string(),
                end: end.format(DATE_FORMAT).to_string(),
            });
        }
        Ok(Self { start, end })
    }

    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    /// Returns the device time filter: `start` at 00:00:00 through `end` at
    /// 23:59:59, both suffixed with the device's fixed offset.
    pub fn time_bounds(&self, offset: UtcOffset) -> (String, String) {
        (
            format!("{}T00:00:00{offset}", self.start.format(DATE_FORMAT)),
            format!("{}T23:59:59{offset}", self.end.format(DATE_FORMAT)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_accepts_well_formed_range() {
        let range = EventQuery::new("2025-03-01", "2025-03-15").validate().unwrap();
        assert_eq!(range.start(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(range.end(), NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
    }

    #[test]
    fn validate_accepts_single_day() {
        assert!(EventQuery::new("2025-03-01", "2025-03-01").validate().is_ok());
    }

    #[test]
    fn validate_rejects_missing_end() {
        let query = EventQuery {
            start: Some("2025-03-01".to_string()),
            end: None,
        };
        assert_eq!(
            query.validate().unwrap_err(),
            ValidationError::MissingField { field: "end" }
        );
    }

    #[test]
    fn validate_treats_blank_as_missing() {
        let query = EventQuery::new("  ", "2025-03-01");
        assert_eq!(
            query.validate().unwrap_err(),
            ValidationError::MissingField { field: "start" }
        );
    }

    #[test]
    fn validate_rejects_malformed_dates() {
        for bad in ["2025-3-1", "2025/03/01", "2025-02-30", "yesterday", "2025-03-01T00:00"] {
            let err = EventQuery::new(bad, "2025-03-31").validate().unwrap_err();
            assert!(
                matches!(err, ValidationError::InvalidDate { field: "start", .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn validate_rejects_inverted_range() {
        let err = EventQuery::new("2025-03-02", "2025-03-01").validate().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvertedRange {
                start: "2025-03-02".to_string(),
                end: "2025-03-01".to_string(),
            }
        );
    }

    #[test]
    fn time_bounds_embed_fixed_offset() {
        let range = EventQuery::new("2025-03-01", "2025-03-15").validate().unwrap();
        let (start, end) = range.time_bounds("-04:00".parse().unwrap());
        assert_eq!(start, "2025-03-01T00:00:00-04:00");
        assert_eq!(end, "2025-03-15T23:59:59-04:00");

        let (start, _) = range.time_bounds("+08:00".parse().unwrap());
        assert_eq!(start, "2025-03-01T00:00:00+08:00");
    }

    #[test]
    fn query_deserializes_with_missing_fields() {
        let query: EventQuery = serde_json::from_str(r#"{"start":"2025-01-01"}"#).unwrap();
        assert_eq!(query.start.as_deref(), Some("2025-01-01"));
        assert!(query.end.is_none());
    }
}
