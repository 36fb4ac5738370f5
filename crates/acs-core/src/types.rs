//! Core type definitions with validation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Validation errors for caller input and core types.
///
/// These are always raised before the device is contacted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided value was empty.
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },

    /// A required query parameter was not supplied.
    #[error("missing required parameter: {field}")]
    MissingField { field: &'static str },

    /// A date parameter was not a `YYYY-MM-DD` calendar date.
    #[error("invalid {field} date {value:?}, expected YYYY-MM-DD")]
    InvalidDate { field: &'static str, value: String },

    /// The range ends before it starts.
    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: String, end: String },

    /// The configured UTC offset is not `+HH:MM` / `-HH:MM`.
    #[error("invalid UTC offset {value:?}, expected +HH:MM or -HH:MM")]
    InvalidUtcOffset { value: String },
}

/// Generates a validated string ID newtype with common trait implementations.
macro_rules! define_string_id {
    (
        $(#[$meta:meta])*
        $name:ident, $field_name:literal
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Creates a new ID after validation.
            pub fn new(id: impl Into<String>) -> Result<Self, ValidationError> {
                let id = id.into();
                if id.is_empty() {
                    return Err(ValidationError::Empty { field: $field_name });
                }
                Ok(Self(id))
            }

            /// Returns the ID as a string slice.
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_string_id!(
    /// An opaque token correlating the pages of one device search.
    ///
    /// Every page of a single event query carries the same search ID; a new
    /// ID is generated for each distinct query.
    SearchId, "search ID"
);

impl SearchId {
    /// Joins `prefix` with a generated suffix. Numbers and UUIDs never
    /// render empty, so no validation is needed.
    pub(crate) fn generated(prefix: &str, suffix: impl fmt::Display) -> Self {
        Self(format!("{prefix}{suffix}"))
    }
}

define_string_id!(
    /// A validated employee number as enrolled on the device.
    EmployeeId, "employee ID"
);

/// The device's fixed UTC offset, embedded in every outgoing time filter.
///
/// Parsed from `+HH:MM` / `-HH:MM`. It is configured once and never derived
/// from the host's locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct UtcOffset {
    seconds: i32,
}

impl Default for UtcOffset {
    fn default() -> Self {
        Self {
            seconds: -4 * 3600,
        }
    }
}

impl FromStr for UtcOffset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidUtcOffset {
            value: s.to_string(),
        };

        let bytes = s.as_bytes();
        let digits = [1, 2, 4, 5];
        if bytes.len() != 6 || bytes[3] != b':' || digits.iter().any(|&i| !bytes[i].is_ascii_digit())
        {
            return Err(invalid());
        }
        let sign = match bytes[0] {
            b'+' => 1,
            b'-' => -1,
            _ => return Err(invalid()),
        };
        let field = |i: usize| i32::from(bytes[i] - b'0') * 10 + i32::from(bytes[i + 1] - b'0');
        let (hours, minutes) = (field(1), field(4));
        if hours > 14 || minutes > 59 {
            return Err(invalid());
        }

        Ok(Self {
            seconds: sign * (hours * 3600 + minutes * 60),
        })
    }
}

impl TryFrom<String> for UtcOffset {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<UtcOffset> for String {
    fn from(offset: UtcOffset) -> Self {
        offset.to_string()
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.seconds;
        let sign = if seconds < 0 { '-' } else { '+' };
        let minutes = seconds.abs() / 60;
        write!(f, "{sign}{:02}:{:02}", minutes / 60, minutes % 60)
    }
}
