//! Core domain logic for access-control attendance.
//!
//! This crate contains the device-independent pieces:
//! - Raw event and directory user types
//! - Event query validation and device time filters
//! - Search-session ID generation
//! - Attendance normalization: filtering, classification and ordering

mod attendance;
pub mod event;
pub mod query;
pub mod search_id;
pub mod types;
pub mod user;

pub use attendance::{
    AttendanceMethod, AttendanceRecord, FACE_MINOR, FINGERPRINT_OR_CARD_MINORS, normalize,
};
pub use event::RawEventRecord;
pub use query::{DateRange, EventQuery};
pub use search_id::{SearchIdGenerator, SequentialSearchIds, UuidSearchIds};
pub use types::{EmployeeId, SearchId, UtcOffset, ValidationError};
pub use user::DirectoryUser;
