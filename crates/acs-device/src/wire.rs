//! ISAPI request and response envelopes.

use acs_core::{RawEventRecord, SearchId};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DeviceError;

/// Event log search endpoint.
pub const EVENTS_PATH: &str = "/ISAPI/AccessControl/AcsEvent?format=json";

/// Enrolled user search endpoint.
pub const USERS_PATH: &str = "/ISAPI/AccessControl/UserInfo/Search?format=json";

/// `{"AcsEventCond": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct EventSearchRequest<'a> {
    #[serde(rename = "AcsEventCond")]
    pub cond: EventSearchCond<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSearchCond<'a> {
    #[serde(rename = "searchID")]
    pub search_id: &'a SearchId,
    pub search_result_position: usize,
    pub max_results: usize,
    /// 0 matches every major code.
    pub major: u32,
    /// 0 matches every minor code.
    pub minor: u32,
    pub start_time: &'a str,
    pub end_time: &'a str,
}

/// `{"UserInfoSearchCond": {...}}`
#[derive(Debug, Clone, Serialize)]
pub struct UserSearchRequest<'a> {
    #[serde(rename = "UserInfoSearchCond")]
    pub cond: UserSearchCond<'a>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserSearchCond<'a> {
    #[serde(rename = "searchID")]
    pub search_id: &'a SearchId,
    pub max_results: usize,
    pub search_result_position: usize,
}

#[derive(Debug, Deserialize)]
struct EventSearchResponse {
    #[serde(rename = "AcsEvent")]
    acs_event: Option<EventSearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventSearchResult {
    #[serde(rename = "InfoList", default)]
    info_list: Vec<RawEventRecord>,
    #[serde(default)]
    response_status_strg: Option<String>,
}

/// One page of an event search.
#[derive(Debug)]
pub struct EventPage {
    pub records: Vec<RawEventRecord>,
    /// `OK`, `MORE` or `NO MATCH`; informational only.
    pub status: Option<String>,
}

/// Parses an event search reply.
///
/// A reply without `InfoList` is an empty page (the device omits the list
/// on `NO MATCH`); a reply without the `AcsEvent` envelope is an error.
pub fn parse_event_page(value: Value) -> Result<EventPage, DeviceError> {
    let response: EventSearchResponse =
        serde_json::from_value(value).map_err(|err| DeviceError::Parse(err.to_string()))?;
    let result = response
        .acs_event
        .ok_or_else(|| DeviceError::Parse("missing AcsEvent envelope".into()))?;
    Ok(EventPage {
        records: result.info_list,
        status: result.response_status_strg,
    })
}

#[derive(Debug, Deserialize)]
struct UserSearchResponse {
    #[serde(rename = "UserInfoSearch", default)]
    search: Option<UserSearchResult>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserSearchResult {
    #[serde(rename = "UserInfo", default)]
    user_info: Option<OneOrMany<UserInfo>>,
    #[serde(default)]
    total_matches: Option<u64>,
}

/// A native enrolled-user record.
#[derive(Debug, Clone, Deserialize)]
pub struct UserInfo {
    #[serde(rename = "employeeNo", default)]
    pub employee_no: String,
    #[serde(default)]
    pub name: String,
}

/// The device sends a bare object when exactly one user matches.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// A user search reply, normalized to a list.
#[derive(Debug, Default)]
pub struct UserPage {
    pub users: Vec<UserInfo>,
    /// Matches the device holds in total, when reported.
    pub total_matches: Option<u64>,
}

/// Parses a user search reply. An absent `UserInfoSearch` or `UserInfo`
/// means the device has no users.
pub fn parse_user_page(value: Value) -> Result<UserPage, DeviceError> {
    let response: UserSearchResponse =
        serde_json::from_value(value).map_err(|err| DeviceError::Parse(err.to_string()))?;
    let Some(search) = response.search else {
        return Ok(UserPage::default());
    };
    Ok(UserPage {
        users: search.user_info.map(OneOrMany::into_vec).unwrap_or_default(),
        total_matches: search.total_matches,
    })
}
