//! Scripted transport for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use crate::client::DeviceTransport;
use crate::error::DeviceError;

/// Replays queued replies in order and records every request.
#[derive(Default)]
pub struct ScriptedTransport {
    replies: Mutex<VecDeque<Result<Value, DeviceError>>>,
    requests: Mutex<Vec<(String, Value)>>,
}

impl ScriptedTransport {
    pub fn new(replies: impl IntoIterator<Item = Result<Value, DeviceError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            requests: Mutex::default(),
        }
    }

    /// Event pages of the given sizes, each record with a unique serial.
    pub fn with_event_pages(sizes: &[usize]) -> Self {
        let mut first_serial = 1;
        Self::new(sizes.iter().map(|&size| {
            let page = event_page(size, first_serial);
            first_serial += size as u64;
            Ok(page)
        }))
    }

    pub fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl DeviceTransport for ScriptedTransport {
    async fn send(&self, path: &str, payload: &Value) -> Result<Value, DeviceError> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), payload.clone()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(DeviceError::Parse("no scripted reply left".into())))
    }
}

/// An `AcsEvent` reply holding `size` fingerprint events numbered from
/// `first_serial`.
pub fn event_page(size: usize, first_serial: u64) -> Value {
    let records: Vec<Value> = (first_serial..first_serial + size as u64)
        .map(|serial| {
            json!({
                "major": 5,
                "minor": 75,
                "time": "2025-03-01T08:00:00-04:00",
                "employeeNoString": serial.to_string(),
                "name": format!("Employee {serial}"),
                "serialNo": serial
            })
        })
        .collect();
    json!({"AcsEvent": {"InfoList": records}})
}
