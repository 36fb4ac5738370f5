//! Users enrolled on the device.

use serde::{Deserialize, Serialize};

/// A device user as exposed to callers: `{id, name}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    /// The device's employee number.
    pub id: String,
    pub name: String,
}
