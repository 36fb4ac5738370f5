//! Enrolled-user directory lookup.
//!
//! # Known limitation
//!
//! The directory is fetched as a single page of up to
//! [`DIRECTORY_PAGE_SIZE`] users. A device holding more users returns only
//! the first page; this is logged as a warning whenever the device reports
//! more matches than it returned.

use std::sync::Arc;

use acs_core::{DirectoryUser, SearchIdGenerator};

use crate::client::DeviceTransport;
use crate::error::DeviceError;
use crate::wire::{USERS_PATH, UserSearchCond, UserSearchRequest, parse_user_page};

/// Maximum users requested in the single directory page.
pub const DIRECTORY_PAGE_SIZE: usize = 1000;

const SEARCH_ID_PREFIX: &str = "users-";

/// Fetches the device's enrolled users.
pub struct UserDirectoryFetcher {
    transport: Arc<dyn DeviceTransport>,
    search_ids: Arc<dyn SearchIdGenerator>,
    page_size: usize,
}

impl UserDirectoryFetcher {
    pub fn new(transport: Arc<dyn DeviceTransport>, search_ids: Arc<dyn SearchIdGenerator>) -> Self {
        Self {
            transport,
            search_ids,
            page_size: DIRECTORY_PAGE_SIZE,
        }
    }

    #[must_use]
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    /// Returns `{id, name}` for every user on the first directory page.
    ///
    /// A device with no users yields an empty list, not an error.
    pub async fn fetch_users(&self) -> Result<Vec<DirectoryUser>, DeviceError> {
        let search_id = self.search_ids.next_id(SEARCH_ID_PREFIX);
        let request = UserSearchRequest {
            cond: UserSearchCond {
                search_id: &search_id,
                max_results: self.page_size,
                search_result_position: 0,
            },
        };
        let payload =
            serde_json::to_value(&request).map_err(|err| DeviceError::Parse(err.to_string()))?;

        let reply = self.transport.send(USERS_PATH, &payload).await?;
        let page = parse_user_page(reply)?;

        let users: Vec<DirectoryUser> = page
            .users
            .into_iter()
            .map(|user| DirectoryUser {
                id: user.employee_no,
                name: user.name,
            })
            .collect();

        if let Some(total) = page.total_matches {
            if usize::try_from(total).map_or(true, |total| total > users.len()) {
                tracing::warn!(
                    total,
                    returned = users.len(),
                    "device holds more users than one directory page"
                );
            }
        }
        tracing::info!(%search_id, users = users.len(), "fetched device users");
        Ok(users)
    }
}
