//! Application state shared across handlers.

use std::sync::Arc;

use acs_device::{EventPaginator, UserDirectoryFetcher};
use acs_store::ConfigStore;

#[derive(Clone)]
pub struct AppState {
    pub events: Arc<EventPaginator>,
    pub users: Arc<UserDirectoryFetcher>,
    pub store: Arc<ConfigStore>,
}

impl AppState {
    pub fn new(events: EventPaginator, users: UserDirectoryFetcher, store: ConfigStore) -> Self {
        Self {
            events: Arc::new(events),
            users: Arc::new(users),
            store: Arc::new(store),
        }
    }
}
