//! Search-session identifier generation.
//!
//! The device correlates paginated requests by an opaque `searchID`. The
//! generator is injected wherever a search starts so tests can use
//! predictable IDs.

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::types::SearchId;

/// Produces a fresh [`SearchId`] for each logical search.
pub trait SearchIdGenerator: Send + Sync {
    /// Returns a new ID starting with `prefix`.
    fn next_id(&self, prefix: &str) -> SearchId;
}

/// Random UUIDv4-based IDs, e.g. `events-6f1c…`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSearchIds;

impl SearchIdGenerator for UuidSearchIds {
    fn next_id(&self, prefix: &str) -> SearchId {
        SearchId::generated(prefix, Uuid::new_v4().simple())
    }
}

/// Monotonic counter-based IDs, e.g. `events-1`, `events-2`.
#[derive(Debug, Default)]
pub struct SequentialSearchIds {
    next: AtomicU64,
}

impl SequentialSearchIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchIdGenerator for SequentialSearchIds {
    fn next_id(&self, prefix: &str) -> SearchId {
        let n = self.next.fetch_add(1, Ordering::Relaxed) + 1;
        SearchId::generated(prefix, n)
    }
}
