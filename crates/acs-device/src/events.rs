//! Exhaustive event-log pagination.
//!
//! The device exposes its event log as a session-oriented search: every page
//! request repeats the same `searchID` and advances `searchResultPosition`.
//! There is no "has more" flag, so a page shorter than the requested size is
//! the only end-of-results signal.
//!
//! No total is assumed. The only guard against endless paging is a device
//! that ignores the cursor: a full page that brings no new serial numbers,
//! or repeats the previous page verbatim, stops the search with
//! [`DeviceError::Stalled`].

use std::collections::HashSet;
use std::sync::Arc;

use acs_core::{DateRange, EventQuery, RawEventRecord, SearchIdGenerator, UtcOffset};

use crate::client::DeviceTransport;
use crate::error::DeviceError;
use crate::wire::{EVENTS_PATH, EventSearchCond, EventSearchRequest, parse_event_page};

/// Records requested per page.
pub const CHUNK_SIZE: usize = 30;

const SEARCH_ID_PREFIX: &str = "events-";

/// Cursor state owned by one in-flight query.
#[derive(Debug, Default)]
struct PaginationState {
    position: usize,
    accumulated: Vec<RawEventRecord>,
    exhausted: bool,
    seen_serials: HashSet<u64>,
    previous_page: Vec<RawEventRecord>,
}

impl PaginationState {
    fn advance(
        &mut self,
        batch: Vec<RawEventRecord>,
        chunk_size: usize,
    ) -> Result<(), DeviceError> {
        let received = batch.len();
        if received < chunk_size {
            self.accumulated.extend(batch);
            self.exhausted = true;
            return Ok(());
        }

        let mut fresh = false;
        for record in &batch {
            // Records without a serial cannot be told apart, so count as new.
            fresh |= record
                .serial_no
                .is_none_or(|serial| self.seen_serials.insert(serial));
        }
        if !fresh || batch == self.previous_page {
            return Err(DeviceError::Stalled {
                position: self.position,
            });
        }

        self.accumulated.extend(batch.iter().cloned());
        self.previous_page = batch;
        self.position += received;
        Ok(())
    }
}

/// Drives a multi-page event search against the device.
///
/// Queries share nothing but the transport and ID generator, so one
/// paginator can serve concurrent queries.
pub struct EventPaginator {
    transport: Arc<dyn DeviceTransport>,
    search_ids: Arc<dyn SearchIdGenerator>,
    utc_offset: UtcOffset,
    chunk_size: usize,
}

impl EventPaginator {
    pub fn new(
        transport: Arc<dyn DeviceTransport>,
        search_ids: Arc<dyn SearchIdGenerator>,
        utc_offset: UtcOffset,
    ) -> Self {
        Self {
            transport,
            search_ids,
            utc_offset,
            chunk_size: CHUNK_SIZE,
        }
    }

    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Validates `query` and fetches every event in its range.
    ///
    /// Validation failures are returned before the device is contacted.
    pub async fn fetch_all_events(
        &self,
        query: &EventQuery,
    ) -> Result<Vec<RawEventRecord>, DeviceError> {
        let range = query.validate()?;
        self.fetch_range(&range).await
    }

    /// Fetches every event in `range`, page by page.
    ///
    /// Any failing page aborts the whole search; partial results are never
    /// returned.
    pub async fn fetch_range(&self, range: &DateRange) -> Result<Vec<RawEventRecord>, DeviceError> {
        let (start_time, end_time) = range.time_bounds(self.utc_offset);
        let search_id = self.search_ids.next_id(SEARCH_ID_PREFIX);
        let mut state = PaginationState::default();
        let mut pages = 0;

        while !state.exhausted {
            let request = EventSearchRequest {
                cond: EventSearchCond {
                    search_id: &search_id,
                    search_result_position: state.position,
                    max_results: self.chunk_size,
                    major: 0,
                    minor: 0,
                    start_time: &start_time,
                    end_time: &end_time,
                },
            };
            let payload =
                serde_json::to_value(&request).map_err(|err| DeviceError::Parse(err.to_string()))?;

            let reply = self.transport.send(EVENTS_PATH, &payload).await.inspect_err(|err| {
                tracing::warn!(%search_id, position = state.position, error = %err, "event page failed");
            })?;
            let page = parse_event_page(reply)?;
            pages += 1;

            tracing::debug!(
                %search_id,
                position = state.position,
                received = page.records.len(),
                status = page.status.as_deref().unwrap_or("-"),
                "fetched event page"
            );
            state
                .advance(page.records, self.chunk_size)
                .inspect_err(|_| {
                    tracing::warn!(%search_id, pages, "device repeated a page, stopping search");
                })?;
        }

        tracing::info!(
            %search_id,
            pages,
            events = state.accumulated.len(),
            "event search finished"
        );
        Ok(state.accumulated)
    }
}
