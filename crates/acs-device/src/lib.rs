//! Device integration for ISAPI access-control terminals.
//!
//! Provides:
//! - [`DeviceClient`]: digest-authenticated JSON transport
//! - [`EventPaginator`]: exhaustive, session-based event log search
//! - [`UserDirectoryFetcher`]: single-page enrolled-user lookup
//!
//! Neither retries: any failed request fails the whole operation, and the
//! caller decides whether to try again.

mod client;
mod error;
mod events;
#[cfg(test)]
mod testing;
mod users;
pub mod wire;

pub use client::{DEFAULT_TIMEOUT, DeviceClient, DeviceConfig, DeviceTransport};
pub use error::{DeviceError, ErrorKind};
pub use events::{CHUNK_SIZE, EventPaginator};
pub use users::{DIRECTORY_PAGE_SIZE, UserDirectoryFetcher};
