//! Device error types.

use acs_core::ValidationError;
use thiserror::Error;

/// Errors raised while querying the device.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// Caller input was rejected before any request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The device settings could not be turned into a client.
    #[error("invalid device configuration: {0}")]
    InvalidConfig(String),
    /// Failed to build HTTP client.
    #[error("failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
    /// Connection failure, timeout or body read error.
    #[error("device request failed: {0}")]
    Request(#[from] reqwest::Error),
    /// The device answered with a non-success HTTP status.
    #[error("device returned HTTP {status}: {message}")]
    Status { status: u16, message: String },
    /// The digest challenge could not be answered.
    #[error("digest authentication failed: {0}")]
    Auth(String),
    /// The body was not JSON or lacked the expected envelope.
    #[error("invalid device response: {0}")]
    Parse(String),
    /// The device answered a page request with results it had already sent.
    #[error("device repeated results at position {position}, search stopped")]
    Stalled { position: usize },
}

/// Coarse error taxonomy exposed to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or missing caller input; the device was not contacted.
    Validation,
    /// The device could not be reached or refused the request.
    Transport,
    /// The device replied with something other than the expected JSON.
    Parse,
}

impl DeviceError {
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Parse(_) => ErrorKind::Parse,
            Self::InvalidConfig(_)
            | Self::ClientBuild(_)
            | Self::Request(_)
            | Self::Status { .. }
            | Self::Auth(_)
            | Self::Stalled { .. } => ErrorKind::Transport,
        }
    }
}
