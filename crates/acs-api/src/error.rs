//! API error types.

use acs_device::{DeviceError, ErrorKind};
use acs_store::StoreError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned to HTTP clients as `{"error": "<message>"}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request was rejected before the device was contacted.
    #[error("{0}")]
    BadRequest(String),

    /// The device failed or answered with something unusable.
    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            Self::BadRequest(_) => tracing::debug!(error = %self, "rejected request"),
            Self::Upstream(_) => tracing::warn!(error = %self, "device request failed"),
            Self::Internal(_) => tracing::error!(error = %self, "internal error"),
        }
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

impl From<DeviceError> for ApiError {
    fn from(err: DeviceError) -> Self {
        match err.kind() {
            ErrorKind::Validation => Self::BadRequest(err.to_string()),
            ErrorKind::Transport | ErrorKind::Parse => Self::Upstream(err.to_string()),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("storage task failed: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use acs_core::ValidationError;

    use super::*;

    #[test]
    fn device_errors_map_by_kind() {
        let validation = ApiError::from(DeviceError::from(ValidationError::MissingField {
            field: "start",
        }));
        assert_eq!(validation.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(validation.to_string(), "missing required parameter: start");

        let status = ApiError::from(DeviceError::Status {
            status: 401,
            message: "Unauthorized".to_string(),
        });
        assert_eq!(status.status_code(), StatusCode::BAD_GATEWAY);

        let parse = ApiError::from(DeviceError::Parse("missing AcsEvent".to_string()));
        assert_eq!(parse.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn internal_is_server_error() {
        assert_eq!(
            ApiError::Internal("disk full".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
