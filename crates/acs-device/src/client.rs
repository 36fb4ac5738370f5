//! HTTP transport to the device.
//!
//! The device protects its ISAPI endpoints with HTTP Digest authentication.
//! [`DeviceClient`] sends every request unauthenticated first; on a `401`
//! carrying a `Digest` challenge it computes the response and retries once.
//! No nonce is kept between calls, so the client holds no mutable session
//! state and can be shared freely.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use digest_auth::AuthContext;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, WWW_AUTHENTICATE};
use reqwest::{Response, StatusCode, Url};
use serde::Deserialize;
use serde_json::Value;

use crate::error::DeviceError;

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Sends a JSON payload to a device endpoint and returns the JSON reply.
///
/// This is the seam the paginator and directory fetcher are written
/// against; tests substitute scripted implementations.
#[async_trait]
pub trait DeviceTransport: Send + Sync {
    /// POSTs `payload` to `path` (relative to the device base URL).
    async fn send(&self, path: &str, payload: &Value) -> Result<Value, DeviceError>;
}

/// Connection settings for one device, fixed at startup.
#[derive(Clone)]
pub struct DeviceConfig {
    /// Bare host (`192.168.0.20`) or full base URL (`https://door.local:8443`).
    pub host: String,
    pub username: String,
    pub password: String,
    pub timeout: Duration,
}

impl fmt::Debug for DeviceConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceConfig")
            .field("host", &self.host)
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Digest-authenticated ISAPI client.
///
/// # Thread Safety
///
/// The client is safe to clone and share across threads. Each clone shares
/// the underlying HTTP connection pool.
#[derive(Clone)]
pub struct DeviceClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: String,
}

impl fmt::Debug for DeviceClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeviceClient")
            .field("base_url", &self.base_url.as_str())
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish_non_exhaustive()
    }
}

impl DeviceClient {
    /// Creates a client for the configured device.
    ///
    /// # Errors
    ///
    /// Returns an error if the host does not form a valid base URL or the
    /// HTTP client fails to build.
    pub fn new(config: DeviceConfig) -> Result<Self, DeviceError> {
        let base_url = parse_base_url(&config.host)?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(DeviceError::ClientBuild)?;

        Ok(Self {
            http,
            base_url,
            username: config.username,
            password: config.password,
        })
    }

    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post(
        &self,
        url: &Url,
        body: &[u8],
        authorization: Option<&str>,
    ) -> Result<Response, DeviceError> {
        let mut request = self
            .http
            .post(url.clone())
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_vec());
        if let Some(value) = authorization {
            request = request.header(AUTHORIZATION, value);
        }
        Ok(request.send().await?)
    }

    fn answer_challenge(
        &self,
        response: &Response,
        url: &Url,
        body: &[u8],
    ) -> Result<String, DeviceError> {
        let challenge = response
            .headers()
            .get_all(WWW_AUTHENTICATE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.trim_start().to_ascii_lowercase().starts_with("digest"))
            .ok_or_else(|| DeviceError::Auth("401 response carried no Digest challenge".into()))?;

        let mut prompt =
            digest_auth::parse(challenge).map_err(|err| DeviceError::Auth(err.to_string()))?;
        let uri = request_uri(url);
        let context = AuthContext::new_post(
            self.username.as_str(),
            self.password.as_str(),
            uri.as_str(),
            Some(body),
        );
        let answer = prompt
            .respond(&context)
            .map_err(|err| DeviceError::Auth(err.to_string()))?;
        Ok(answer.to_header_string())
    }
}

#[async_trait]
impl DeviceTransport for DeviceClient {
    async fn send(&self, path: &str, payload: &Value) -> Result<Value, DeviceError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|err| DeviceError::InvalidConfig(format!("bad endpoint {path}: {err}")))?;
        let body = serde_json::to_vec(payload).map_err(|err| DeviceError::Parse(err.to_string()))?;

        let mut response = self.post(&url, &body, None).await?;
        if response.status() == StatusCode::UNAUTHORIZED {
            tracing::debug!(%url, "answering digest challenge");
            let authorization = self.answer_challenge(&response, &url, &body)?;
            response = self.post(&url, &body, Some(&authorization)).await?;
        }

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(DeviceError::Status {
                status: status.as_u16(),
                message: describe_error(status, &text),
            });
        }

        serde_json::from_str(&text).map_err(|err| DeviceError::Parse(err.to_string()))
    }
}

fn parse_base_url(host: &str) -> Result<Url, DeviceError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(DeviceError::InvalidConfig("device host is empty".into()));
    }
    let candidate = if host.contains("://") {
        host.to_string()
    } else {
        format!("http://{host}")
    };
    let url = Url::parse(&candidate)
        .map_err(|err| DeviceError::InvalidConfig(format!("invalid device host {host:?}: {err}")))?;
    if url.cannot_be_a_base() || url.host_str().is_none() {
        return Err(DeviceError::InvalidConfig(format!(
            "invalid device host {host:?}"
        )));
    }
    Ok(url)
}

/// The `uri` directive of the digest response: path plus query.
fn request_uri(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{query}", url.path()),
        None => url.path().to_string(),
    }
}

/// Builds a readable message from an ISAPI error body, falling back to the
/// status reason.
fn describe_error(status: StatusCode, body: &str) -> String {
    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct IsapiStatus {
        status_string: Option<String>,
        sub_status_code: Option<String>,
        error_msg: Option<String>,
    }

    let reason = status.canonical_reason().unwrap_or("unknown status");
    let Ok(parsed) = serde_json::from_str::<IsapiStatus>(body) else {
        return reason.to_string();
    };

    match (parsed.status_string, parsed.sub_status_code, parsed.error_msg) {
        (Some(status), Some(sub), _) => format!("{status} ({sub})"),
        (Some(status), None, _) => status,
        (None, _, Some(message)) => message,
        (None, _, None) => reason.to_string(),
    }
}
