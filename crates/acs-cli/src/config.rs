//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use acs_api::ServerConfig;
use acs_core::{UtcOffset, ValidationError};
use acs_device::DeviceConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Terminal address: a bare host or a full base URL.
    pub device_host: String,
    pub device_user: String,
    pub device_password: String,
    /// Offset appended to the device time filters, `±HH:MM`.
    pub utc_offset: String,
    /// Per-request timeout for device calls.
    pub request_timeout_secs: u64,
    /// Directory holding `schedules.json` and `employees.json`.
    pub data_dir: PathBuf,
    /// Static frontend files.
    pub public_dir: PathBuf,
    pub listen_addr: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("device_host", &self.device_host)
            .field("device_user", &self.device_user)
            .field("device_password", &"[REDACTED]")
            .field("utc_offset", &self.utc_offset)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("data_dir", &self.data_dir)
            .field("public_dir", &self.public_dir)
            .field("listen_addr", &self.listen_addr)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let server = ServerConfig::default();
        Self {
            device_host: "192.168.0.20".to_string(),
            device_user: "admin".to_string(),
            device_password: String::new(),
            utc_offset: UtcOffset::default().to_string(),
            request_timeout_secs: acs_device::DEFAULT_TIMEOUT.as_secs(),
            data_dir: dirs_data_path().unwrap_or_else(|| PathBuf::from(".")),
            public_dir: server.public_dir,
            listen_addr: server.listen_addr,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("ACS_"));

        figment.extract()
    }

    pub fn device_config(&self) -> DeviceConfig {
        DeviceConfig {
            host: self.device_host.clone(),
            username: self.device_user.clone(),
            password: self.device_password.clone(),
            timeout: Duration::from_secs(self.request_timeout_secs),
        }
    }

    pub fn utc_offset(&self) -> Result<UtcOffset, ValidationError> {
        self.utc_offset.parse()
    }

    /// Server settings, with `listen` taking precedence over `listen_addr`.
    pub fn server_config(&self, listen: Option<&str>) -> ServerConfig {
        ServerConfig::new(
            listen.unwrap_or(&self.listen_addr),
            self.public_dir.clone(),
        )
    }
}

/// Returns the platform-specific config directory for acs.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("acs"))
}

/// Returns the platform-specific data directory for acs.
///
/// On Linux: `~/.local/share/acs`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("acs"))
}
