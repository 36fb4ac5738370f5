//! CLI subcommand implementations.

pub mod documents;
pub mod events;
pub mod serve;
pub mod users;

use std::sync::Arc;

use acs_core::{SearchIdGenerator, UuidSearchIds};
use acs_device::{DeviceClient, DeviceTransport, EventPaginator, UserDirectoryFetcher};
use acs_store::ConfigStore;
use anyhow::{Context, Result};

use crate::Config;

/// Device operations sharing one client.
pub struct Device {
    pub events: EventPaginator,
    pub users: UserDirectoryFetcher,
}

/// Builds the device layer from configuration. No request is sent.
pub fn connect(config: &Config) -> Result<Device> {
    let utc_offset = config.utc_offset().context("invalid utc_offset setting")?;
    let client =
        DeviceClient::new(config.device_config()).context("failed to set up device client")?;
    tracing::debug!(base_url = %client.base_url(), %utc_offset, "device client ready");

    let transport: Arc<dyn DeviceTransport> = Arc::new(client);
    let search_ids: Arc<dyn SearchIdGenerator> = Arc::new(UuidSearchIds);
    Ok(Device {
        events: EventPaginator::new(transport.clone(), search_ids.clone(), utc_offset),
        users: UserDirectoryFetcher::new(transport, search_ids),
    })
}

pub fn open_store(config: &Config) -> Result<ConfigStore> {
    ConfigStore::open(config.data_dir.clone()).with_context(|| {
        format!(
            "failed to open data directory {}",
            config.data_dir.display()
        )
    })
}

/// Truncates by characters, not bytes, so multi-byte names never split.
fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() > width {
        format!("{}...", value.chars().take(width - 3).collect::<String>())
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("Marta Díaz", 22), "Marta Díaz");
        assert_eq!(truncate("Ñandú Ñandú Ñandú", 10), "Ñandú Ñ...");
    }

    #[test]
    fn connect_rejects_bad_offset() {
        let config = Config {
            utc_offset: "+25:00".to_string(),
            ..Config::default()
        };
        let err = connect(&config).err().unwrap();
        assert!(format!("{err:#}").contains("invalid UTC offset"));
    }

    #[test]
    fn connect_accepts_bare_host() {
        assert!(connect(&Config::default()).is_ok());
    }
}
