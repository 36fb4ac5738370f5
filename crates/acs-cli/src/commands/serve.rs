//! `acs serve`: the HTTP service.

use acs_api::AppState;
use anyhow::{Context, Result};

use super::{connect, open_store};
use crate::Config;

/// Builds the shared handler state from configuration.
pub fn build_state(config: &Config) -> Result<AppState> {
    let device = connect(config)?;
    let store = open_store(config)?;
    Ok(AppState::new(device.events, device.users, store))
}

/// Serves the API and the frontend until interrupted.
pub async fn run(config: &Config, listen: Option<&str>) -> Result<()> {
    let state = build_state(config)?;
    let server = config.server_config(listen);
    let listen_addr = server.listen_addr.clone();
    acs_api::serve(server, state)
        .await
        .with_context(|| format!("server on {listen_addr} failed"))
}
