//! Server configuration.

use std::path::PathBuf;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:3000";

/// Where the server listens and what it serves outside `/api`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// `host:port` to bind.
    pub listen_addr: String,
    /// Directory of static frontend files.
    pub public_dir: PathBuf,
}

impl ServerConfig {
    pub fn new(listen_addr: impl Into<String>, public_dir: impl Into<PathBuf>) -> Self {
        Self {
            listen_addr: listen_addr.into(),
            public_dir: public_dir.into(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(DEFAULT_LISTEN_ADDR, "public")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listens_locally_and_serves_public() {
        let config = ServerConfig::default();
        assert_eq!(config.listen_addr, "127.0.0.1:3000");
        assert_eq!(config.public_dir, PathBuf::from("public"));
    }
}
