//! Assistant configuration, loadable from TOML.

use serde::Deserialize;

use sp_store_client::StoreConfig;

/// Top-level configuration for the assistant binary.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BotConfig {
    /// Inventory service connection settings.
    #[serde(default)]
    pub store: StoreConfig,
}

impl BotConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
