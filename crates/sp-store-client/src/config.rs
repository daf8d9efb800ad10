//! Store connection settings, loadable from TOML.

use serde::Deserialize;

/// Connection settings for the inventory REST service.
///
/// The service is consumed at its `/items` surface only; the base URL is
/// everything before that path segment.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the inventory service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:8000".into()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
