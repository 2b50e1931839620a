//! Blob Store client configuration.

use serde::{Deserialize, Serialize};

/// Top-level Blob Store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlobStoreConfig {
    /// Provider type: `"memory"` or `"http"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// HTTP client configuration.
    #[serde(default)]
    pub http: HttpBlobStoreConfig,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            http: HttpBlobStoreConfig::default(),
        }
    }
}

/// REST Blob Store client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpBlobStoreConfig {
    /// Base URL of the media API (e.g., `https://cms.example.com/api`).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub api_token: Option<String>,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
}

impl Default for HttpBlobStoreConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_token: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_timeout() -> u64 {
    30
}
