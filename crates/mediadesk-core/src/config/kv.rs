//! Key-value store configuration.

use serde::{Deserialize, Serialize};

/// Top-level key-value store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KvConfig {
    /// Provider type: `"memory"`, `"file"`, or `"redis"`.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Namespace prepended to every key.
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// File-backed store configuration.
    #[serde(default)]
    pub file: FileKvConfig,
    /// Redis store configuration.
    #[serde(default)]
    pub redis: RedisKvConfig,
}

impl Default for KvConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            namespace: default_namespace(),
            file: FileKvConfig::default(),
            redis: RedisKvConfig::default(),
        }
    }
}

/// File-backed store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileKvConfig {
    /// Directory holding one JSON document per key.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

impl Default for FileKvConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
        }
    }
}

/// Redis store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RedisKvConfig {
    /// Redis connection URL.
    #[serde(default = "default_redis_url")]
    pub url: String,
}

impl Default for RedisKvConfig {
    fn default() -> Self {
        Self {
            url: default_redis_url(),
        }
    }
}

fn default_provider() -> String {
    "memory".to_string()
}

fn default_namespace() -> String {
    "mediadesk".to_string()
}

fn default_data_dir() -> String {
    "./data/kv".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}
