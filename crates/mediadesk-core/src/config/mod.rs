//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default, so an empty configuration is valid.

pub mod blob;
pub mod browse;
pub mod kv;
pub mod logging;

use serde::{Deserialize, Serialize};

use self::blob::BlobStoreConfig;
use self::browse::{ListingConfig, TreeConfig};
use self::kv::KvConfig;
use self::logging::LoggingConfig;

use crate::error::AppError;

/// Environment variable prefix for configuration overrides.
const ENV_PREFIX: &str = "MEDIADESK";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Persisted key-value store settings.
    #[serde(default)]
    pub kv: KvConfig,
    /// Blob Store client settings.
    #[serde(default)]
    pub blob_store: BlobStoreConfig,
    /// Directory listing settings.
    #[serde(default)]
    pub listing: ListingConfig,
    /// Folder tree builder settings.
    #[serde(default)]
    pub tree: TreeConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration for an environment.
    ///
    /// Merges `config/default`, the `config/{env}` overlay, and environment
    /// variables prefixed with `MEDIADESK__`.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::build(
            config::Config::builder()
                .add_source(config::File::with_name("config/default").required(false))
                .add_source(config::File::with_name(&format!("config/{env}")).required(false)),
        )
    }

    /// Load configuration from an explicit file, plus environment overrides.
    pub fn load_from(path: &str) -> Result<Self, AppError> {
        Self::build(
            config::Config::builder().add_source(config::File::with_name(path).required(false)),
        )
    }

    fn build(
        builder: config::ConfigBuilder<config::builder::DefaultState>,
    ) -> Result<Self, AppError> {
        let config = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.kv.provider, "memory");
        assert_eq!(config.blob_store.provider, "memory");
        assert_eq!(config.tree.max_concurrency, 8);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_missing_file_is_not_an_error() {
        let config = AppConfig::load_from("does/not/exist").unwrap();
        assert_eq!(config.listing.page_size, 100);
    }
}
