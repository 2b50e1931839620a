//! Key-value manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use mediadesk_core::config::kv::KvConfig;
use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::kv::KeyValueStore;

use crate::keys::KeySpace;

/// Key-value manager that wraps the configured provider.
///
/// The provider is selected at construction time based on configuration.
#[derive(Debug, Clone)]
pub struct KvManager {
    /// The inner provider.
    inner: Arc<dyn KeyValueStore>,
    /// Keys under the configured namespace.
    keys: KeySpace,
}

impl KvManager {
    /// Create a new manager from configuration.
    pub async fn new(config: &KvConfig) -> AppResult<Self> {
        let inner: Arc<dyn KeyValueStore> = match config.provider.as_str() {
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory key-value store");
                Arc::new(crate::memory::MemoryKvStore::new())
            }
            #[cfg(feature = "file")]
            "file" => {
                info!(data_dir = %config.file.data_dir, "Initializing file key-value store");
                Arc::new(crate::file::FileKvStore::new(&config.file.data_dir).await?)
            }
            #[cfg(feature = "redis-backend")]
            "redis" => {
                info!("Initializing Redis key-value store");
                let client = crate::redis::RedisClient::connect(&config.redis).await?;
                Arc::new(crate::redis::RedisKvStore::new(client))
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown key-value provider: '{other}'. Supported: memory, file, redis"
                )));
            }
        };

        Ok(Self {
            inner,
            keys: KeySpace::new(config.namespace.clone()),
        })
    }

    /// Create a manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn KeyValueStore>, keys: KeySpace) -> Self {
        Self {
            inner: provider,
            keys,
        }
    }

    /// The shared provider handle, for injection into stores.
    pub fn store(&self) -> Arc<dyn KeyValueStore> {
        Arc::clone(&self.inner)
    }

    /// Keys under the configured namespace.
    pub fn keys(&self) -> &KeySpace {
        &self.keys
    }
}

#[async_trait]
impl KeyValueStore for KvManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.inner.set(key, value).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
