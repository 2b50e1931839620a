//! Blob Store manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use mediadesk_core::config::blob::BlobStoreConfig;
use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::blob::{BlobListParams, BlobPage, BlobStore, BlobUpload, FileRecord};
use mediadesk_core::types::FileId;

/// Wraps the Blob Store provider selected by configuration.
#[derive(Debug, Clone)]
pub struct BlobStoreManager {
    inner: Arc<dyn BlobStore>,
}

impl BlobStoreManager {
    /// Create a manager from configuration.
    pub fn new(config: &BlobStoreConfig) -> AppResult<Self> {
        let inner: Arc<dyn BlobStore> = match config.provider.as_str() {
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory Blob Store");
                Arc::new(crate::providers::MemoryBlobStore::new())
            }
            #[cfg(feature = "http-client")]
            "http" => {
                info!(base_url = %config.http.base_url, "Initializing HTTP Blob Store client");
                Arc::new(crate::providers::HttpBlobStore::new(&config.http)?)
            }
            other => {
                return Err(AppError::configuration(format!(
                    "Unknown Blob Store provider: '{other}'. Supported: memory, http"
                )));
            }
        };
        Ok(Self { inner })
    }

    /// Create a manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn BlobStore>) -> Self {
        Self { inner: provider }
    }

    /// The shared provider handle, for injection into services.
    pub fn store(&self) -> Arc<dyn BlobStore> {
        Arc::clone(&self.inner)
    }
}

#[async_trait]
impl BlobStore for BlobStoreManager {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn list(&self, params: &BlobListParams) -> AppResult<BlobPage> {
        self.inner.list(params).await
    }

    async fn upload(&self, files: Vec<BlobUpload>) -> AppResult<Vec<FileRecord>> {
        self.inner.upload(files).await
    }

    async fn delete(&self, id: &FileId) -> AppResult<()> {
        self.inner.delete(id).await
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }
}
