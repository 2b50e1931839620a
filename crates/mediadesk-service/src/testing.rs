//! Test doubles shared by the unit tests.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::kv::KeyValueStore;
use mediadesk_kv::memory::MemoryKvStore;

/// Memory store whose next `get` can be made to fail once.
#[derive(Debug, Default)]
pub(crate) struct FlakyKv {
    inner: MemoryKvStore,
    fail_next_get: AtomicBool,
}

impl FlakyKv {
    pub(crate) fn fail_once(&self) {
        self.fail_next_get.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl KeyValueStore for FlakyKv {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        if self.fail_next_get.swap(false, Ordering::SeqCst) {
            return Err(AppError::storage("connection reset"));
        }
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
        Ok(true)
    }
}
