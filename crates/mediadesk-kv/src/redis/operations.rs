//! Redis key-value provider implementation.

use async_trait::async_trait;
use redis::AsyncCommands;
use tracing::debug;

use mediadesk_core::error::{AppError, ErrorKind};
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::kv::KeyValueStore;

use super::client::RedisClient;

/// Redis-backed key-value store. Keys are stored without expiry.
#[derive(Debug, Clone)]
pub struct RedisKvStore {
    /// Redis client.
    client: RedisClient,
}

impl RedisKvStore {
    /// Create a new Redis store.
    pub fn new(client: RedisClient) -> Self {
        Self { client }
    }

    /// Map a Redis error to an AppError.
    fn map_err(e: redis::RedisError) -> AppError {
        AppError::with_source(ErrorKind::Storage, format!("Redis error: {e}"), e)
    }
}

#[async_trait]
impl KeyValueStore for RedisKvStore {
    fn provider_type(&self) -> &str {
        "redis"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.client.conn_mut();
        let result: Option<String> = conn.get(key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let mut conn = self.client.conn_mut();
        let _: () = conn.set(key, value).await.map_err(Self::map_err)?;
        debug!(key, bytes = value.len(), "Stored value in Redis");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let mut conn = self.client.conn_mut();
        let _: () = conn.del(key).await.map_err(Self::map_err)?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let result: bool = conn.exists(key).await.map_err(Self::map_err)?;
        Ok(result)
    }

    async fn health_check(&self) -> AppResult<bool> {
        let mut conn = self.client.conn_mut();
        let pong: String = redis::cmd("PING")
            .query_async(&mut conn)
            .await
            .map_err(Self::map_err)?;
        Ok(pong == "PONG")
    }
}
