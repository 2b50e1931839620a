//! File-backed key-value provider.
//!
//! Each key is stored as its own document inside the data directory.
//! Writes go to a temporary sibling first and are renamed into place, so a
//! crash mid-write leaves the previous document intact.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

use mediadesk_core::error::{AppError, ErrorKind};
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::kv::KeyValueStore;

/// Key-value store persisted as files on the local disk.
#[derive(Debug, Clone)]
pub struct FileKvStore {
    /// Directory holding the documents.
    root: PathBuf,
    /// Serializes writers so temporary files never collide.
    write_lock: Arc<Mutex<()>>,
}

impl FileKvStore {
    /// Create a store rooted at `data_dir`, creating the directory if needed.
    pub async fn new(data_dir: &str) -> AppResult<Self> {
        let root = PathBuf::from(data_dir);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create data directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            root,
            write_lock: Arc::new(Mutex::new(())),
        })
    }

    /// Resolve a key to its document path.
    fn resolve(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

/// Bytes kept verbatim in document file names.
const KEY_SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'.').remove(b'_').remove(b'-');

/// Turn a key into a portable file name; anything outside `[A-Za-z0-9._-]`
/// is percent-encoded so distinct keys never share a file.
fn encode_key(key: &str) -> String {
    utf8_percent_encode(key, KEY_SAFE).to_string()
}

#[async_trait]
impl KeyValueStore for FileKvStore {
    fn provider_type(&self) -> &str {
        "file"
    }

    async fn get(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.resolve(key);
        match fs::read_to_string(&path).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read key: {key}"),
                e,
            )),
        }
    }

    async fn set(&self, key: &str, value: &str) -> AppResult<()> {
        let path = self.resolve(key);
        let tmp = path.with_extension("json.tmp");

        let _guard = self.write_lock.lock().await;
        fs::write(&tmp, value.as_bytes()).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write key: {key}"),
                e,
            )
        })?;
        fs::rename(&tmp, &path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to commit key: {key}"),
                e,
            )
        })?;

        debug!(key, bytes = value.len(), "Wrote document");
        Ok(())
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        let path = self.resolve(key);
        let _guard = self.write_lock.lock().await;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete key: {key}"),
                e,
            )),
        }
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(fs::try_exists(self.resolve(key)).await.unwrap_or(false))
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.exists() && self.root.is_dir())
    }
}
