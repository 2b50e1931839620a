//! In-memory Blob Store provider.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use mediadesk_core::error::AppError;
use mediadesk_core::result::AppResult;
use mediadesk_core::traits::blob::{BlobListParams, BlobPage, BlobStore, BlobUpload, FileRecord};
use mediadesk_core::types::{FileId, Pagination};

/// Process-local Blob Store.
///
/// Records are kept in upload order. The store can be switched offline to
/// exercise transport-failure paths.
#[derive(Debug, Clone, Default)]
pub struct MemoryBlobStore {
    files: Arc<RwLock<Vec<FileRecord>>>,
    offline: Arc<AtomicBool>,
}

impl MemoryBlobStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with records.
    pub fn with_files(files: Vec<FileRecord>) -> Self {
        Self {
            files: Arc::new(RwLock::new(files)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Insert a record as-is.
    pub async fn insert(&self, record: FileRecord) {
        self.files.write().await.push(record);
    }

    /// Make every subsequent call fail (or succeed again).
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    fn ensure_online(&self) -> AppResult<()> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AppError::external_service("Blob Store is unreachable"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn list(&self, params: &BlobListParams) -> AppResult<BlobPage> {
        self.ensure_online()?;
        let files = self.files.read().await;

        let needle = params.search.as_ref().map(|s| s.to_lowercase());
        let matching: Vec<&FileRecord> = files
            .iter()
            .filter(|f| match &needle {
                Some(n) => f.remote_name().to_lowercase().contains(n),
                None => true,
            })
            .collect();

        let total = matching.len() as u64;
        let page: Vec<FileRecord> = matching
            .into_iter()
            .skip(params.page.offset() as usize)
            .take(params.page.limit as usize)
            .cloned()
            .collect();

        Ok(BlobPage {
            files: page,
            pagination: Pagination {
                page: params.page.page,
                limit: params.page.limit,
                total,
            },
        })
    }

    async fn upload(&self, uploads: Vec<BlobUpload>) -> AppResult<Vec<FileRecord>> {
        self.ensure_online()?;
        let now = Utc::now();
        let created: Vec<FileRecord> = uploads
            .into_iter()
            .map(|u| {
                let id = Uuid::new_v4().simple().to_string();
                FileRecord {
                    url: format!("memory://blobs/{id}"),
                    id: FileId::new(id),
                    name: u.name.clone(),
                    original_name: Some(u.name),
                    mime_type: u.mime_type,
                    size: u.data.len() as u64,
                    updated_at: Some(now),
                }
            })
            .collect();

        self.files.write().await.extend(created.iter().cloned());
        debug!(count = created.len(), "Stored uploaded blobs");
        Ok(created)
    }

    async fn delete(&self, id: &FileId) -> AppResult<()> {
        self.ensure_online()?;
        let mut files = self.files.write().await;
        let before = files.len();
        files.retain(|f| &f.id != id);
        if files.len() == before {
            return Err(AppError::not_found(format!("File {id} not found")));
        }
        Ok(())
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(!self.offline.load(Ordering::SeqCst))
    }
}
